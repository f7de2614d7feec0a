use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::middleware::json_body::JsonBody;
use crate::{IntakeError, auth, router::IntakeState};

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/login -> issues a new session token, revoking the previous one.
pub async fn login_handler(
    State(state): State<IntakeState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, IntakeError> {
    let token = auth::login(&state.storage, &state.sessions, &req.username, &req.password).await?;
    Ok(Json(LoginResponse { token }))
}
