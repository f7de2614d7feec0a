use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::{Application, NewApplication};
use crate::middleware::auth::RequireSession;
use crate::middleware::json_body::JsonBody;
use crate::notify::{self, NotifyOutcome};
use crate::{IntakeError, router::IntakeState};

pub const MSG_RECEIVED: &str = "Application received";
pub const MSG_RECEIVED_EMAIL_FAILED: &str = "Application received, but failed to send email";

#[derive(Debug, Serialize, Deserialize)]
pub struct ApplyResponse {
    pub message: String,
    pub id: i64,
}

/// POST /api/apply -> stores the application, then attempts the confirmation email.
///
/// Only the insert can fail the request; a failed email changes the message, not the status.
pub async fn apply_handler(
    State(state): State<IntakeState>,
    JsonBody(submission): JsonBody<NewApplication>,
) -> Result<Json<ApplyResponse>, IntakeError> {
    let stored = state.storage.insert_application(submission).await?;
    let id = stored.id;
    info!(id, "application stored");

    let message = match notify::deliver(state.notifier.as_ref(), &stored).await {
        NotifyOutcome::Sent => MSG_RECEIVED,
        NotifyOutcome::Failed => MSG_RECEIVED_EMAIL_FAILED,
    };
    Ok(Json(ApplyResponse {
        message: message.to_string(),
        id,
    }))
}

/// GET /api/applications -> every stored application, newest first.
pub async fn list_applications_handler(
    _auth: RequireSession,
    State(state): State<IntakeState>,
) -> Result<Json<Vec<Application>>, IntakeError> {
    Ok(Json(state.storage.list_applications().await?))
}
