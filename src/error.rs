use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::{debug, error};

#[derive(Debug, ThisError)]
pub enum IntakeError {
    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Unknown username or wrong password; the two are never told apart.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing or invalid session token")]
    Unauthorized,

    /// Request body that is not a JSON object of the expected shape.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

impl From<tokio::task::JoinError> for IntakeError {
    fn from(e: tokio::task::JoinError) -> Self {
        IntakeError::Internal(format!("blocking task failed: {e}"))
    }
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self {
            IntakeError::Database(e) => {
                error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody::new("DATABASE_ERROR", "Database error"),
                )
            }
            IntakeError::PasswordHash(_) | IntakeError::Internal(_) => {
                error!(error = %self, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody::new("INTERNAL_ERROR", "Internal server error"),
                )
            }
            IntakeError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody::new("UNAUTHORIZED", "Invalid credentials"),
            ),
            IntakeError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody::new("UNAUTHORIZED", "Unauthorized"),
            ),
            IntakeError::MalformedBody(detail) => {
                debug!(detail = %detail, "rejected request body");
                (
                    StatusCode::BAD_REQUEST,
                    ApiErrorBody::new("BAD_REQUEST", "Malformed request body"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Standardized API error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub code: &'static str,
    pub message: &'static str,
}

impl ApiErrorBody {
    fn new(code: &'static str, message: &'static str) -> Self {
        Self { code, message }
    }
}
