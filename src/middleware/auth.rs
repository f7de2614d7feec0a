use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header::AUTHORIZATION, request::Parts};

use crate::auth::SessionTokens;
use crate::error::IntakeError;
use crate::router::IntakeState;

/// Ensure the inbound request carries the current admin session token.
/// Accepts either:
/// - Header: `authorization: <token>`
/// - Header: `authorization: Bearer <token>`
pub fn ensure_session(headers: &HeaderMap, sessions: &SessionTokens) -> Result<(), IntakeError> {
    let Some(raw) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
        return Err(IntakeError::Unauthorized);
    };
    let raw = raw.trim();
    let token = raw
        .strip_prefix("Bearer ")
        .or_else(|| raw.strip_prefix("bearer "))
        .unwrap_or(raw);

    if sessions.check(token) {
        Ok(())
    } else {
        Err(IntakeError::Unauthorized)
    }
}

/// Extractor guarding admin-only routes.
#[derive(Debug, Clone, Copy)]
pub struct RequireSession;

impl FromRequestParts<IntakeState> for RequireSession {
    type Rejection = IntakeError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &IntakeState,
    ) -> Result<Self, Self::Rejection> {
        ensure_session(&parts.headers, &state.sessions)?;
        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn accepts_raw_and_bearer_token() {
        let sessions = SessionTokens::new();
        let token = sessions.issue();
        assert!(ensure_session(&headers(&token), &sessions).is_ok());
        assert!(ensure_session(&headers(&format!("Bearer {token}")), &sessions).is_ok());
    }

    #[test]
    fn rejects_missing_or_stale_token() {
        let sessions = SessionTokens::new();
        assert!(ensure_session(&HeaderMap::new(), &sessions).is_err());
        // no login yet: even an empty header must not match
        assert!(ensure_session(&headers(""), &sessions).is_err());

        let stale = sessions.issue();
        sessions.issue();
        assert!(matches!(
            ensure_session(&headers(&stale), &sessions),
            Err(IntakeError::Unauthorized)
        ));
    }
}
