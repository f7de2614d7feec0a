use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::IntakeError;

/// JSON object body, read regardless of the declared content type.
///
/// An empty body reads as `{}`. Anything that is not a JSON object is rejected with
/// [`IntakeError::MalformedBody`], which renders the usual `{code,message}` envelope.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = IntakeError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| IntakeError::MalformedBody(rejection.body_text()))?;
        parse_object(&bytes).map(JsonBody)
    }
}

pub fn parse_object<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, IntakeError> {
    let value = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(bytes).map_err(|e| IntakeError::MalformedBody(e.to_string()))?
    };
    if !value.is_object() {
        return Err(IntakeError::MalformedBody("expected a JSON object".into()));
    }
    serde_json::from_value(value).map_err(|e| IntakeError::MalformedBody(e.to_string()))
}
