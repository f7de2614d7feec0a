use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// A stored job application as returned by the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Application {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub gender: Option<String>,
    pub degree: Option<String>,
    pub experience: Option<String>,
    #[serde(rename = "howKnow")]
    pub how_know: Option<String>,
    pub resume: Option<String>,
    pub position: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Applicant-provided fields of a submission. Missing fields are stored as NULL.
///
/// Any JSON scalar is accepted and kept as text, so `"mobile": 5550100` stores `"5550100"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewApplication {
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub mobile: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub experience: Option<String>,
    #[serde(rename = "howKnow", default, deserialize_with = "scalar_text")]
    pub how_know: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub resume: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub position: Option<String>,
}

/// Strings pass through, null is NULL, anything else is stored as its JSON text.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

impl NewApplication {
    /// Attach the identity assigned by storage.
    pub fn into_stored(self, id: i64, submitted_at: DateTime<Utc>) -> Application {
        Application {
            id,
            name: self.name,
            email: self.email,
            mobile: self.mobile,
            gender: self.gender,
            degree: self.degree,
            experience: self.experience,
            how_know: self.how_know,
            resume: self.resume,
            position: self.position,
            submitted_at,
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct AdminCredential {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredential")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}
