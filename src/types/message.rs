use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::time::iso_millis;

/// Maximum number of characters kept from a message body
pub const MAX_TEXT_LENGTH: usize = 2000;

/// A chat message, the only persisted record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique id, assigned at creation and used as the deletion key
    pub id: String,
    pub username: String,
    pub text: String,
    /// Insertion time; the ordering key for clients
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

/// Inbound payload for creating a message
///
/// Both fields are optional on the wire so that a missing field is reported
/// as a validation error rather than a parse error. Numbers and booleans
/// are taken as their text form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMessage {
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
}

impl NewMessage {
    pub fn new(username: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            text: Some(text.into()),
        }
    }
}

/// Read a JSON scalar as a string
///
/// Strings pass through, numbers and booleans are formatted, and `null`,
/// arrays and objects become `None`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}
