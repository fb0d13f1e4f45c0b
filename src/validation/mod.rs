//! Message factory
//!
//! Normalizes an inbound [`NewMessage`] into a canonical [`Message`]:
//! fields are trimmed, empty fields are rejected, and overlong text is
//! silently truncated to [`MAX_TEXT_LENGTH`] characters.

use uuid::Uuid;

use crate::error::ValidationError;
use crate::types::{Message, NewMessage, MAX_TEXT_LENGTH};
use crate::utils::time::now_utc;

/// A validated message that has not been assigned an id or timestamp yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub username: String,
    pub text: String,
}

impl Draft {
    /// Assign a fresh id and the current time
    pub fn stamp(self) -> Message {
        Message {
            id: Uuid::new_v4().to_string(),
            username: self.username,
            text: self.text,
            created_at: now_utc(),
        }
    }
}

/// Validate and normalize an inbound payload
pub fn validate(payload: NewMessage) -> Result<Draft, ValidationError> {
    let username = payload.username.as_deref().unwrap_or_default().trim();
    let text = payload.text.as_deref().unwrap_or_default().trim();

    if username.is_empty() {
        return Err(ValidationError::UsernameRequired);
    }
    if text.is_empty() {
        return Err(ValidationError::TextRequired);
    }

    Ok(Draft {
        username: username.to_string(),
        text: truncate_chars(text, MAX_TEXT_LENGTH).to_string(),
    })
}

/// Cut `s` to at most `max` characters without splitting a code point
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

impl Message {
    /// Build a new message from raw fields
    pub fn create(username: &str, text: &str) -> Result<Message, ValidationError> {
        validate(NewMessage::new(username, text)).map(Draft::stamp)
    }
}
