//! Snapshot encoding
//!
//! A snapshot is a pretty-printed JSON array of messages, oldest first.

use crate::types::Message;

/// Serialize the full log
pub fn encode_snapshot(messages: &[Message]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(messages)
}

/// Parse a snapshot
///
/// Blank content is an empty log. Anything that is not an array of
/// messages is an error; the store decides how to recover.
pub fn decode_snapshot(content: &str) -> serde_json::Result<Vec<Message>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(content)
}
