//! WebSocket event types for realtime message updates

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{lenient_string, Message, NewMessage};

/// Chat events broadcast to every connected client
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// A message was accepted into the log
    Created { message: Message },

    /// A message was removed from the log
    Deleted { id: String },
}

/// WebSocket message wrapper with metadata
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WsMessage {
    /// The chat event
    #[serde(flatten)]
    pub event: ChatEvent,

    /// Monotonically increasing sequence ID for gap detection
    pub sequence_id: u64,

    /// Unix timestamp when event was created
    pub timestamp: i64,
}

/// Requests a client may send over the socket
///
/// `ack` is a client-chosen correlation number. When present, the server
/// answers the request with an [`AckMessage`] carrying the same number.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Create a message
    Create {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ack: Option<u64>,
        #[serde(default, deserialize_with = "null_as_default")]
        payload: NewMessage,
    },

    /// Delete a message by id
    Delete {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ack: Option<u64>,
        #[serde(default, deserialize_with = "lenient_string")]
        id: Option<String>,
    },

    /// Ping for heartbeat
    Ping,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Outcome of a socket request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AckStatus {
    Ok,
    Error,
}

/// Direct reply to the client that issued a request
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub ack: u64,
    pub status: AckStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AckMessage {
    fn new(ack: u64, status: AckStatus) -> Self {
        Self {
            msg_type: "ack".to_string(),
            ack,
            status,
            message: None,
            id: None,
            error: None,
        }
    }

    pub fn created(ack: u64, message: Message) -> Self {
        Self {
            message: Some(message),
            ..Self::new(ack, AckStatus::Ok)
        }
    }

    pub fn deleted(ack: u64, id: String) -> Self {
        Self {
            id: Some(id),
            ..Self::new(ack, AckStatus::Ok)
        }
    }

    pub fn error(ack: u64, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(ack, AckStatus::Error)
        }
    }
}

/// Welcome message sent on connection
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub current_sequence_id: u64,
}

impl WelcomeMessage {
    pub fn new(current_sequence_id: u64) -> Self {
        Self {
            msg_type: "connected".to_string(),
            current_sequence_id,
        }
    }
}

/// Pong response message
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PongMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
}

impl Default for PongMessage {
    fn default() -> Self {
        Self {
            msg_type: "pong".to_string(),
        }
    }
}
