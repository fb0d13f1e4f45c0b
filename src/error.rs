//! Error types shared by the service and both transport adapters

use thiserror::Error;

use crate::log_store::StoreError;

/// Result type for chat operations
pub type ChatResult<T> = Result<T, ChatError>;

/// Inbound message failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("username required")]
    UsernameRequired,
    #[error("text required")]
    TextRequired,
}

/// Failure reasons surfaced to callers of the mutation service
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("message not found: {0}")]
    NotFound(String),

    #[error("storage failure: {0}")]
    Storage(StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ChatError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ChatError::NotFound(id),
            other => ChatError::Storage(other),
        }
    }
}

impl From<tokio::task::JoinError> for ChatError {
    fn from(e: tokio::task::JoinError) -> Self {
        ChatError::Internal(e.to_string())
    }
}
