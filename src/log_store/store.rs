//! File-backed message log with a fixed retention window

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::snapshot::{decode_snapshot, encode_snapshot};
use crate::types::Message;
use crate::utils::atomic::{atomic_write, remove_stale_temp_file};

/// Default retention window
pub const DEFAULT_MAX_MESSAGES: usize = 200;

/// Result type for LogStore operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in LogStore operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("message not found: {0}")]
    NotFound(String),
}

/// The persisted message log
#[derive(Debug, Clone)]
pub struct LogStore {
    path: PathBuf,
    max_messages: usize,
}

impl LogStore {
    /// Open the log at `path`, creating an empty snapshot if none exists
    ///
    /// A retention window of zero is raised to one.
    pub fn open<P: AsRef<Path>>(path: P, max_messages: usize) -> StoreResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            max_messages: max_messages.max(1),
        };

        if remove_stale_temp_file(&store.path)? {
            log::warn!(
                "Removed leftover temp file from an interrupted write next to {}",
                store.path.display()
            );
        }

        if !store.path.exists() {
            store.persist(&[])?;
            log::info!("Created empty message log at {}", store.path.display());
        }

        Ok(store)
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Retention window
    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    /// Read the whole log, oldest first
    ///
    /// A missing file is an empty log. An unreadable or corrupt file is
    /// logged and also treated as empty.
    pub fn read_all(&self) -> Vec<Message> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                log::warn!("Failed to read message log {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match decode_snapshot(&content) {
            Ok(messages) => messages,
            Err(e) => {
                log::warn!("Message log {} is corrupt: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Append `message` to `existing`, keep the last `max_messages`, persist
    ///
    /// Returns the retained log. Any existing entry sharing the new id is
    /// dropped first.
    pub fn append_and_persist(
        &self,
        mut existing: Vec<Message>,
        message: Message,
    ) -> StoreResult<Vec<Message>> {
        existing.retain(|m| m.id != message.id);
        existing.push(message);

        let overflow = existing.len().saturating_sub(self.max_messages);
        if overflow > 0 {
            existing.drain(..overflow);
        }

        self.persist(&existing)?;
        Ok(existing)
    }

    /// Remove every entry with `id` and persist
    ///
    /// Returns the removed id, or `NotFound` without touching the file.
    pub fn remove_and_persist(&self, id: &str) -> StoreResult<String> {
        let messages = self.read_all();
        let before = messages.len();
        let remaining: Vec<Message> = messages.into_iter().filter(|m| m.id != id).collect();

        if remaining.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.persist(&remaining)?;
        Ok(id.to_string())
    }

    /// Replace the snapshot with `messages`
    pub fn persist(&self, messages: &[Message]) -> StoreResult<()> {
        let content = encode_snapshot(messages)?;
        atomic_write(&self.path, &content)?;
        Ok(())
    }
}
