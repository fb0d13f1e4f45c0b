//! Subscriber-side view of the message log
//!
//! A client that both sends a mutation and subscribes to the broadcast
//! sees its own message twice: once in the acknowledgment and once as a
//! `created` event. [`MessageView`] applies both idempotently by id, so
//! the originator never shows a message twice.

use crate::api::websocket::events::ChatEvent;
use crate::types::Message;

/// Messages as a client should display them, ordered by `created_at`
#[derive(Debug, Clone, Default)]
pub struct MessageView {
    messages: Vec<Message>,
}

impl MessageView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a `GET /messages` snapshot
    pub fn from_snapshot(messages: Vec<Message>) -> Self {
        let mut view = Self::new();
        for message in messages {
            view.insert(message);
        }
        view
    }

    /// Apply a broadcast event; returns whether the view changed
    pub fn apply(&mut self, event: &ChatEvent) -> bool {
        match event {
            ChatEvent::Created { message } => self.insert(message.clone()),
            ChatEvent::Deleted { id } => self.remove(id),
        }
    }

    /// Insert unless a message with the same id is already present
    pub fn insert(&mut self, message: Message) -> bool {
        if self.contains(&message.id) {
            return false;
        }
        // After any existing message with an equal timestamp
        let pos = self
            .messages
            .partition_point(|m| m.created_at <= message.created_at);
        self.messages.insert(pos, message);
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != id);
        self.messages.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.messages.iter().any(|m| m.id == id)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
