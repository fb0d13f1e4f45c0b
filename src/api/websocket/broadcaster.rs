//! Fanout broadcaster
//!
//! Every accepted mutation is published once to a tokio broadcast channel;
//! each connected socket holds its own receiver. Publishing never blocks
//! and never fails the mutation: with no receivers the event is dropped,
//! and a receiver that falls more than `capacity` events behind observes
//! `RecvError::Lagged` on its own without affecting anyone else.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;

use super::events::{ChatEvent, WsMessage};
use crate::types::Message;
use crate::utils::time::current_timestamp;

/// Default channel capacity
pub const DEFAULT_CAPACITY: usize = 1024;

/// Event broadcaster for WebSocket notifications
pub struct EventBroadcaster {
    tx: broadcast::Sender<WsMessage>,
    sequence_counter: AtomicU64,
}

impl EventBroadcaster {
    /// Create a new broadcaster with the given capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            sequence_counter: AtomicU64::new(0),
        }
    }

    /// Broadcast an event to all connected WebSocket clients
    ///
    /// Events are delivered in the order this method is called.
    pub fn broadcast(&self, event: ChatEvent) {
        let seq = self.sequence_counter.fetch_add(1, Ordering::SeqCst);
        let msg = WsMessage {
            event,
            sequence_id: seq,
            timestamp: current_timestamp(),
        };
        // Ignore errors - just means no receivers are connected
        let _ = self.tx.send(msg);
    }

    pub fn announce_created(&self, message: &Message) {
        self.broadcast(ChatEvent::Created {
            message: message.clone(),
        });
    }

    pub fn announce_deleted(&self, id: &str) {
        self.broadcast(ChatEvent::Deleted { id: id.to_string() });
    }

    /// Get the current sequence ID
    pub fn current_sequence_id(&self) -> u64 {
        self.sequence_counter.load(Ordering::SeqCst)
    }

    /// Subscribe to receive broadcast events
    pub fn subscribe(&self) -> broadcast::Receiver<WsMessage> {
        self.tx.subscribe()
    }

    /// Number of currently connected subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
