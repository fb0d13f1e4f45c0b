//! Shared application state for HTTP and WebSocket handlers

use tokio::sync::broadcast;

use super::events::WsMessage;
use crate::service::MutationService;

/// Shared application state
pub struct AppState {
    /// The only path to the message log
    pub service: MutationService,
}

impl AppState {
    pub fn new(service: MutationService) -> Self {
        Self { service }
    }

    /// Get the current sequence ID
    pub fn current_sequence_id(&self) -> u64 {
        self.service.broadcaster().current_sequence_id()
    }

    /// Subscribe to receive broadcast events
    pub fn subscribe(&self) -> broadcast::Receiver<WsMessage> {
        self.service.broadcaster().subscribe()
    }
}
