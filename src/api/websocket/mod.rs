//! WebSocket module for realtime chat
//!
//! Provides the `/ws` endpoint. Each connection can create and delete
//! messages (with an optional acknowledgment) and receives every accepted
//! mutation as a broadcast event, including its own.
//!
//! ## Features
//! - Ordered fanout of `created` / `deleted` events
//! - Sequence ID tracking for gap detection
//! - Lag notice for clients that fall behind, so they can refetch

pub mod broadcaster;
pub mod events;
pub mod handler;
pub mod state;

pub use broadcaster::EventBroadcaster;
pub use events::{AckMessage, AckStatus, ChatEvent, ClientMessage, WsMessage};
pub use state::AppState;
