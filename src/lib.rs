//! Realtime Chat Server
//!
//! A small realtime messaging core: a bounded, file-backed message log
//! shared by a REST API and a WebSocket channel, with every accepted
//! mutation broadcast to all connected clients.
//!
//! # Modules
//!
//! - `types`: Core data structures (Message, NewMessage)
//! - `validation`: Message factory (trim, require, truncate)
//! - `log_store`: Snapshot file with a fixed retention window
//! - `service`: Serialized create/delete/list over the log store
//! - `api`: REST endpoints, WebSocket endpoint and fanout broadcaster
//! - `timeline`: Subscriber-side view that applies events idempotently
//! - `config`: Command line and environment configuration
//! - `utils`: Utility functions (timestamps, atomic writes)
//!
//! # Example
//!
//! ```no_run
//! use std::net::SocketAddr;
//! use std::sync::Arc;
//! use realtime_chat::{AppState, EventBroadcaster, LogStore, MutationService};
//! use realtime_chat::api::http::{cors_layer, create_router};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let store = LogStore::open("messages.json", 200)?;
//! let service = MutationService::new(store, Arc::new(EventBroadcaster::new(1024)));
//! let app = create_router(Arc::new(AppState::new(service)), cors_layer("*")?);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:4000").await?;
//! axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod log_store;
pub mod service;
pub mod timeline;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export commonly used items at crate root
pub use api::websocket::{AppState, ChatEvent, EventBroadcaster};
pub use config::ServerConfig;
pub use error::{ChatError, ChatResult, ValidationError};
pub use log_store::LogStore;
pub use service::{Created, MutationService};
pub use timeline::MessageView;
pub use types::{Message, NewMessage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
