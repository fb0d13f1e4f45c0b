//! API module for HTTP and WebSocket endpoints
//!
//! Both transports are thin callers into [`crate::service::MutationService`];
//! they only translate results into their own wire format.

pub mod http;
pub mod rest;
pub mod websocket;
