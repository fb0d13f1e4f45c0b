//! Data types for the realtime chat server
//!
//! This module contains the message record and the inbound create payload.

mod message;

pub use message::{lenient_string, Message, NewMessage, MAX_TEXT_LENGTH};
