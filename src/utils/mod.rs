//! Utility functions and helpers
//!
//! This module contains timestamp utilities and atomic file writes.

pub mod atomic;
pub mod time;

pub use atomic::{atomic_write, remove_stale_temp_file};
pub use time::{current_timestamp, now_utc};
