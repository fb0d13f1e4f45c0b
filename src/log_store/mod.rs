//! Log Store
//!
//! Owns the on-disk message log: a single JSON array that is fully
//! rewritten on every mutation.
//!
//! ```text
//! Write Path:
//! ┌──────────┐    ┌──────────────┐    ┌────────────────┐    ┌──────────────┐
//! │ read_all │───►│ append/remove│───►│ keep last M    │───►│ atomic_write │
//! │ (fresh)  │    │ by id        │    │ (append only)  │    │ .tmp + rename│
//! └──────────┘    └──────────────┘    └────────────────┘    └──────────────┘
//! ```
//!
//! The store itself does no locking; callers serialize access through
//! [`crate::service::MutationService`].

mod snapshot;
mod store;

pub use snapshot::{decode_snapshot, encode_snapshot};
pub use store::{LogStore, StoreError, StoreResult, DEFAULT_MAX_MESSAGES};
