//! Persisted unlock store.
//!
//! The durable mapping `variant -> unlocked day indices`. Reads never fail
//! (missing or malformed data loads as empty) and writes are
//! fire-and-forget: a failed save only logs, the in-memory state stays
//! authoritative for the session.

mod transport;
mod unlock;

pub use transport::{FileStore, KeyValueStore, MemoryStore};
pub use unlock::{UNLOCK_KEY, UnlockState, UnlockStore, normalize};
