//! Persistence module
//!
//! A string key-value store plus the snapshot contract the stopwatch reads at
//! load and writes after every mutation.

pub mod snapshot;
pub mod store;

// Re-export main types
pub use snapshot::{load_snapshot, save_snapshot};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
