//! Stopwatch - A persistent stopwatch served over HTTP
//!
//! This library provides the stopwatch state machine, the key-value snapshot
//! that carries it across restarts, and the HTTP surface a renderer drives it
//! through.

pub mod config;
pub mod state;
pub mod api;
pub mod storage;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerEngine};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
