//! Utility functions module
//!
//! Process-level helpers shared by the binary: graceful shutdown on signals.

pub mod signals;

// Re-export main functions
pub use signals::shutdown_signal;
