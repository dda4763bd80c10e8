//! State management module
//!
//! This module contains the stopwatch state machine, its display snapshot and
//! the application state that drives it.

pub mod app_state;
pub mod display;
pub mod engine;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, CommandOutcome, TimerSettings};
pub use display::{Controls, Display};
pub use engine::{Command, Effect, Generation, Recovery, TimerEngine};
pub use timer_state::{ButtonLabel, Phase, StatusMessage, TimerState};
