//! Background tasks module
//!
//! This module contains the tasks that run alongside the HTTP server: the
//! periodic tick source, the delayed status message and the display renderer.

pub mod display_renderer;
pub mod running_message;
pub mod ticker;

// Re-export main functions
pub use display_renderer::display_renderer_task;
pub use running_message::spawn_running_message;
pub use ticker::spawn_ticker;
