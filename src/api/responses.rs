//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{Command, Display};

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Phase after the command ("idle", "running" or "paused")
    pub status: String,
    pub action: Command,
    /// `false` when the command was ignored in the current phase
    pub accepted: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub display: Display,
}

impl ApiResponse {
    /// Create a new API response from the display after `action`
    pub fn new(action: Command, accepted: bool, display: Display) -> Self {
        Self {
            status: display.phase.as_str().to_string(),
            action,
            accepted,
            message: display.message.clone(),
            timestamp: Utc::now(),
            display,
        }
    }
}

/// Status response with the full display and server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub display: Display,
    pub elapsed_seconds: u64,
    pub ticker_active: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub storage: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
