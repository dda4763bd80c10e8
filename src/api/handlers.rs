//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::error;

use crate::state::{AppState, Command, Display};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

fn run_command(state: &Arc<AppState>, command: Command) -> Result<Json<ApiResponse>, StatusCode> {
    match state.command(command) {
        Ok(outcome) => Ok(Json(ApiResponse::new(command, outcome.accepted, outcome.display))),
        Err(e) => {
            error!("Failed to {} timer: {}", command.as_str(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start or resume the timer
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, Command::Start)
}

/// Handle POST /pause - Pause a running timer
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, Command::Pause)
}

/// Handle POST /reset - Zero the timer from any phase
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, Command::Reset)
}

/// Handle GET /status - Return the current display and server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer_state = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        display: Display::from_state(&timer_state),
        elapsed_seconds: timer_state.elapsed_seconds(),
        ticker_active: state.ticker_active(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        storage: state.storage(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
