//! Delayed "Timer running" status transition

use std::{sync::Arc, time::Duration};
use tokio::{task::JoinHandle, time::sleep};
use tracing::error;

use crate::state::{AppState, Generation};

/// After `delay`, switch the status line from "Timer started" to
/// "Timer running". Ignored by the engine if a newer command has run.
pub fn spawn_running_message(state: Arc<AppState>, generation: Generation, delay: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        sleep(delay).await;

        if let Err(e) = state.confirm_running(generation) {
            error!("Failed to update running message: {}", e);
        }
    })
}
