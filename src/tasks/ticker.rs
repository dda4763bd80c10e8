//! Periodic tick source

use std::{sync::Arc, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error};

use crate::state::{AppState, Generation};

/// Spawn a tick source for the session started under `generation`
pub fn spawn_ticker(state: Arc<AppState>, generation: Generation, period: Duration) -> JoinHandle<()> {
    tokio::spawn(ticker_task(state, generation, period))
}

/// Tick every `period` until the engine reports the session as stale.
///
/// The first tick fires one full period after start.
pub async fn ticker_task(state: Arc<AppState>, generation: Generation, period: Duration) {
    debug!("Starting ticker for generation {} every {:?}", generation, period);

    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match state.tick(generation) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Ticker for generation {} retired", generation);
                break;
            }
            Err(e) => {
                error!("Timer tick failed: {}", e);
                break;
            }
        }
    }
}
