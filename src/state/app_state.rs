//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, error, info, warn};

use super::{Command, Display, Effect, Generation, Recovery, TimerEngine, TimerState};
use crate::{
    storage::{load_snapshot, save_snapshot, KeyValueStore},
    tasks::{spawn_running_message, spawn_ticker},
};

/// Timing knobs for the tick source and the delayed status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettings {
    pub tick_period: Duration,
    pub running_message_delay: Duration,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            running_message_delay: Duration::from_secs(2),
        }
    }
}

/// Result of a command issued from the UI layer
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// `false` when the command was not valid in the current phase
    pub accepted: bool,
    pub display: Display,
}

/// Owns the stopwatch engine and carries out the effects of its transitions
pub struct AppState {
    engine: Mutex<TimerEngine>,
    store: Arc<dyn KeyValueStore>,
    pub settings: TimerSettings,
    /// Outcome of loading the persisted snapshot at startup
    pub recovery: Recovery,
    /// Active tick source, at most one
    ticker: Mutex<Option<JoinHandle<()>>>,
    /// Pending "Timer running" transition
    running_message: Mutex<Option<JoinHandle<()>>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for display updates
    pub display_tx: watch::Sender<Display>,
    /// Keep the receiver alive to prevent channel closure
    pub _display_rx: watch::Receiver<Display>,
}

impl AppState {
    /// Load the persisted snapshot from `store` and recover the engine from it
    pub fn new(port: u16, host: String, settings: TimerSettings, store: Arc<dyn KeyValueStore>) -> Self {
        let loaded = load_snapshot(store.as_ref());
        let (engine, recovery, effects) = TimerEngine::recover(loaded);

        match recovery {
            Recovery::Paused => info!("Restored paused timer at {}", engine.display().clock()),
            Recovery::ResetInterrupted => {
                warn!("Previous session was interrupted while running, timer reset")
            }
            Recovery::Idle => debug!("Loaded idle timer at {}", engine.display().clock()),
        }

        // Nothing is running yet, so persisting is the only effect that matters
        if effects.contains(&Effect::Persist) {
            if let Err(e) = save_snapshot(store.as_ref(), engine.state()) {
                error!("Failed to persist recovered state: {}", e);
            }
        }

        let (display_tx, display_rx) = watch::channel(engine.display());

        Self {
            engine: Mutex::new(engine),
            store,
            settings,
            recovery,
            ticker: Mutex::new(None),
            running_message: Mutex::new(None),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            display_tx,
            _display_rx: display_rx,
        }
    }

    /// Apply a UI command. Commands that are invalid in the current phase are
    /// ignored and reported with `accepted: false`.
    pub fn command(self: &Arc<Self>, command: Command) -> Result<CommandOutcome, String> {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;

        let effects = engine.apply(command);
        let accepted = !effects.is_empty();

        if accepted {
            info!("Timer {}: {}", command.as_str(), engine.display().clock());
            self.apply_effects(&engine, &effects);
            self.record_action(command);
        } else {
            debug!("Ignoring {} while {}", command.as_str(), engine.phase());
        }

        Ok(CommandOutcome {
            accepted,
            display: engine.display(),
        })
    }

    pub fn start(self: &Arc<Self>) -> Result<CommandOutcome, String> {
        self.command(Command::Start)
    }

    pub fn pause(self: &Arc<Self>) -> Result<CommandOutcome, String> {
        self.command(Command::Pause)
    }

    pub fn reset(self: &Arc<Self>) -> Result<CommandOutcome, String> {
        self.command(Command::Reset)
    }

    /// Handle one tick from the source started under `generation`.
    ///
    /// Returns `false` once that source is stale and should stop.
    pub fn tick(self: &Arc<Self>, generation: Generation) -> Result<bool, String> {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;

        let effects = engine.tick(generation);
        if effects.is_empty() {
            return Ok(false);
        }

        self.apply_effects(&engine, &effects);
        Ok(true)
    }

    /// Switch the status line to "Timer running" if the session that
    /// scheduled it is still current
    pub fn confirm_running(self: &Arc<Self>, generation: Generation) -> Result<(), String> {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;

        let effects = engine.confirm_running(generation);
        if !effects.is_empty() {
            self.apply_effects(&engine, &effects);
        }
        Ok(())
    }

    /// Carry out effects while the engine lock is held, so persisted and
    /// published snapshots follow transition order
    fn apply_effects(self: &Arc<Self>, engine: &TimerEngine, effects: &[Effect]) {
        for effect in effects {
            match *effect {
                Effect::Persist => {
                    if let Err(e) = save_snapshot(self.store.as_ref(), engine.state()) {
                        error!("Failed to persist timer state: {}", e);
                    }
                }
                Effect::StartTicker(generation) => {
                    let handle = spawn_ticker(Arc::clone(self), generation, self.settings.tick_period);
                    Self::replace_task(&self.ticker, Some(handle), "ticker");
                }
                Effect::StopTicker => Self::replace_task(&self.ticker, None, "ticker"),
                Effect::ScheduleRunningMessage(generation) => {
                    let handle = spawn_running_message(
                        Arc::clone(self),
                        generation,
                        self.settings.running_message_delay,
                    );
                    Self::replace_task(&self.running_message, Some(handle), "running message");
                }
                Effect::CancelRunningMessage => {
                    Self::replace_task(&self.running_message, None, "running message")
                }
            }
        }

        // send_replace never fails, even without subscribers
        self.display_tx.send_replace(engine.display());
    }

    /// Abort whatever task occupies `slot` and store `next` in its place
    fn replace_task(slot: &Mutex<Option<JoinHandle<()>>>, next: Option<JoinHandle<()>>, name: &str) {
        match slot.lock() {
            Ok(mut current) => {
                if let Some(previous) = current.take() {
                    if !previous.is_finished() {
                        debug!("Cancelling previous {} task", name);
                    }
                    previous.abort();
                }
                *current = next;
            }
            Err(e) => {
                error!("Failed to lock {} slot: {}", name, e);
                if let Some(handle) = next {
                    handle.abort();
                }
            }
        }
    }

    fn record_action(&self, command: Command) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(command.as_str().to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get the current display snapshot
    pub fn get_display(&self) -> Result<Display, String> {
        self.engine.lock()
            .map(|engine| engine.display())
            .map_err(|e| format!("Failed to lock timer engine: {}", e))
    }

    /// Get a copy of the current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.engine.lock()
            .map(|engine| engine.state().clone())
            .map_err(|e| format!("Failed to lock timer engine: {}", e))
    }

    /// Whether a tick source task is currently alive
    pub fn ticker_active(&self) -> bool {
        self.ticker.lock()
            .map(|slot| slot.as_ref().is_some_and(|handle| !handle.is_finished()))
            .unwrap_or(false)
    }

    /// Describe where snapshots are persisted
    pub fn storage(&self) -> String {
        self.store.describe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Stop background tasks and write a final snapshot
    pub fn shutdown(&self) {
        Self::replace_task(&self.ticker, None, "ticker");
        Self::replace_task(&self.running_message, None, "running message");

        match self.engine.lock() {
            Ok(engine) => {
                if let Err(e) = save_snapshot(self.store.as_ref(), engine.state()) {
                    error!("Failed to persist timer state on shutdown: {}", e);
                }
            }
            Err(e) => error!("Failed to lock timer engine on shutdown: {}", e),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("storage", &self.store.describe())
            .field("settings", &self.settings)
            .field("recovery", &self.recovery)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}
