//! Stopwatch state machine
//!
//! The engine never touches timers, storage or the UI. Every operation mutates
//! the owned [`TimerState`] and returns the [`Effect`]s the driver has to carry
//! out. An empty effect list means the input was ignored.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::display::Display;
use super::timer_state::{ButtonLabel, Phase, StatusMessage, TimerState};

/// Token identifying the command that started a tick source or scheduled the
/// delayed "Timer running" message. Bumped by every state-changing command.
pub type Generation = u64;

/// Commands accepted from the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Start,
    Pause,
    Reset,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Reset => "reset",
        }
    }
}

/// Side effects requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Write the current state to the key-value store
    Persist,
    /// Replace any tick source with a new one tagged with this generation
    StartTicker(Generation),
    StopTicker,
    /// After the configured delay, call [`TimerEngine::confirm_running`]
    ScheduleRunningMessage(Generation),
    CancelRunningMessage,
}

/// How a persisted snapshot was brought back on load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recovery {
    /// Paused session restored with its counters
    Paused,
    /// Snapshot was taken while running; elapsed time discarded
    ResetInterrupted,
    /// Loaded into idle with whatever counters were stored
    Idle,
}

#[derive(Debug, Clone, Default)]
pub struct TimerEngine {
    state: TimerState,
    generation: Generation,
}

impl TimerEngine {
    /// Create an idle engine around the given state
    pub fn new(mut state: TimerState) -> Self {
        state.phase = Phase::Idle;
        Self {
            state,
            generation: 0,
        }
    }

    /// Build an engine from a snapshot read at load time.
    ///
    /// A snapshot saved mid-run (`"Timer started"` with a Start/Resume button)
    /// is reset rather than resumed.
    pub fn recover(loaded: TimerState) -> (Self, Recovery, Vec<Effect>) {
        let mut engine = Self::new(loaded);

        match (engine.state.last_button, engine.state.message) {
            (Some(ButtonLabel::Pause), Some(StatusMessage::Paused)) => {
                engine.state.phase = Phase::Paused;
                (engine, Recovery::Paused, Vec::new())
            }
            (Some(ButtonLabel::Resume | ButtonLabel::Start), Some(StatusMessage::Started)) => {
                let effects = engine.reset();
                (engine, Recovery::ResetInterrupted, effects)
            }
            _ => (engine, Recovery::Idle, Vec::new()),
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn display(&self) -> Display {
        Display::from_state(&self.state)
    }

    pub fn apply(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Reset => self.reset(),
        }
    }

    /// Idle/Paused → Running. Counters resume from their current values.
    pub fn start(&mut self) -> Vec<Effect> {
        if self.state.phase == Phase::Running {
            debug!("Start ignored: already running");
            return Vec::new();
        }

        let generation = self.bump();
        self.state.phase = Phase::Running;
        self.state.message = Some(StatusMessage::Started);
        self.state.last_button = Some(ButtonLabel::Start);

        vec![
            Effect::StartTicker(generation),
            Effect::ScheduleRunningMessage(generation),
            Effect::Persist,
        ]
    }

    /// Running → Paused
    pub fn pause(&mut self) -> Vec<Effect> {
        if self.state.phase != Phase::Running {
            debug!("Pause ignored: timer is {}", self.state.phase);
            return Vec::new();
        }

        self.bump();
        self.state.phase = Phase::Paused;
        self.state.message = Some(StatusMessage::Paused);
        self.state.last_button = Some(ButtonLabel::Pause);

        vec![Effect::StopTicker, Effect::CancelRunningMessage, Effect::Persist]
    }

    /// Any phase → Idle with zeroed counters
    pub fn reset(&mut self) -> Vec<Effect> {
        self.bump();
        self.state.clear_counters();
        self.state.phase = Phase::Idle;
        self.state.message = Some(StatusMessage::Reset);
        self.state.last_button = Some(ButtonLabel::Reset);

        vec![Effect::StopTicker, Effect::CancelRunningMessage, Effect::Persist]
    }

    /// One periodic tick from the source started under `generation`
    pub fn tick(&mut self, generation: Generation) -> Vec<Effect> {
        if !self.is_current(generation) {
            debug!(
                "Stale tick ignored (generation {}, current {})",
                generation, self.generation
            );
            return Vec::new();
        }

        self.state.advance();
        vec![Effect::Persist]
    }

    /// Delayed transition from "Timer started" to "Timer running"
    pub fn confirm_running(&mut self, generation: Generation) -> Vec<Effect> {
        if !self.is_current(generation) {
            debug!("Stale running message ignored (generation {})", generation);
            return Vec::new();
        }

        self.state.message = Some(StatusMessage::Running);
        vec![Effect::Persist]
    }

    fn is_current(&self, generation: Generation) -> bool {
        self.state.phase == Phase::Running && generation == self.generation
    }

    fn bump(&mut self) -> Generation {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}
