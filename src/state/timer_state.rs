//! Timer state structure and counter arithmetic

use std::fmt;

use serde::{Deserialize, Serialize};

/// The engine's current mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Never started, or fully reset
    #[default]
    Idle,
    /// Tick active
    Running,
    /// Tick suspended, counters frozen
    Paused,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable status line shown next to the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusMessage {
    #[serde(rename = "Timer started")]
    Started,
    #[serde(rename = "Timer running")]
    Running,
    #[serde(rename = "Timer paused")]
    Paused,
    #[serde(rename = "Timer reset")]
    Reset,
}

impl StatusMessage {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusMessage::Started => "Timer started",
            StatusMessage::Running => "Timer running",
            StatusMessage::Paused => "Timer paused",
            StatusMessage::Reset => "Timer reset",
        }
    }

    /// Parse one of the four literal status strings. Anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Timer started" => Some(StatusMessage::Started),
            "Timer running" => Some(StatusMessage::Running),
            "Timer paused" => Some(StatusMessage::Paused),
            "Timer reset" => Some(StatusMessage::Reset),
            _ => None,
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Textual label of a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonLabel {
    Start,
    Resume,
    Pause,
    Reset,
}

impl ButtonLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonLabel::Start => "Start",
            ButtonLabel::Resume => "Resume",
            ButtonLabel::Pause => "Pause",
            ButtonLabel::Reset => "Reset",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Start" => Some(ButtonLabel::Start),
            "Resume" => Some(ButtonLabel::Resume),
            "Pause" => Some(ButtonLabel::Pause),
            "Reset" => Some(ButtonLabel::Reset),
            _ => None,
        }
    }
}

impl fmt::Display for ButtonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Elapsed counters plus the status bookkeeping that gets persisted.
///
/// Invariant: `seconds < 60` and `minutes < 60`. Hours are unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerState {
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u64,
    pub phase: Phase,
    /// `None` until the first command on a fresh install
    pub message: Option<StatusMessage>,
    /// Only consulted when recovering a persisted snapshot
    pub last_button: Option<ButtonLabel>,
}

impl TimerState {
    /// Create a zeroed, idle timer state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle state holding the given counters.
    ///
    /// Returns `None` when seconds or minutes are out of range.
    pub fn with_counters(hours: u64, minutes: u8, seconds: u8) -> Option<Self> {
        if seconds >= 60 || minutes >= 60 {
            return None;
        }
        Some(Self {
            seconds,
            minutes,
            hours,
            ..Self::default()
        })
    }

    /// Advance the counters by one second, carrying into minutes and hours
    pub fn advance(&mut self) {
        self.seconds += 1;
        if self.seconds == 60 {
            self.seconds = 0;
            self.minutes += 1;
            if self.minutes == 60 {
                self.minutes = 0;
                self.hours = self.hours.saturating_add(1);
            }
        }
    }

    /// Zero all three counters
    pub fn clear_counters(&mut self) {
        self.seconds = 0;
        self.minutes = 0;
        self.hours = 0;
    }

    /// Total elapsed time in seconds
    pub fn elapsed_seconds(&self) -> u64 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(u64::from(self.minutes) * 60 + u64::from(self.seconds))
    }
}
