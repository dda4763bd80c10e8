//! Display snapshot consumed by the rendering layer

use serde::{Deserialize, Serialize};

use super::timer_state::{ButtonLabel, Phase, TimerState};

/// Enablement of the three controls. A pure function of the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub start_enabled: bool,
    pub pause_enabled: bool,
    pub reset_enabled: bool,
}

impl Controls {
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Idle | Phase::Paused => Self {
                start_enabled: true,
                pause_enabled: false,
                reset_enabled: true,
            },
            Phase::Running => Self {
                start_enabled: false,
                pause_enabled: true,
                reset_enabled: false,
            },
        }
    }
}

/// Everything a renderer needs to draw the stopwatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Display {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub message: String,
    pub phase: Phase,
    /// "Resume" while paused, "Start" otherwise
    pub start_label: ButtonLabel,
    #[serde(flatten)]
    pub controls: Controls,
}

impl Display {
    pub fn from_state(state: &TimerState) -> Self {
        let start_label = match state.phase {
            Phase::Paused => ButtonLabel::Resume,
            Phase::Idle | Phase::Running => ButtonLabel::Start,
        };

        Self {
            hours: format!("{:02}", state.hours),
            minutes: format!("{:02}", state.minutes),
            seconds: format!("{:02}", state.seconds),
            message: state
                .message
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            phase: state.phase,
            start_label,
            controls: Controls::for_phase(state.phase),
        }
    }

    /// Clock face as `HH:MM:SS`
    pub fn clock(&self) -> String {
        format!("{}:{}:{}", self.hours, self.minutes, self.seconds)
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::from_state(&TimerState::new())
    }
}
