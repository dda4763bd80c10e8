//! Display renderer background task

use std::sync::Arc;
use tracing::{debug, info};

use crate::state::{AppState, Display};

/// One rendered display line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedLine {
    /// The status message changed
    Status(String),
    /// Only the clock moved
    Clock(String),
}

/// Render `current` relative to the last status message shown
pub fn render(current: &Display, last_message: &str) -> RenderedLine {
    if current.message != last_message {
        RenderedLine::Status(format!("[{}] {}", current.clock(), current.message))
    } else {
        RenderedLine::Clock(format!("[{}] {}", current.clock(), current.phase))
    }
}

/// Follow display updates and render them to the log.
///
/// Status changes are logged at info, every clock update at debug.
pub async fn display_renderer_task(state: Arc<AppState>) {
    info!("Starting display renderer task");

    let mut display_rx = state.display_tx.subscribe();
    let mut last_message = display_rx.borrow_and_update().message.clone();

    while display_rx.changed().await.is_ok() {
        let current = display_rx.borrow_and_update().clone();

        match render(&current, &last_message) {
            RenderedLine::Status(line) => {
                info!("{}", line);
                last_message = current.message;
            }
            RenderedLine::Clock(line) => debug!("{}", line),
        }
    }

    debug!("Display channel closed, renderer exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Phase, StatusMessage, TimerState};

    fn snapshot(seconds: u8, phase: Phase, message: StatusMessage) -> Display {
        let mut state = TimerState::with_counters(0, 0, seconds).unwrap();
        state.phase = phase;
        state.message = Some(message);
        Display::from_state(&state)
    }

    #[test]
    fn message_change_renders_status_line() {
        let current = snapshot(0, Phase::Running, StatusMessage::Started);
        assert_eq!(
            render(&current, ""),
            RenderedLine::Status("[00:00:00] Timer started".to_string())
        );
    }

    #[test]
    fn same_message_renders_clock_line() {
        let current = snapshot(7, Phase::Running, StatusMessage::Running);
        assert_eq!(
            render(&current, "Timer running"),
            RenderedLine::Clock("[00:00:07] running".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn renderer_follows_commands_and_ticks() {
        use crate::{state::TimerSettings, storage::MemoryStore};
        use std::time::Duration;

        let state = Arc::new(AppState::new(
            0,
            "127.0.0.1".to_string(),
            TimerSettings::default(),
            Arc::new(MemoryStore::new()),
        ));
        let renderer = tokio::spawn(display_renderer_task(Arc::clone(&state)));

        state.start().unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;
        state.pause().unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(!renderer.is_finished());
        assert_eq!(state.get_display().unwrap().message, "Timer paused");
        renderer.abort();
    }
}
