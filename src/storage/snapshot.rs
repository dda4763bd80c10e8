//! Persisted snapshot contract
//!
//! Five keys: `seconds`, `minutes`, `hours` as decimal strings, `message` as
//! one of the status literals and `button` as the last pressed control's label.
//! Absent or malformed values load as defaults and are never an error.

use tracing::{debug, warn};

use super::store::{KeyValueStore, StoreError};
use crate::state::{ButtonLabel, StatusMessage, TimerState};

pub const SECONDS_KEY: &str = "seconds";
pub const MINUTES_KEY: &str = "minutes";
pub const HOURS_KEY: &str = "hours";
pub const MESSAGE_KEY: &str = "message";
pub const BUTTON_KEY: &str = "button";

/// Read the snapshot from `store`, replacing anything unusable with defaults
pub fn load_snapshot(store: &dyn KeyValueStore) -> TimerState {
    let seconds: u8 = read_counter(store, SECONDS_KEY, Some(60));
    let minutes: u8 = read_counter(store, MINUTES_KEY, Some(60));
    let hours: u64 = read_counter(store, HOURS_KEY, None);

    let message = store.get(MESSAGE_KEY).and_then(|raw| {
        let parsed = StatusMessage::parse(&raw);
        if parsed.is_none() && !raw.is_empty() {
            debug!("Ignoring unknown stored message {:?}", raw);
        }
        parsed
    });
    let last_button = store.get(BUTTON_KEY).and_then(|raw| {
        let parsed = ButtonLabel::parse(&raw);
        if parsed.is_none() && !raw.is_empty() {
            debug!("Ignoring unknown stored button {:?}", raw);
        }
        parsed
    });

    TimerState {
        seconds,
        minutes,
        hours,
        message,
        last_button,
        ..TimerState::default()
    }
}

/// Write every key of the snapshot in one commit
pub fn save_snapshot(store: &dyn KeyValueStore, state: &TimerState) -> Result<(), StoreError> {
    let mut entries = vec![
        (SECONDS_KEY, state.seconds.to_string()),
        (MINUTES_KEY, state.minutes.to_string()),
        (HOURS_KEY, state.hours.to_string()),
    ];
    if let Some(message) = state.message {
        entries.push((MESSAGE_KEY, message.as_str().to_string()));
    }
    if let Some(button) = state.last_button {
        entries.push((BUTTON_KEY, button.as_str().to_string()));
    }

    store.set_many(&entries)
}

fn read_counter<T>(store: &dyn KeyValueStore, key: &str, limit: Option<u64>) -> T
where
    T: TryFrom<u64> + Default,
{
    let Some(raw) = store.get(key) else {
        return T::default();
    };

    let value = match raw.trim().parse::<u64>() {
        Ok(value) => value,
        Err(_) => {
            warn!("Stored {} value {:?} is not a count, using 0", key, raw);
            return T::default();
        }
    };

    if limit.is_some_and(|limit| value >= limit) {
        warn!("Stored {} value {} is out of range, using 0", key, value);
        return T::default();
    }

    T::try_from(value).unwrap_or_else(|_| {
        warn!("Stored {} value {} does not fit, using 0", key, value);
        T::default()
    })
}
