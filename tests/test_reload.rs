use std::{sync::Arc, time::Duration};

use stopwatch::{
    state::{AppState, ButtonLabel, Phase, Recovery, TimerSettings},
    storage::{FileStore, KeyValueStore, MemoryStore},
};

fn reload(store: Arc<dyn KeyValueStore>) -> Arc<AppState> {
    Arc::new(AppState::new(0, "127.0.0.1".to_string(), TimerSettings::default(), store))
}

#[tokio::test]
async fn restores_paused_session() {
    let store = Arc::new(MemoryStore::with_entries([
        ("seconds", "5"),
        ("minutes", "0"),
        ("hours", "0"),
        ("message", "Timer paused"),
        ("button", "Pause"),
    ]));

    let state = reload(store);
    assert_eq!(state.recovery, Recovery::Paused);

    let display = state.get_display().unwrap();
    assert_eq!(display.clock(), "00:00:05");
    assert_eq!(display.phase, Phase::Paused);
    assert_eq!(display.start_label, ButtonLabel::Resume);
    assert!(display.controls.start_enabled);
    assert!(!display.controls.pause_enabled);
    assert!(display.controls.reset_enabled);
    assert!(!state.ticker_active());
}

#[tokio::test]
async fn interrupted_run_is_reset() {
    let store = Arc::new(MemoryStore::with_entries([
        ("seconds", "42"),
        ("minutes", "3"),
        ("message", "Timer started"),
        ("button", "Start"),
    ]));

    let state = reload(store.clone());
    assert_eq!(state.recovery, Recovery::ResetInterrupted);

    let display = state.get_display().unwrap();
    assert_eq!(display.clock(), "00:00:00");
    assert_eq!(display.phase, Phase::Idle);
    assert_eq!(display.message, "Timer reset");

    // The reset overwrites the persisted copy
    assert_eq!(store.get("seconds").as_deref(), Some("0"));
    assert_eq!(store.get("minutes").as_deref(), Some("0"));
    assert_eq!(store.get("button").as_deref(), Some("Reset"));
}

#[tokio::test]
async fn long_running_session_loads_idle_with_counters() {
    let store = Arc::new(MemoryStore::with_entries([
        ("seconds", "10"),
        ("minutes", "1"),
        ("hours", "0"),
        ("message", "Timer running"),
        ("button", "Start"),
    ]));

    let state = reload(store);
    assert_eq!(state.recovery, Recovery::Idle);

    let display = state.get_display().unwrap();
    assert_eq!(display.clock(), "00:01:10");
    assert_eq!(display.phase, Phase::Idle);
    assert!(display.controls.start_enabled);
}

#[tokio::test]
async fn malformed_seconds_load_as_zero() {
    let store = Arc::new(MemoryStore::with_entries([("seconds", "abc"), ("minutes", "2")]));

    let state = reload(store);
    assert_eq!(state.get_display().unwrap().clock(), "00:02:00");
}

#[tokio::test(start_paused = true)]
async fn paused_session_survives_file_store_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stopwatch.json");

    let first = reload(Arc::new(FileStore::open(&path)));
    first.start().unwrap();
    tokio::time::sleep(Duration::from_millis(3500)).await;
    first.pause().unwrap();
    first.shutdown();
    drop(first);

    let second = reload(Arc::new(FileStore::open(&path)));
    assert_eq!(second.recovery, Recovery::Paused);
    assert_eq!(second.get_display().unwrap().clock(), "00:00:03");

    second.start().unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(second.get_display().unwrap().clock(), "00:00:04");
}
