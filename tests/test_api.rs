use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use stopwatch::{
    create_router,
    state::{AppState, TimerSettings},
    storage::MemoryStore,
};

fn router() -> Router {
    let state = Arc::new(AppState::new(
        20554,
        "127.0.0.1".to_string(),
        TimerSettings::default(),
        Arc::new(MemoryStore::new()),
    ));
    create_router(state)
}

async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn start_returns_running_display() {
    let app = router();

    let (status, body) = call(&app, Method::POST, "/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["action"], "start");
    assert_eq!(body["accepted"], true);
    assert_eq!(body["message"], "Timer started");
    assert_eq!(body["display"]["start_enabled"], false);
    assert_eq!(body["display"]["pause_enabled"], true);
    assert_eq!(body["display"]["reset_enabled"], false);
}

#[tokio::test]
async fn pause_while_idle_is_ignored() {
    let app = router();

    let (status, body) = call(&app, Method::POST, "/pause").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], false);
    assert_eq!(body["status"], "idle");
}

#[tokio::test]
async fn pause_relabels_start_as_resume() {
    let app = router();
    call(&app, Method::POST, "/start").await;

    let (_, body) = call(&app, Method::POST, "/pause").await;
    assert_eq!(body["status"], "paused");
    assert_eq!(body["message"], "Timer paused");
    assert_eq!(body["display"]["start_label"], "Resume");

    let (_, body) = call(&app, Method::POST, "/reset").await;
    assert_eq!(body["message"], "Timer reset");
    assert_eq!(body["display"]["start_label"], "Start");
    assert_eq!(body["display"]["seconds"], "00");
}

#[tokio::test]
async fn status_reports_display_and_last_action() {
    let app = router();
    call(&app, Method::POST, "/start").await;

    let (status, body) = call(&app, Method::GET, "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display"]["phase"], "running");
    assert_eq!(body["elapsed_seconds"], 0);
    assert_eq!(body["ticker_active"], true);
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["last_action"], "start");
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = call(&router(), Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
