//! Stopwatch - A persistent stopwatch served over HTTP
//!
//! This is the main entry point for the stopwatch application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use stopwatch::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::display_renderer_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("stopwatch={},tower_http=info", config.log_level()))
        .init();

    info!("Starting stopwatch server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms, message_delay={}ms",
          config.host, config.port, config.tick_ms, config.message_delay_ms);

    // Load the persisted snapshot and recover the timer from it
    let store = config.open_store();
    info!("Persisting timer state to {}", store.describe());
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.timer_settings(),
        store,
    ));

    // Render display updates to the log
    let renderer_state = Arc::clone(&state);
    tokio::spawn(async move {
        display_renderer_task(renderer_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Start or resume the timer");
    info!("  POST /pause  - Pause the timer");
    info!("  POST /reset  - Reset the timer to 00:00:00");
    info!("  GET  /status - Current display and metadata");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
