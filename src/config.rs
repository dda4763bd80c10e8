//! Configuration and CLI argument handling

use std::{path::PathBuf, sync::Arc, time::Duration};
use clap::Parser;

use crate::{
    state::TimerSettings,
    storage::{FileStore, KeyValueStore, MemoryStore},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "stopwatch")]
#[command(about = "A persistent stopwatch with start, pause, resume and reset controls")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// File the timer snapshot is persisted to
    #[arg(short, long, default_value = "stopwatch-state.json")]
    pub state_file: PathBuf,

    /// Keep the snapshot in memory only
    #[arg(long, conflicts_with = "state_file")]
    pub ephemeral: bool,

    /// Tick period in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Delay before "Timer started" becomes "Timer running", in milliseconds
    #[arg(long, default_value = "2000")]
    pub message_delay_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            tick_period: Duration::from_millis(self.tick_ms),
            running_message_delay: Duration::from_millis(self.message_delay_ms),
        }
    }

    /// Open the snapshot store selected on the command line
    pub fn open_store(&self) -> Arc<dyn KeyValueStore> {
        if self.ephemeral {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(FileStore::open(&self.state_file))
        }
    }
}
