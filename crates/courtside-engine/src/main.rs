//! Server binary for the Courtside plus/minus tracker.
//!
//! Loads configuration, initializes structured logging, and serves the
//! observer API until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `courtside-config.yaml` (or `COURTSIDE_CONFIG`)
//! 2. Initialize tracing; `RUST_LOG` wins over the configured level
//! 3. Build the shared application state
//! 4. Serve HTTP and `WebSocket` traffic

mod error;

use std::sync::Arc;

use courtside_core::CourtsideConfig;
use courtside_observer::{AppState, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the server
/// cannot bind.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CourtsideConfig::load().map_err(EngineError::from)?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.logging.level).map_err(|e| EngineError::LogFilter {
            directive: config.logging.level.clone(),
            message: e.to_string(),
        })?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("courtside-engine starting");
    info!(
        own_team = config.game.own_team,
        opponent_team = config.game.opponent_team,
        max_players = config.roster.max_players,
        bind = config.server.bind_address(),
        "Configuration loaded"
    );

    let state = Arc::new(AppState::new(&config));
    start_server(&config.server, state)
        .await
        .map_err(EngineError::from)?;

    info!("courtside-engine shutdown complete");
    Ok(())
}
