//! Startup and shutdown of the tracker's HTTP server.
//!
//! Provides [`start_server`] which binds to the configured address and
//! runs the Axum server until `Ctrl-C` is received, then drains in-flight
//! requests before returning.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use courtside_core::config::ServerConfig;

use crate::router::build_router;
use crate::state::AppState;

/// Serve the tracker API on `config.host:config.port`.
///
/// Builds the router over the shared game state and serves
/// requests until `Ctrl-C`. Returns `Ok(())` on clean shutdown.
///
/// # Errors
///
/// Returns an error if the address is invalid, the TCP listener cannot
/// bind, or the server encounters a fatal I/O error.
pub async fn start_server(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    let router = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "Courtside server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    info!("Courtside server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Failures while binding or serving the tracker API.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The configured address is invalid or already in use.
    #[error("bind error: {0}")]
    Bind(String),

    /// `axum::serve` returned an I/O error.
    #[error("serve error: {0}")]
    Serve(String),
}
