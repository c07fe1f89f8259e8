//! Observer API server for the Courtside plus/minus tracker.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **REST endpoints** for every game operation: start, lineup, score,
//!   undo, redo, substitution, quarter completion, and reports
//! - **CSV export** of the player report (`GET /api/game/report.csv`)
//! - **`WebSocket` endpoint** (`/ws/game`) streaming scoreboard updates
//!   via [`tokio::sync::broadcast`]
//! - **Minimal HTML page** (`GET /`) with the live score and play log
//!
//! # Architecture
//!
//! The server tracks one [`GameSession`] at a time, held in [`AppState`]
//! behind a single `RwLock`. The session owns all game rules; this crate
//! only translates HTTP to session calls and session errors to HTTP
//! statuses.
//!
//! [`GameSession`]: courtside_core::GameSession

pub mod error;
pub mod export;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use error::ObserverError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
