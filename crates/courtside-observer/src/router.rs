//! Axum router construction for the Observer API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the Observer server.
///
/// See [`handlers`] for the endpoint table. `GET /ws/game` streams
/// scoreboard updates.
///
/// CORS is configured to allow any origin so a dashboard served from
/// another port can reach the API.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        // WebSocket
        .route("/ws/game", get(ws::ws_game))
        // Game lifecycle
        .route("/api/game", post(handlers::start_game).get(handlers::get_game))
        .route("/api/game/lineup", post(handlers::set_lineup))
        // Plays
        .route("/api/game/score", post(handlers::record_score))
        .route("/api/game/undo", post(handlers::undo))
        .route("/api/game/redo", post(handlers::redo))
        .route("/api/game/substitution", post(handlers::substitute))
        // Quarters
        .route("/api/game/quarter/complete", post(handlers::complete_quarter))
        .route("/api/game/quarters", get(handlers::quarters))
        // Reports
        .route("/api/game/report", get(handlers::report))
        .route("/api/game/report.csv", get(handlers::report_csv))
        .route("/api/game/plays", get(handlers::plays))
        .route("/api/game/integrity", get(handlers::integrity))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
