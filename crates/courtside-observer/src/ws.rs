//! `WebSocket` handler for live scoreboard streaming.
//!
//! Clients connect to `GET /ws/game`. They first receive the current
//! [`Scoreboard`](courtside_types::Scoreboard) if a game is in progress,
//! then one JSON message after every committed change to the game.
//!
//! If a client falls behind, lagged messages are silently skipped and
//! the client resumes from the most recent scoreboard.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use courtside_core::GameSession;

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming scoreboard updates.
///
/// # Route
///
/// `GET /ws/game`
pub async fn ws_game(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("WebSocket client connected");

    // Subscribe before reading the snapshot so no update falls in between.
    let mut rx = state.subscribe();

    let greeted = match state.read(GameSession::scoreboard).await {
        Ok(current) => send_json(&mut socket, &current).await,
        Err(_) => true,
    };
    if !greeted {
        return;
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(scoreboard) => {
                        if !send_json(&mut socket, &scoreboard).await {
                            return;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        debug!(skipped = n, "WebSocket client lagged, skipping ahead");
                    }
                    Err(RecvError::Closed) => {
                        debug!("Broadcast channel closed, shutting down WebSocket");
                        return;
                    }
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!("WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    _ => {
                        // Clients only listen; anything else they send is ignored.
                    }
                }
            }
        }
    }
}

/// Send `value` as a text frame. Returns `false` once the client is gone.
async fn send_json<T: serde::Serialize>(socket: &mut WebSocket, value: &T) -> bool {
    let json = match serde_json::to_string(value) {
        Ok(j) => j,
        Err(e) => {
            warn!("Failed to serialize scoreboard: {e}");
            return true;
        }
    };
    if socket.send(Message::Text(json.into())).await.is_err() {
        debug!("WebSocket client disconnected (send failed)");
        return false;
    }
    true
}
