//! Shared application state for the Observer API server.
//!
//! [`AppState`] holds the one game session this server tracks and the
//! broadcast channel that pushes scoreboard updates to `WebSocket`
//! clients. The session sits behind a single [`RwLock`]; every mutation
//! takes the write lock for its whole transaction.

use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};

use courtside_core::config::{CourtsideConfig, GameConfig, RosterConfig};
use courtside_core::{GameSession, SessionError};
use courtside_types::Scoreboard;

use crate::error::ObserverError;

/// Capacity of the broadcast channel for scoreboard updates.
///
/// If a subscriber falls behind by more than this many messages it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest message.
const BROADCAST_CAPACITY: usize = 64;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Broadcast sender for scoreboard updates.
    pub tx: broadcast::Sender<Scoreboard>,
    /// The game in progress, if one has been started.
    pub session: Arc<RwLock<Option<GameSession>>>,
    /// Default team names for games started without them.
    pub game_defaults: GameConfig,
    /// Roster intake rules applied to every new game.
    pub roster_rules: RosterConfig,
}

impl AppState {
    /// Create application state with no game in progress.
    pub fn new(config: &CourtsideConfig) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            tx,
            session: Arc::new(RwLock::new(None)),
            game_defaults: config.game.clone(),
            roster_rules: config.roster.clone(),
        }
    }

    /// Subscribe to the scoreboard broadcast channel.
    pub fn subscribe(&self) -> broadcast::Receiver<Scoreboard> {
        self.tx.subscribe()
    }

    /// Publish a scoreboard to all connected clients.
    ///
    /// Returns the number of receivers that received the message.
    /// Returns 0 if no clients are connected (this is not an error).
    pub fn broadcast(&self, scoreboard: &Scoreboard) -> usize {
        // send returns Err only when there are zero receivers.
        self.tx.send(scoreboard.clone()).unwrap_or(0)
    }

    /// Replace the current game with `session` and announce it.
    pub async fn replace_session(&self, session: GameSession) -> Scoreboard {
        let scoreboard = session.scoreboard();
        let mut guard = self.session.write().await;
        *guard = Some(session);
        self.broadcast(&scoreboard);
        scoreboard
    }

    /// Run a read-only query against the current game.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError::NoActiveGame`] if no game has been started.
    pub async fn read<T>(&self, query: impl FnOnce(&GameSession) -> T) -> Result<T, ObserverError> {
        let guard = self.session.read().await;
        let session = guard.as_ref().ok_or(ObserverError::NoActiveGame)?;
        Ok(query(session))
    }

    /// Run one mutation against the current game under the write lock and
    /// broadcast the resulting scoreboard if it succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError::NoActiveGame`] if no game has been started,
    /// or [`ObserverError::Session`] if the session rejected the operation.
    pub async fn mutate<T>(
        &self,
        op: impl FnOnce(&mut GameSession) -> Result<T, SessionError>,
    ) -> Result<T, ObserverError> {
        let mut guard = self.session.write().await;
        let session = guard.as_mut().ok_or(ObserverError::NoActiveGame)?;
        let out = op(session)?;
        self.broadcast(&session.scoreboard());
        Ok(out)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&CourtsideConfig::default())
    }
}
