//! Play log, aggregate tally, and undo/redo for the Courtside tracker.
//!
//! Every scoring play in a game is recorded through this crate. The play
//! log is the source of truth; the [`Tally`](courtside_types::Tally) (team scores, per-player
//! plus/minus, possessions played) is a cached projection of it that is
//! updated incrementally and can always be recomputed by replaying the log.
//!
//! # Architecture
//!
//! - [`transaction`] -- The [`ScoreEventBuilder`] for validated event construction.
//! - [`tally`] -- Forward and inverse application of one event to a tally.
//! - [`ledger`] -- The [`PlayLedger`]: applied log, redo stack, cached tally.
//! - [`reconcile`] -- Projection verification and anomaly reporting.
//!
//! # Reversibility
//!
//! For any tally `S` and event `e`:
//!
//! ```text
//! revert(apply(S, e), e) == S
//! ```
//!
//! Undo pops the applied log and reverts the event; redo pops the redo stack
//! and re-applies it using the lineup stored on the event. A new play clears
//! the redo stack in the same transaction that appends it.
//!
//! # Usage
//!
//! ```
//! use courtside_ledger::PlayLedger;
//! use courtside_types::{Player, Quarter, ScoreValue, Team};
//!
//! let roster: Vec<Player> = ["A", "B", "C", "D", "E", "F"]
//!     .into_iter()
//!     .map(Player::from)
//!     .collect();
//! let on_court = roster.get(..5).unwrap_or_default();
//!
//! let mut ledger = PlayLedger::new(&roster);
//! ledger
//!     .record_score(Quarter::Q1, Team::Own, ScoreValue::TwoPointer, on_court)
//!     .ok();
//! assert_eq!(ledger.tally().team_score, 2);
//!
//! ledger.undo().ok();
//! assert_eq!(ledger.tally().team_score, 0);
//! assert_eq!(ledger.redo_len(), 1);
//! ```

pub mod ledger;
pub mod reconcile;
pub mod tally;
pub mod transaction;

// Re-export primary types at crate root.
pub use ledger::PlayLedger;
pub use reconcile::ProjectionResult;
pub use transaction::ScoreEventBuilder;

use courtside_types::Player;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when recording, undoing, or redoing plays.
///
/// Every error leaves the ledger unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Undo was requested with no plays in the log.
    #[error("nothing to undo: the play log is empty")]
    EmptyLog,

    /// Redo was requested with no undone plays.
    #[error("nothing to redo: no undone plays are available")]
    EmptyRedo,

    /// A required field was not set on the builder.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The lineup snapshot does not have exactly five players.
    #[error("lineup snapshot must have {expected} players, got {actual}")]
    LineupSize {
        /// Required number of players.
        expected: usize,
        /// Number of players supplied.
        actual: usize,
    },

    /// The lineup snapshot names the same player twice.
    #[error("lineup snapshot lists {player} more than once")]
    DuplicateInLineup {
        /// The repeated player.
        player: Player,
    },

    /// An event names a player the tally does not track.
    #[error("player {player} is not on the tracked roster")]
    UnknownPlayer {
        /// The unknown player.
        player: Player,
    },

    /// Aggregate arithmetic left the representable range.
    #[error("arithmetic overflow while updating {field}")]
    Overflow {
        /// The tally field being updated.
        field: &'static str,
    },

    /// An internal error that should not occur in normal operation.
    #[error("internal ledger error: {0}")]
    InternalError(&'static str),
}

// ---------------------------------------------------------------------------
// Anomaly type
// ---------------------------------------------------------------------------

/// One field where the cached tally disagrees with a replay of the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum Discrepancy {
    /// Tracked team score differs.
    TeamScore {
        /// Value obtained by replaying the log.
        expected: u32,
        /// Value held in the cached tally.
        cached: u32,
    },
    /// Opponent score differs.
    OpponentScore {
        /// Value obtained by replaying the log.
        expected: u32,
        /// Value held in the cached tally.
        cached: u32,
    },
    /// A player's plus/minus differs (or the player is missing on one side).
    PlusMinus {
        /// The player.
        player: Player,
        /// Value obtained by replaying the log.
        expected: Option<i32>,
        /// Value held in the cached tally.
        cached: Option<i32>,
    },
    /// A player's possessions-played count differs.
    PossessionsPlayed {
        /// The player.
        player: Player,
        /// Value obtained by replaying the log.
        expected: Option<u32>,
        /// Value held in the cached tally.
        cached: Option<u32>,
    },
    /// The log could not be replayed at all.
    Replay {
        /// Why the replay failed.
        reason: String,
    },
}

/// A mismatch between the cached tally and the play log.
///
/// This is the tracker's integrity alert: the tally is supposed to be a
/// pure projection of the log, so any discrepancy means a mutation path
/// bypassed the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyAnomaly {
    /// Number of plays in the log at the time of the check.
    pub plays: usize,
    /// Every field that disagreed.
    pub discrepancies: Vec<Discrepancy>,
    /// Human-readable description of the anomaly.
    pub message: String,
}

impl core::fmt::Display for TallyAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}
