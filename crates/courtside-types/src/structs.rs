//! Core data structs for the Courtside tracker.
//!
//! These are plain data: players, score events, the aggregate tally, and
//! the report projections served to the dashboard. Behaviour (validation,
//! aggregation, undo/redo) lives in `courtside-ledger` and
//! `courtside-core`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{GamePhase, Quarter, QuarterStatus, ScoreValue, Team};
use crate::ids::EventId;

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A player on the tracked team's roster, identified by name.
///
/// Names are compared exactly (case-sensitive) after the roster intake has
/// trimmed surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct Player(String);

impl Player {
    /// Create a player from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The player's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Player {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Player {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for Player {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl core::borrow::Borrow<str> for Player {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Score event
// ---------------------------------------------------------------------------

/// A single scoring play in the play log.
///
/// The `lineup` is a value copy of the five players on court when the play
/// was recorded. Later substitutions never touch it, so plus/minus is
/// always attributed to the players who were actually on the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ScoreEvent {
    /// Unique event identifier.
    pub id: EventId,
    /// Quarter in which the play happened.
    pub quarter: Quarter,
    /// Team that scored.
    pub team: Team,
    /// Point value of the play.
    #[ts(as = "u8")]
    pub points: ScoreValue,
    /// The tracked team's lineup at the moment of the play.
    pub lineup: Vec<Player>,
    /// Wall-clock time the play was first recorded.
    pub recorded_at: DateTime<Utc>,
}

impl ScoreEvent {
    /// Whether `player` was on court for this play.
    pub fn involves(&self, player: &str) -> bool {
        self.lineup.iter().any(|p| p.as_str() == player)
    }
}

// ---------------------------------------------------------------------------
// Tally (aggregate state)
// ---------------------------------------------------------------------------

/// The aggregate state derived from the play log.
///
/// A tally is a cached projection: it must always equal the fold of the
/// applied score events over the all-zero tally for the roster. Every
/// roster player has an entry in both maps from the start of the game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Tally {
    /// Points scored by the tracked team.
    pub team_score: u32,
    /// Points scored by the opponent.
    pub opponent_score: u32,
    /// Cumulative point differential per player while on court.
    pub plus_minus: BTreeMap<Player, i32>,
    /// Number of score events each player was on court for.
    pub possessions_played: BTreeMap<Player, u32>,
}

impl Tally {
    /// Create the all-zero tally for the given players.
    ///
    /// Repeated names collapse into a single entry.
    pub fn for_players<'a>(players: impl IntoIterator<Item = &'a Player>) -> Self {
        let mut tally = Self::default();
        for player in players {
            tally.plus_minus.insert(player.clone(), 0);
            tally.possessions_played.insert(player.clone(), 0);
        }
        tally
    }

    /// Plus/minus for a player, or `None` if the player is not tracked.
    pub fn plus_minus_of(&self, player: &str) -> Option<i32> {
        self.plus_minus.get(player).copied()
    }

    /// Possessions played for a player, or `None` if the player is not tracked.
    pub fn possessions_of(&self, player: &str) -> Option<u32> {
        self.possessions_played.get(player).copied()
    }
}

// ---------------------------------------------------------------------------
// Report projections
// ---------------------------------------------------------------------------

/// One row of the end-of-game player report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BoxScoreRow {
    /// The player.
    pub player: Player,
    /// Final plus/minus.
    pub plus_minus: i32,
    /// Possessions played.
    pub possessions_played: u32,
}

/// One line of the play-by-play log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayByPlayEntry {
    /// 1-based position in the play log.
    pub index: u32,
    /// Quarter of the play.
    pub quarter: Quarter,
    /// Team that scored.
    pub team: Team,
    /// Points scored.
    pub points: u8,
    /// Lineup on court for the play.
    pub lineup: Vec<Player>,
}

/// Result of completing a quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuarterProgress {
    /// The quarter now in progress (stays `Q4` once the game is final).
    pub current_quarter: Quarter,
    /// Whether the game has reached the final phase.
    pub is_final: bool,
}

/// Status of one quarter on the progression board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuarterBoardEntry {
    /// The quarter.
    pub quarter: Quarter,
    /// Its display status.
    pub status: QuarterStatus,
}

/// Live scoreboard summary pushed to dashboard clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Scoreboard {
    /// Tracked team's display name.
    pub own_team: String,
    /// Opponent's display name.
    pub opponent_team: String,
    /// Tracked team's score.
    pub team_score: u32,
    /// Opponent's score.
    pub opponent_score: u32,
    /// Quarter in progress.
    pub current_quarter: Quarter,
    /// Current game phase.
    pub phase: GamePhase,
    /// Players currently on court (empty before the starting lineup is set).
    pub lineup: Vec<Player>,
    /// Number of plays in the log.
    pub plays_logged: u32,
    /// Number of undone plays available to redo.
    pub redo_available: u32,
}
