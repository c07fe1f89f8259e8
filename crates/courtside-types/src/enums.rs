//! Enumeration types for the Courtside tracker.
//!
//! Teams, quarters, score values, and the coarse game phase. All of them
//! are `Copy` and serialize to short, stable strings (or numbers, for
//! [`ScoreValue`]) so the dashboard can send them back verbatim.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// Which side of the scoreboard a score event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Team {
    /// The tracked team, whose players carry plus/minus.
    Own,
    /// The opposing team.
    Opponent,
}

impl core::fmt::Display for Team {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Own => write!(f, "Team"),
            Self::Opponent => write!(f, "Opponent"),
        }
    }
}

// ---------------------------------------------------------------------------
// Quarter
// ---------------------------------------------------------------------------

/// One of the four regulation quarters.
///
/// Quarters progress in the fixed order `Q1 -> Q2 -> Q3 -> Q4`. There is
/// no overtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Quarter {
    /// First quarter.
    Q1,
    /// Second quarter.
    Q2,
    /// Third quarter.
    Q3,
    /// Fourth (last) quarter.
    Q4,
}

impl Quarter {
    /// All quarters in playing order.
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// The quarter that follows this one, or `None` after `Q4`.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Q1 => Some(Self::Q2),
            Self::Q2 => Some(Self::Q3),
            Self::Q3 => Some(Self::Q4),
            Self::Q4 => None,
        }
    }

    /// Short display label (`"Q1"` .. `"Q4"`).
    pub const fn label(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }
}

impl core::fmt::Display for Quarter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Score value
// ---------------------------------------------------------------------------

/// The point value of a single scoring play.
///
/// Serialized as the bare number of points (`1`, `2`, or `3`). Any other
/// number is rejected at deserialization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ScoreValue {
    /// A made free throw (1 point).
    FreeThrow,
    /// A two-point field goal.
    TwoPointer,
    /// A three-point field goal.
    ThreePointer,
}

impl ScoreValue {
    /// Number of points this play is worth.
    pub const fn points(self) -> u8 {
        match self {
            Self::FreeThrow => 1,
            Self::TwoPointer => 2,
            Self::ThreePointer => 3,
        }
    }
}

/// Error returned when a number is not a legal score value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidScoreValue(pub u8);

impl core::fmt::Display for InvalidScoreValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "invalid score value {}: points must be 1, 2, or 3", self.0)
    }
}

impl std::error::Error for InvalidScoreValue {}

impl TryFrom<u8> for ScoreValue {
    type Error = InvalidScoreValue;

    fn try_from(points: u8) -> Result<Self, Self::Error> {
        match points {
            1 => Ok(Self::FreeThrow),
            2 => Ok(Self::TwoPointer),
            3 => Ok(Self::ThreePointer),
            other => Err(InvalidScoreValue(other)),
        }
    }
}

impl From<ScoreValue> for u8 {
    fn from(value: ScoreValue) -> Self {
        value.points()
    }
}

impl core::fmt::Display for ScoreValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "+{}", self.points())
    }
}

// ---------------------------------------------------------------------------
// Game phase
// ---------------------------------------------------------------------------

/// Coarse lifecycle of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GamePhase {
    /// Roster accepted, starting lineup not chosen yet.
    Setup,
    /// Play is being logged.
    Match,
    /// The fourth quarter has been completed. Terminal.
    Final,
}

/// Display status of a quarter on the progression board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum QuarterStatus {
    /// The quarter currently being played.
    InProgress,
    /// The quarter has been marked complete.
    Completed,
    /// The quarter has not been reached yet.
    Locked,
}
