//! Shared type definitions for the Courtside plus/minus tracker.
//!
//! This crate is the single source of truth for the data that flows between
//! the play ledger, the game session, and the observer API. Types defined
//! here flow downstream to `TypeScript` via `ts-rs` for the dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for events and games
//! - [`enums`] -- Teams, quarters, score values, and game phase
//! - [`structs`] -- Players, score events, the aggregate tally, and report rows

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{GamePhase, InvalidScoreValue, Quarter, QuarterStatus, ScoreValue, Team};
pub use ids::{EventId, GameId};
pub use structs::{
    BoxScoreRow, PlayByPlayEntry, Player, QuarterBoardEntry, QuarterProgress, ScoreEvent,
    Scoreboard, Tally,
};

/// Number of players on court for one team.
pub const LINEUP_SIZE: usize = 5;

/// Most players a roster may carry for one game.
pub const MAX_ROSTER_SIZE: usize = 15;
