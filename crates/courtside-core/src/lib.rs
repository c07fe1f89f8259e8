//! Game session, roster, quarter progression, and configuration for the
//! Courtside plus/minus tracker.
//!
//! This crate owns the rules of a game: who is on the roster, who is on
//! court, which quarter is being played, and when the game is over. Every
//! scoring play goes through the [`PlayLedger`] from `courtside-ledger`,
//! which keeps the tally and the undo/redo history.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `courtside-config.yaml` into
//!   strongly-typed structs.
//! - [`roster`] -- Roster intake, lineup selection, and substitutions.
//! - [`quarter`] -- Quarter progression and the terminal final phase.
//! - [`session`] -- [`GameSession`], the entry point for every operation.
//! - [`report`] -- Box score, play-by-play, and scoreboard projections.
//!
//! [`PlayLedger`]: courtside_ledger::PlayLedger
//! [`GameSession`]: session::GameSession

pub mod config;
pub mod quarter;
pub mod report;
pub mod roster;
pub mod session;

pub use config::CourtsideConfig;
pub use session::{GameSession, SessionError};
