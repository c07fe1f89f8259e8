//! The play ledger: applied log, redo stack, and cached tally.
//!
//! The [`PlayLedger`] owns three pieces of state that only ever change
//! together:
//!
//! - the **applied log**, every play currently counted, oldest first;
//! - the **redo stack**, plays removed by undo, most recently undone last;
//! - the **tally**, the aggregate projection of the applied log.
//!
//! # Design
//!
//! - **Log is the truth**: the tally is a cache and can be rebuilt by
//!   [`PlayLedger::verify_projection`] at any time.
//! - **All-or-nothing**: every mutation computes the next tally first and
//!   commits only if it succeeded, so a failed call leaves no trace.
//! - **Snapshot replay**: redo re-applies the lineup stored on the event,
//!   never the lineup on court at the time of redo.
//! - **Linear history**: recording a new play discards the redo stack.

use courtside_types::{Player, Quarter, ScoreEvent, ScoreValue, Tally, Team};

use crate::reconcile::{ProjectionResult, verify_possessions, verify_projection};
use crate::tally::{applied, reverted};
use crate::transaction::validate_lineup;
use crate::{LedgerError, ScoreEventBuilder};

// ---------------------------------------------------------------------------
// PlayLedger
// ---------------------------------------------------------------------------

/// Event-sourced record of a game's scoring plays with undo/redo.
#[derive(Debug, Clone, Default)]
pub struct PlayLedger {
    /// Plays currently counted, in insertion order.
    applied: Vec<ScoreEvent>,
    /// Undone plays; the last element is the next to redo.
    undone: Vec<ScoreEvent>,
    /// Cached projection of `applied`.
    tally: Tally,
}

impl PlayLedger {
    /// Create an empty ledger tracking the given players.
    ///
    /// Every player starts with plus/minus 0 and zero possessions.
    pub fn new<'a>(players: impl IntoIterator<Item = &'a Player>) -> Self {
        Self {
            applied: Vec::new(),
            undone: Vec::new(),
            tally: Tally::for_players(players),
        }
    }

    /// Number of plays in the applied log.
    pub const fn len(&self) -> usize {
        self.applied.len()
    }

    /// Whether the applied log is empty.
    pub const fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    /// Number of undone plays available to redo.
    pub const fn redo_len(&self) -> usize {
        self.undone.len()
    }

    /// Whether [`undo`](Self::undo) would succeed.
    pub const fn can_undo(&self) -> bool {
        !self.applied.is_empty()
    }

    /// Whether [`redo`](Self::redo) would succeed.
    pub const fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// The cached aggregate tally.
    pub const fn tally(&self) -> &Tally {
        &self.tally
    }

    /// The applied log, oldest first.
    pub fn events(&self) -> &[ScoreEvent] {
        &self.applied
    }

    /// Append a pre-built event, apply it, and clear the redo stack.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the event's lineup is malformed or names a
    /// player the ledger does not track. The ledger is unchanged on error.
    pub fn record(&mut self, event: ScoreEvent) -> Result<&ScoreEvent, LedgerError> {
        validate_lineup(&event.lineup)?;
        let next = applied(&self.tally, &event)?;

        if !self.undone.is_empty() {
            tracing::debug!(
                discarded = self.undone.len(),
                "New play recorded, redo history discarded"
            );
            self.undone.clear();
        }
        self.tally = next;
        self.applied.push(event);

        self.applied.last().ok_or(LedgerError::InternalError(
            "failed to retrieve play after append",
        ))
    }

    /// Build a score event from the current lineup and record it.
    ///
    /// The lineup is copied into the event; later changes to the caller's
    /// lineup do not affect it.
    ///
    /// # Errors
    ///
    /// Same as [`record`](Self::record).
    pub fn record_score(
        &mut self,
        quarter: Quarter,
        team: Team,
        points: ScoreValue,
        lineup: &[Player],
    ) -> Result<&ScoreEvent, LedgerError> {
        let event = ScoreEventBuilder::new()
            .quarter(quarter)
            .team(team)
            .points(points)
            .lineup(lineup)
            .build()?;
        self.record(event)
    }

    /// Remove the most recent play and reverse its effect on the tally.
    ///
    /// The play moves to the redo stack.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EmptyLog`] if there is nothing to undo.
    pub fn undo(&mut self) -> Result<&ScoreEvent, LedgerError> {
        let last = self.applied.last().ok_or(LedgerError::EmptyLog)?;
        let next = reverted(&self.tally, last)?;

        let event = self
            .applied
            .pop()
            .ok_or(LedgerError::InternalError("applied log emptied during undo"))?;
        self.tally = next;
        self.undone.push(event);

        self.undone.last().ok_or(LedgerError::InternalError(
            "failed to retrieve play after undo",
        ))
    }

    /// Restore the most recently undone play using its stored lineup.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EmptyRedo`] if no undone plays are available.
    pub fn redo(&mut self) -> Result<&ScoreEvent, LedgerError> {
        let last = self.undone.last().ok_or(LedgerError::EmptyRedo)?;
        let next = applied(&self.tally, last)?;

        let event = self
            .undone
            .pop()
            .ok_or(LedgerError::InternalError("redo stack emptied during redo"))?;
        self.tally = next;
        self.applied.push(event);

        self.applied.last().ok_or(LedgerError::InternalError(
            "failed to retrieve play after redo",
        ))
    }

    /// Check the cached tally against the applied log.
    ///
    /// Possession counts are compared with lineup membership first; if
    /// they hold, the log is replayed over a zero tally for `players` and
    /// diffed field by field.
    pub fn verify_projection<'a>(
        &self,
        players: impl IntoIterator<Item = &'a Player>,
    ) -> ProjectionResult {
        match verify_possessions(&self.applied, &self.tally) {
            ProjectionResult::Consistent => verify_projection(players, &self.applied, &self.tally),
            anomaly @ ProjectionResult::Anomaly(_) => anomaly,
        }
    }
}
