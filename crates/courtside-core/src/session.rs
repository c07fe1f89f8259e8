//! The game session: one game's roster, lineup, play ledger, and quarters.
//!
//! [`GameSession`] is the only entry point for changing game state. Each
//! operation is a single synchronous transaction: it either commits fully
//! or returns an error and leaves the session exactly as it was.
//!
//! # Phases
//!
//! ```text
//! Setup --set_starting_lineup--> Match --complete_quarter(Q4)--> Final
//! ```
//!
//! In `Final` every mutation is refused with [`SessionError::GameOver`],
//! except [`GameSession::complete_quarter`], which stays a harmless no-op.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use courtside_ledger::{LedgerError, PlayLedger, ProjectionResult};
use courtside_types::{
    GameId, GamePhase, Player, Quarter, QuarterProgress, ScoreEvent, ScoreValue, Tally, Team,
};

use crate::config::RosterConfig;
use crate::quarter::QuarterTracker;
use crate::roster::{Lineup, LineupError, Roster, RosterError, SubstitutionError};

/// Errors returned by session operations. None of them are fatal; the
/// session is unchanged and the caller may retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The roster could not be taken in.
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// The starting lineup was rejected.
    #[error(transparent)]
    Lineup(#[from] LineupError),

    /// A substitution was rejected.
    #[error(transparent)]
    Substitution(#[from] SubstitutionError),

    /// The play ledger refused the operation (empty undo/redo, bad event).
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The operation needs a starting lineup first.
    #[error("the starting lineup has not been set")]
    LineupNotSet,

    /// The starting lineup can only be chosen once.
    #[error("the starting lineup has already been set")]
    LineupAlreadySet,

    /// The game is final.
    #[error("the game is over")]
    GameOver,
}

/// A single game in progress.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: GameId,
    own_team: String,
    opponent_team: String,
    roster: Roster,
    lineup: Option<Lineup>,
    ledger: PlayLedger,
    quarters: QuarterTracker,
    started_at: DateTime<Utc>,
}

impl GameSession {
    /// Start a game: validate the roster and zero every player's stats.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Roster`] if the roster is rejected.
    pub fn start<I, S>(
        own_team: impl Into<String>,
        opponent_team: impl Into<String>,
        names: I,
        config: &RosterConfig,
    ) -> Result<Self, SessionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roster = Roster::from_names(names, config)?;
        let ledger = PlayLedger::new(roster.players());
        let session = Self {
            id: GameId::new(),
            own_team: own_team.into(),
            opponent_team: opponent_team.into(),
            roster,
            lineup: None,
            ledger,
            quarters: QuarterTracker::new(),
            started_at: Utc::now(),
        };

        info!(
            game = %session.id,
            own_team = %session.own_team,
            opponent_team = %session.opponent_team,
            players = session.roster.len(),
            "Game started"
        );
        Ok(session)
    }

    /// Choose the starting five. Allowed once, before any play.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::LineupAlreadySet`] on a second call, or
    /// [`SessionError::Lineup`] if the players are not five distinct
    /// roster members.
    pub fn set_starting_lineup(&mut self, players: &[Player]) -> Result<&Lineup, SessionError> {
        if self.lineup.is_some() {
            return Err(SessionError::LineupAlreadySet);
        }
        let lineup = Lineup::select(&self.roster, players)?;

        info!(game = %self.id, lineup = ?lineup.players(), "Starting lineup set");
        Ok(self.lineup.insert(lineup))
    }

    /// Log a score by either team, attributed to the lineup on court in the
    /// current quarter. Discards any redo history.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::GameOver`] once final,
    /// [`SessionError::LineupNotSet`] before the starting lineup, or
    /// [`SessionError::Ledger`] if the ledger rejects the play.
    pub fn record_score(&mut self, team: Team, points: ScoreValue) -> Result<&Tally, SessionError> {
        self.ensure_live()?;
        let lineup = self.lineup.as_ref().ok_or(SessionError::LineupNotSet)?;
        let quarter = self.quarters.current();

        let event = self
            .ledger
            .record_score(quarter, team, points, lineup.players())?;
        debug!(
            game = %self.id,
            event = %event.id,
            quarter = %quarter,
            team = %team,
            points = points.points(),
            "Score recorded"
        );

        self.audit();
        Ok(self.ledger.tally())
    }

    /// Remove the most recent play and reverse its effect.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::GameOver`] once final, or
    /// [`SessionError::Ledger`] wrapping [`LedgerError::EmptyLog`] if there
    /// is nothing to undo.
    pub fn undo_last(&mut self) -> Result<&Tally, SessionError> {
        self.ensure_live()?;
        let event = self.ledger.undo()?;
        debug!(game = %self.id, event = %event.id, team = %event.team, "Play undone");

        self.audit();
        Ok(self.ledger.tally())
    }

    /// Restore the most recently undone play with the lineup stored on it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::GameOver`] once final, or
    /// [`SessionError::Ledger`] wrapping [`LedgerError::EmptyRedo`] if
    /// nothing has been undone.
    pub fn redo_last(&mut self) -> Result<&Tally, SessionError> {
        self.ensure_live()?;
        let event = self.ledger.redo()?;
        debug!(game = %self.id, event = %event.id, team = %event.team, "Play redone");

        self.audit();
        Ok(self.ledger.tally())
    }

    /// Swap `outgoing[i]` for `incoming[i]` on court. All-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::GameOver`] once final,
    /// [`SessionError::LineupNotSet`] before the starting lineup, or
    /// [`SessionError::Substitution`] if the swap is invalid.
    pub fn substitute(
        &mut self,
        outgoing: &[Player],
        incoming: &[Player],
    ) -> Result<&Lineup, SessionError> {
        self.ensure_live()?;
        let current = self.lineup.as_ref().ok_or(SessionError::LineupNotSet)?;
        let next = current.substitute(&self.roster, outgoing, incoming)?;

        if !outgoing.is_empty() {
            info!(
                game = %self.id,
                outgoing = ?outgoing,
                incoming = ?incoming,
                "Substitution made"
            );
        }
        Ok(self.lineup.insert(next))
    }

    /// Complete the current quarter and advance to the next.
    ///
    /// Completing `Q4` ends the game. Once final, this returns
    /// `{Q4, is_final: true}` without changing anything.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::LineupNotSet`] if called during setup.
    pub fn complete_quarter(&mut self) -> Result<QuarterProgress, SessionError> {
        if self.quarters.is_final() {
            return Ok(self.quarters.progress());
        }
        if self.lineup.is_none() {
            return Err(SessionError::LineupNotSet);
        }

        let finished = self.quarters.current();
        let progress = self.quarters.complete();
        if progress.is_final {
            info!(
                game = %self.id,
                team_score = self.ledger.tally().team_score,
                opponent_score = self.ledger.tally().opponent_score,
                plays = self.ledger.len(),
                "Game final"
            );
        } else {
            info!(
                game = %self.id,
                finished = %finished,
                current = %progress.current_quarter,
                "Quarter completed"
            );
        }
        Ok(progress)
    }

    /// Check the cached tally against the play log: possession counts
    /// first, then a full replay.
    pub fn verify(&self) -> ProjectionResult {
        self.ledger.verify_projection(self.roster.distinct())
    }

    /// Session identifier.
    pub const fn id(&self) -> GameId {
        self.id
    }

    /// Tracked team's name.
    pub fn own_team(&self) -> &str {
        &self.own_team
    }

    /// Opponent's name.
    pub fn opponent_team(&self) -> &str {
        &self.opponent_team
    }

    /// When the game was started.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The roster.
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The lineup on court, if chosen.
    pub const fn lineup(&self) -> Option<&Lineup> {
        self.lineup.as_ref()
    }

    /// The play ledger.
    pub const fn ledger(&self) -> &PlayLedger {
        &self.ledger
    }

    /// The cached aggregate tally.
    pub const fn tally(&self) -> &Tally {
        self.ledger.tally()
    }

    /// The applied plays, oldest first.
    pub fn plays(&self) -> &[ScoreEvent] {
        self.ledger.events()
    }

    /// Quarter progression state.
    pub const fn quarters(&self) -> &QuarterTracker {
        &self.quarters
    }

    /// Quarter in progress.
    pub const fn current_quarter(&self) -> Quarter {
        self.quarters.current()
    }

    /// Lifecycle phase.
    pub const fn phase(&self) -> GamePhase {
        if self.quarters.is_final() {
            GamePhase::Final
        } else if self.lineup.is_some() {
            GamePhase::Match
        } else {
            GamePhase::Setup
        }
    }

    const fn ensure_live(&self) -> Result<(), SessionError> {
        if self.quarters.is_final() {
            Err(SessionError::GameOver)
        } else {
            Ok(())
        }
    }

    /// Debug builds replay the log after every mutation.
    fn audit(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        if let ProjectionResult::Anomaly(anomaly) = self.verify() {
            error!(game = %self.id, discrepancies = ?anomaly.discrepancies, "{anomaly}");
        }
    }
}
