//! Score event builder and validation.
//!
//! Provides a [`ScoreEventBuilder`] that enforces the shape of a play
//! before it can reach the log: quarter, team, and points must be set, and
//! the lineup snapshot must be exactly five distinct players. The builder
//! copies the lineup it is given, so the event never aliases the live
//! lineup of the session.

use std::collections::BTreeSet;

use chrono::Utc;

use courtside_types::{EventId, LINEUP_SIZE, Player, Quarter, ScoreEvent, ScoreValue, Team};

use crate::LedgerError;

// ---------------------------------------------------------------------------
// Score event builder
// ---------------------------------------------------------------------------

/// Builder for constructing validated [`ScoreEvent`] values.
///
/// # Examples
///
/// ```
/// use courtside_ledger::ScoreEventBuilder;
/// use courtside_types::{Player, Quarter, ScoreValue, Team};
///
/// let lineup: Vec<Player> = ["A", "B", "C", "D", "E"].into_iter().map(Player::from).collect();
/// let event = ScoreEventBuilder::new()
///     .quarter(Quarter::Q2)
///     .team(Team::Opponent)
///     .points(ScoreValue::ThreePointer)
///     .lineup(&lineup)
///     .build();
///
/// assert!(event.is_ok());
/// ```
#[derive(Debug, Default)]
pub struct ScoreEventBuilder {
    quarter: Option<Quarter>,
    team: Option<Team>,
    points: Option<ScoreValue>,
    lineup: Option<Vec<Player>>,
}

impl ScoreEventBuilder {
    /// Start building a score event.
    pub const fn new() -> Self {
        Self {
            quarter: None,
            team: None,
            points: None,
            lineup: None,
        }
    }

    /// Set the quarter the play happened in.
    #[must_use]
    pub const fn quarter(mut self, quarter: Quarter) -> Self {
        self.quarter = Some(quarter);
        self
    }

    /// Set the team that scored.
    #[must_use]
    pub const fn team(mut self, team: Team) -> Self {
        self.team = Some(team);
        self
    }

    /// Set the point value of the play.
    #[must_use]
    pub const fn points(mut self, points: ScoreValue) -> Self {
        self.points = Some(points);
        self
    }

    /// Snapshot the lineup on court. The players are copied.
    #[must_use]
    pub fn lineup(mut self, lineup: &[Player]) -> Self {
        self.lineup = Some(lineup.to_vec());
        self
    }

    /// Validate inputs and produce a [`ScoreEvent`].
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MissingField`] if a field was not set.
    /// Returns [`LedgerError::LineupSize`] if the lineup is not five players.
    /// Returns [`LedgerError::DuplicateInLineup`] if a player appears twice.
    pub fn build(self) -> Result<ScoreEvent, LedgerError> {
        let quarter = self.quarter.ok_or(LedgerError::MissingField("quarter"))?;
        let team = self.team.ok_or(LedgerError::MissingField("team"))?;
        let points = self.points.ok_or(LedgerError::MissingField("points"))?;
        let lineup = self.lineup.ok_or(LedgerError::MissingField("lineup"))?;

        validate_lineup(&lineup)?;

        Ok(ScoreEvent {
            id: EventId::new(),
            quarter,
            team,
            points,
            lineup,
            recorded_at: Utc::now(),
        })
    }
}

/// Check that a lineup snapshot is exactly five distinct players.
pub(crate) fn validate_lineup(lineup: &[Player]) -> Result<(), LedgerError> {
    if lineup.len() != LINEUP_SIZE {
        return Err(LedgerError::LineupSize {
            expected: LINEUP_SIZE,
            actual: lineup.len(),
        });
    }

    let mut seen = BTreeSet::new();
    for player in lineup {
        if !seen.insert(player.as_str()) {
            return Err(LedgerError::DuplicateInLineup {
                player: player.clone(),
            });
        }
    }

    Ok(())
}
