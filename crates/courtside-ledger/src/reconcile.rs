//! Projection verification for the play ledger.
//!
//! The cached tally must always equal the replay of the applied log:
//!
//! ```text
//! fold(apply, zero_tally(roster), applied_log) == cached_tally
//! ```
//!
//! Incremental updates guarantee this by construction. The check here
//! recomputes the projection from scratch and reports every field that
//! disagrees, so a bug in a mutation path surfaces as a [`TallyAnomaly`]
//! instead of a silently wrong report.

use std::collections::BTreeSet;

use serde::Serialize;

use courtside_types::{Player, ScoreEvent, Tally};

use crate::tally::replay;
use crate::{Discrepancy, TallyAnomaly};

/// The result of comparing the cached tally with a replay of the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProjectionResult {
    /// The cached tally equals the replay.
    Consistent,
    /// One or more fields disagree.
    Anomaly(TallyAnomaly),
}

impl ProjectionResult {
    /// Whether the projection held.
    pub const fn is_consistent(&self) -> bool {
        matches!(self, Self::Consistent)
    }
}

/// Replay `events` over the zero tally for `players` and diff it against
/// `cached`.
pub fn verify_projection<'a>(
    players: impl IntoIterator<Item = &'a Player>,
    events: &[ScoreEvent],
    cached: &Tally,
) -> ProjectionResult {
    let expected = match replay(players, events) {
        Ok(tally) => tally,
        Err(err) => {
            return anomaly(
                events.len(),
                vec![Discrepancy::Replay {
                    reason: err.to_string(),
                }],
            );
        }
    };

    let discrepancies = diff(&expected, cached);
    if discrepancies.is_empty() {
        ProjectionResult::Consistent
    } else {
        anomaly(events.len(), discrepancies)
    }
}

/// Check that each player's possessions played equals the number of
/// events whose lineup includes them.
///
/// This is a narrower check than [`verify_projection`] that needs no
/// roster: only players present in `cached` are examined.
pub fn verify_possessions(events: &[ScoreEvent], cached: &Tally) -> ProjectionResult {
    let mut discrepancies = Vec::new();

    for (player, &count) in &cached.possessions_played {
        let on_court = events
            .iter()
            .filter(|e| e.involves(player.as_str()))
            .count();
        let expected = u32::try_from(on_court).ok();
        if expected != Some(count) {
            discrepancies.push(Discrepancy::PossessionsPlayed {
                player: player.clone(),
                expected,
                cached: Some(count),
            });
        }
    }

    if discrepancies.is_empty() {
        ProjectionResult::Consistent
    } else {
        anomaly(events.len(), discrepancies)
    }
}

fn diff(expected: &Tally, cached: &Tally) -> Vec<Discrepancy> {
    let mut out = Vec::new();

    if expected.team_score != cached.team_score {
        out.push(Discrepancy::TeamScore {
            expected: expected.team_score,
            cached: cached.team_score,
        });
    }
    if expected.opponent_score != cached.opponent_score {
        out.push(Discrepancy::OpponentScore {
            expected: expected.opponent_score,
            cached: cached.opponent_score,
        });
    }

    let players: BTreeSet<&Player> = expected
        .plus_minus
        .keys()
        .chain(cached.plus_minus.keys())
        .chain(expected.possessions_played.keys())
        .chain(cached.possessions_played.keys())
        .collect();

    for player in players {
        let name = player.as_str();

        let (want, have) = (expected.plus_minus_of(name), cached.plus_minus_of(name));
        if want != have {
            out.push(Discrepancy::PlusMinus {
                player: player.clone(),
                expected: want,
                cached: have,
            });
        }

        let (want, have) = (expected.possessions_of(name), cached.possessions_of(name));
        if want != have {
            out.push(Discrepancy::PossessionsPlayed {
                player: player.clone(),
                expected: want,
                cached: have,
            });
        }
    }

    out
}

fn anomaly(plays: usize, discrepancies: Vec<Discrepancy>) -> ProjectionResult {
    let count = discrepancies.len();
    ProjectionResult::Anomaly(TallyAnomaly {
        plays,
        discrepancies,
        message: format!(
            "TALLY_ANOMALY after {plays} play(s): {count} field(s) disagree with the play log",
        ),
    })
}
