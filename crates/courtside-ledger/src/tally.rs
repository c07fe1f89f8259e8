//! Forward and inverse application of score events to a [`Tally`].
//!
//! A forward application of an event `e` worth `n` points:
//!
//! | Team | Score | Each player in `e.lineup` |
//! |------|-------|---------------------------|
//! | Own | `team_score += n` | `plus_minus += n`, `possessions += 1` |
//! | Opponent | `opponent_score += n` | `plus_minus -= n`, `possessions += 1` |
//!
//! The inverse subtracts exactly what the forward step added. Both
//! directions compute a fresh tally and only return it if every step
//! succeeded, so callers commit all-or-nothing.

use courtside_types::{Player, ScoreEvent, Tally, Team};

use crate::LedgerError;

/// Which way an event is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Apply the event (record or redo).
    Forward,
    /// Remove the event's effect (undo).
    Inverse,
}

/// Return `tally` with `event` applied forward.
///
/// # Errors
///
/// Returns [`LedgerError::UnknownPlayer`] if the event's lineup names a
/// player the tally does not track, or [`LedgerError::Overflow`] if a
/// counter would leave its range. `tally` itself is never modified.
pub fn applied(tally: &Tally, event: &ScoreEvent) -> Result<Tally, LedgerError> {
    step(tally, event, Direction::Forward)
}

/// Return `tally` with the effect of `event` removed.
///
/// # Errors
///
/// Same as [`applied`]. An inverse on a tally that never had the event
/// applied can underflow, which is reported as [`LedgerError::Overflow`].
pub fn reverted(tally: &Tally, event: &ScoreEvent) -> Result<Tally, LedgerError> {
    step(tally, event, Direction::Inverse)
}

/// Fold `events` in order over the all-zero tally for `players`.
///
/// # Errors
///
/// Returns the first error raised by [`applied`].
pub fn replay<'a>(
    players: impl IntoIterator<Item = &'a Player>,
    events: &[ScoreEvent],
) -> Result<Tally, LedgerError> {
    events
        .iter()
        .try_fold(Tally::for_players(players), |acc, event| applied(&acc, event))
}

fn step(tally: &Tally, event: &ScoreEvent, direction: Direction) -> Result<Tally, LedgerError> {
    let points = u32::from(event.points.points());
    let swing = i32::from(event.points.points());
    let mut next = tally.clone();

    let (score, field) = match event.team {
        Team::Own => (&mut next.team_score, "team_score"),
        Team::Opponent => (&mut next.opponent_score, "opponent_score"),
    };
    *score = match direction {
        Direction::Forward => score.checked_add(points),
        Direction::Inverse => score.checked_sub(points),
    }
    .ok_or(LedgerError::Overflow { field })?;

    // Own scores credit the players on court; opponent scores debit them.
    let credit = matches!(
        (event.team, direction),
        (Team::Own, Direction::Forward) | (Team::Opponent, Direction::Inverse)
    );

    for player in &event.lineup {
        let plus_minus = next
            .plus_minus
            .get_mut(player)
            .ok_or_else(|| LedgerError::UnknownPlayer {
                player: player.clone(),
            })?;
        *plus_minus = if credit {
            plus_minus.checked_add(swing)
        } else {
            plus_minus.checked_sub(swing)
        }
        .ok_or(LedgerError::Overflow {
            field: "plus_minus",
        })?;

        let possessions = next
            .possessions_played
            .get_mut(player)
            .ok_or_else(|| LedgerError::UnknownPlayer {
                player: player.clone(),
            })?;
        *possessions = match direction {
            Direction::Forward => possessions.checked_add(1),
            Direction::Inverse => possessions.checked_sub(1),
        }
        .ok_or(LedgerError::Overflow {
            field: "possessions_played",
        })?;
    }

    Ok(next)
}
