//! Read-only projections of a game session: box score, play-by-play, and
//! the live scoreboard.

use courtside_types::{
    BoxScoreRow, PlayByPlayEntry, Player, QuarterBoardEntry, Scoreboard, Team,
};

use crate::session::GameSession;

impl GameSession {
    /// One row per distinct roster name, in roster order.
    pub fn export_report(&self) -> Vec<BoxScoreRow> {
        let tally = self.tally();
        self.roster()
            .distinct()
            .into_iter()
            .map(|player| BoxScoreRow {
                player: player.clone(),
                plus_minus: tally.plus_minus_of(player.as_str()).unwrap_or_default(),
                possessions_played: tally.possessions_of(player.as_str()).unwrap_or_default(),
            })
            .collect()
    }

    /// The applied plays, numbered from 1. Undone plays are not listed.
    pub fn play_by_play(&self) -> Vec<PlayByPlayEntry> {
        self.plays()
            .iter()
            .zip(1_u32..)
            .map(|(event, index)| PlayByPlayEntry {
                index,
                quarter: event.quarter,
                team: event.team,
                points: event.points.points(),
                lineup: event.lineup.clone(),
            })
            .collect()
    }

    /// Status of every quarter, in playing order.
    pub fn quarter_board(&self) -> Vec<QuarterBoardEntry> {
        self.quarters().board()
    }

    /// Live summary for dashboards.
    pub fn scoreboard(&self) -> Scoreboard {
        let tally = self.tally();
        Scoreboard {
            own_team: self.own_team().to_owned(),
            opponent_team: self.opponent_team().to_owned(),
            team_score: tally.team_score,
            opponent_score: tally.opponent_score,
            current_quarter: self.current_quarter(),
            phase: self.phase(),
            lineup: self
                .lineup()
                .map(|lineup| lineup.players().to_vec())
                .unwrap_or_default(),
            plays_logged: saturating_u32(self.ledger().len()),
            redo_available: saturating_u32(self.ledger().redo_len()),
        }
    }

    /// Name shown for `team` in this game.
    pub fn team_name(&self, team: Team) -> &str {
        match team {
            Team::Own => self.own_team(),
            Team::Opponent => self.opponent_team(),
        }
    }

    /// A play-by-play entry as one line of text, e.g.
    /// `3. [Q2] Wildcats +2 | Lineup: A, B, C, D, E`.
    pub fn play_line(&self, entry: &PlayByPlayEntry) -> String {
        let lineup: Vec<&str> = entry.lineup.iter().map(Player::as_str).collect();
        format!(
            "{}. [{}] {} +{} | Lineup: {}",
            entry.index,
            entry.quarter,
            self.team_name(entry.team),
            entry.points,
            lineup.join(", ")
        )
    }
}

/// Plus/minus with an explicit sign for positive values (`+3`, `0`, `-2`).
pub fn signed(value: i32) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
