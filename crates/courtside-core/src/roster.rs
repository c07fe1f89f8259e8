//! Roster intake, lineup selection, and substitutions.
//!
//! The [`Roster`] is fixed once a game starts. The [`Lineup`] is the five
//! players on court; it is chosen once and afterwards changes only through
//! [`Lineup::substitute`], which swaps equal numbers of players in and out.
//!
//! Both lineup operations return a new value instead of mutating in place,
//! so a rejected request can never leave a half-applied lineup behind.

use std::collections::BTreeSet;

use courtside_types::{LINEUP_SIZE, MAX_ROSTER_SIZE, Player};

use crate::config::RosterConfig;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while taking in a roster.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    /// Fewer valid names than a lineup needs.
    #[error("a game needs at least {required} players, got {found}")]
    Insufficient {
        /// Valid names after trimming and truncation.
        found: usize,
        /// Minimum roster size.
        required: usize,
    },

    /// The same name appears twice.
    #[error("player {name} is listed more than once")]
    DuplicateName {
        /// The repeated name.
        name: Player,
    },
}

/// Errors raised when choosing the starting lineup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineupError {
    /// Not exactly five players were supplied.
    #[error("a lineup needs exactly {expected} players, got {actual}")]
    WrongSize {
        /// Required lineup size.
        expected: usize,
        /// Number of players supplied.
        actual: usize,
    },

    /// A player was chosen twice.
    #[error("player {player} was chosen more than once")]
    DuplicatePlayer {
        /// The repeated player.
        player: Player,
    },

    /// A player is not on the roster.
    #[error("player {player} is not on the roster")]
    InvalidPlayer {
        /// The unknown player.
        player: Player,
    },
}

/// Errors raised by a substitution. The lineup is unchanged on error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubstitutionError {
    /// The number of players coming in differs from the number going out.
    #[error("select an equal number of players in and out ({outgoing} out, {incoming} in)")]
    CountMismatch {
        /// Players leaving the court.
        outgoing: usize,
        /// Players entering the court.
        incoming: usize,
    },

    /// A player is not eligible for the side of the swap they were named on.
    #[error("player {player} cannot be substituted: {reason}")]
    InvalidPlayer {
        /// The offending player.
        player: Player,
        /// Why the player is ineligible.
        reason: &'static str,
    },

    /// A player was named twice on the same side of the swap.
    #[error("player {player} is named more than once in the substitution")]
    DuplicatePlayer {
        /// The repeated player.
        player: Player,
    },
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// The tracked team's players, in intake order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Take in raw names: trim whitespace, drop blanks, keep at most
    /// `config.max_players` (held to `5..=15`), then validate.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Insufficient`] if fewer than five names remain,
    /// or [`RosterError::DuplicateName`] if `config.reject_duplicate_names`
    /// is set and a name repeats.
    pub fn from_names<I, S>(names: I, config: &RosterConfig) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cleaned: Vec<Player> = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_owned())
            .filter(|name| !name.is_empty())
            .map(Player::from)
            .collect();

        let cap = config.max_players.clamp(LINEUP_SIZE, MAX_ROSTER_SIZE);
        if cleaned.len() > cap {
            tracing::debug!(
                supplied = cleaned.len(),
                kept = cap,
                "Roster truncated to maximum size"
            );
            cleaned.truncate(cap);
        }

        if cleaned.len() < LINEUP_SIZE {
            return Err(RosterError::Insufficient {
                found: cleaned.len(),
                required: LINEUP_SIZE,
            });
        }

        let repeat = if config.reject_duplicate_names {
            first_repeat(&cleaned)
        } else {
            None
        };
        if let Some(name) = repeat {
            return Err(RosterError::DuplicateName { name: name.clone() });
        }

        Ok(Self { players: cleaned })
    }

    /// Every roster entry, in intake order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Roster entries with repeated names removed, first occurrence wins.
    pub fn distinct(&self) -> Vec<&Player> {
        let mut seen = BTreeSet::new();
        self.players
            .iter()
            .filter(|p| seen.insert(p.as_str()))
            .collect()
    }

    /// Number of roster entries.
    pub const fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the roster has no entries. Never true for a validated roster.
    pub const fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Whether `player` is on the roster.
    pub fn contains(&self, player: &str) -> bool {
        self.players.iter().any(|p| p.as_str() == player)
    }
}

// ---------------------------------------------------------------------------
// Lineup
// ---------------------------------------------------------------------------

/// Five distinct roster players currently on court.
///
/// Storage order is display order; substitutions append incoming players
/// at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineup {
    players: Vec<Player>,
}

impl Lineup {
    /// Choose a lineup from the roster.
    ///
    /// # Errors
    ///
    /// Returns [`LineupError::WrongSize`] unless exactly five players are
    /// given, [`LineupError::DuplicatePlayer`] if one repeats, or
    /// [`LineupError::InvalidPlayer`] if one is not on the roster.
    pub fn select(roster: &Roster, candidates: &[Player]) -> Result<Self, LineupError> {
        if candidates.len() != LINEUP_SIZE {
            return Err(LineupError::WrongSize {
                expected: LINEUP_SIZE,
                actual: candidates.len(),
            });
        }
        if let Some(player) = first_repeat(candidates) {
            return Err(LineupError::DuplicatePlayer {
                player: player.clone(),
            });
        }
        if let Some(player) = candidates.iter().find(|p| !roster.contains(p.as_str())) {
            return Err(LineupError::InvalidPlayer {
                player: player.clone(),
            });
        }

        Ok(Self {
            players: candidates.to_vec(),
        })
    }

    /// The players on court, in display order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Whether `player` is on court.
    pub fn contains(&self, player: &str) -> bool {
        self.players.iter().any(|p| p.as_str() == player)
    }

    /// Return the lineup after swapping `outgoing[i]` for `incoming[i]`.
    ///
    /// Each outgoing player is removed and the paired incoming player is
    /// appended. An empty swap returns an identical lineup.
    ///
    /// # Errors
    ///
    /// Returns [`SubstitutionError::CountMismatch`] if the sides differ in
    /// length, [`SubstitutionError::DuplicatePlayer`] if a side repeats a
    /// name, or [`SubstitutionError::InvalidPlayer`] if an outgoing player
    /// is not on court or an incoming player is off the roster or already
    /// on court.
    pub fn substitute(
        &self,
        roster: &Roster,
        outgoing: &[Player],
        incoming: &[Player],
    ) -> Result<Self, SubstitutionError> {
        if outgoing.len() != incoming.len() {
            return Err(SubstitutionError::CountMismatch {
                outgoing: outgoing.len(),
                incoming: incoming.len(),
            });
        }
        if let Some(player) = first_repeat(outgoing).or_else(|| first_repeat(incoming)) {
            return Err(SubstitutionError::DuplicatePlayer {
                player: player.clone(),
            });
        }
        for player in outgoing {
            if !self.contains(player.as_str()) {
                return Err(SubstitutionError::InvalidPlayer {
                    player: player.clone(),
                    reason: "not on court",
                });
            }
        }
        for player in incoming {
            if !roster.contains(player.as_str()) {
                return Err(SubstitutionError::InvalidPlayer {
                    player: player.clone(),
                    reason: "not on the roster",
                });
            }
            if self.contains(player.as_str()) {
                return Err(SubstitutionError::InvalidPlayer {
                    player: player.clone(),
                    reason: "already on court",
                });
            }
        }

        let mut players = self.players.clone();
        for (out, into) in outgoing.iter().zip(incoming) {
            players.retain(|p| p != out);
            players.push(into.clone());
        }

        Ok(Self { players })
    }
}

fn first_repeat(players: &[Player]) -> Option<&Player> {
    let mut seen = BTreeSet::new();
    players.iter().find(|p| !seen.insert(p.as_str()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<Player> {
        list.iter().map(|n| Player::from(*n)).collect()
    }

    fn roster() -> Roster {
        Roster::from_names(["A", "B", "C", "D", "E", "F", "G"], &RosterConfig::default()).unwrap()
    }

    fn starters(roster: &Roster) -> Lineup {
        Lineup::select(roster, &names(&["A", "B", "C", "D", "E"])).unwrap()
    }

    #[test]
    fn intake_trims_and_drops_blanks() {
        let roster = Roster::from_names(
            ["  A ", "", "B", "   ", "C\t", "D", "E"],
            &RosterConfig::default(),
        )
        .unwrap();
        assert_eq!(roster.players(), names(&["A", "B", "C", "D", "E"]).as_slice());
    }

    #[test]
    fn intake_never_exceeds_fifteen_players() {
        let config = RosterConfig {
            max_players: 40,
            ..RosterConfig::default()
        };
        let long: Vec<String> = (1..=30).map(|n| format!("P{n}")).collect();
        let roster = Roster::from_names(&long, &config).unwrap();
        assert_eq!(roster.len(), MAX_ROSTER_SIZE);
        assert!(!roster.contains("P16"));
    }

    #[test]
    fn intake_cap_below_lineup_size_still_fields_five() {
        let config = RosterConfig {
            max_players: 3,
            ..RosterConfig::default()
        };
        let roster = Roster::from_names(["A", "B", "C", "D", "E", "F"], &config).unwrap();
        assert_eq!(roster.len(), LINEUP_SIZE);
        assert!(roster.contains("E"));
        assert!(!roster.contains("F"));
    }

    #[test]
    fn intake_truncates_to_max_players() {
        let long: Vec<String> = (1..=20).map(|n| format!("P{n}")).collect();
        let roster = Roster::from_names(&long, &RosterConfig::default()).unwrap();
        assert_eq!(roster.len(), 15);
        assert!(roster.contains("P15"));
        assert!(!roster.contains("P16"));
    }

    #[test]
    fn intake_requires_five_names() {
        let result = Roster::from_names(["A", "B", " ", "C", "D"], &RosterConfig::default());
        assert_eq!(
            result,
            Err(RosterError::Insufficient {
                found: 4,
                required: 5
            })
        );
    }

    #[test]
    fn intake_rejects_duplicates_by_default() {
        let result = Roster::from_names(["A", "B", "C", "D", "A"], &RosterConfig::default());
        assert_eq!(
            result,
            Err(RosterError::DuplicateName {
                name: Player::from("A")
            })
        );
    }

    #[test]
    fn intake_keeps_duplicates_when_allowed() {
        let config = RosterConfig {
            reject_duplicate_names: false,
            ..RosterConfig::default()
        };
        let roster = Roster::from_names(["A", "B", "C", "D", "A", "E"], &config).unwrap();
        assert_eq!(roster.len(), 6);
        assert_eq!(roster.distinct().len(), 5);
    }

    #[test]
    fn select_accepts_five_distinct_roster_players() {
        let roster = roster();
        let lineup = starters(&roster);
        assert_eq!(lineup.players().len(), 5);
        assert!(lineup.contains("E"));
        assert!(!lineup.contains("F"));
    }

    #[test]
    fn select_rejects_wrong_size() {
        let result = Lineup::select(&roster(), &names(&["A", "B", "C", "D"]));
        assert_eq!(
            result,
            Err(LineupError::WrongSize {
                expected: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn select_rejects_duplicate() {
        let result = Lineup::select(&roster(), &names(&["A", "B", "C", "D", "B"]));
        assert_eq!(
            result,
            Err(LineupError::DuplicatePlayer {
                player: Player::from("B")
            })
        );
    }

    #[test]
    fn select_rejects_player_off_roster() {
        let result = Lineup::select(&roster(), &names(&["A", "B", "C", "D", "Z"]));
        assert_eq!(
            result,
            Err(LineupError::InvalidPlayer {
                player: Player::from("Z")
            })
        );
    }

    #[test]
    fn substitution_removes_then_appends() {
        let roster = roster();
        let lineup = starters(&roster);

        let next = lineup
            .substitute(&roster, &names(&["B", "D"]), &names(&["F", "G"]))
            .unwrap();

        assert_eq!(next.players(), names(&["A", "C", "E", "F", "G"]).as_slice());
        // The receiver is untouched.
        assert_eq!(lineup, starters(&roster));
    }

    #[test]
    fn empty_substitution_is_noop() {
        let roster = roster();
        let lineup = starters(&roster);
        let next = lineup.substitute(&roster, &[], &[]).unwrap();
        assert_eq!(next, lineup);
    }

    #[test]
    fn substitution_rejects_count_mismatch() {
        let roster = roster();
        let result = starters(&roster).substitute(&roster, &names(&["A", "B"]), &names(&["F"]));
        assert_eq!(
            result,
            Err(SubstitutionError::CountMismatch {
                outgoing: 2,
                incoming: 1
            })
        );
    }

    #[test]
    fn substitution_rejects_bench_player_going_out() {
        let roster = roster();
        let result = starters(&roster).substitute(&roster, &names(&["F"]), &names(&["G"]));
        assert!(matches!(
            result,
            Err(SubstitutionError::InvalidPlayer { ref player, reason: "not on court" })
                if player.as_str() == "F"
        ));
    }

    #[test]
    fn substitution_rejects_incoming_already_on_court() {
        let roster = roster();
        let result = starters(&roster).substitute(&roster, &names(&["A"]), &names(&["B"]));
        assert!(matches!(
            result,
            Err(SubstitutionError::InvalidPlayer { reason: "already on court", .. })
        ));
    }

    #[test]
    fn substitution_rejects_incoming_off_roster() {
        let roster = roster();
        let result = starters(&roster).substitute(&roster, &names(&["A"]), &names(&["Z"]));
        assert!(matches!(
            result,
            Err(SubstitutionError::InvalidPlayer { reason: "not on the roster", .. })
        ));
    }

    #[test]
    fn substitution_rejects_repeated_name() {
        let roster = roster();
        let result =
            starters(&roster).substitute(&roster, &names(&["A", "B"]), &names(&["F", "F"]));
        assert_eq!(
            result,
            Err(SubstitutionError::DuplicatePlayer {
                player: Player::from("F")
            })
        );
    }
}
