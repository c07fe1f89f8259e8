//! Quarter progression for a game.
//!
//! The tracker is the single source of truth for which quarter is being
//! played. It only ever moves forward: `Q1 -> Q2 -> Q3 -> Q4 -> final`.
//! Completing a quarter never touches the play log or the tally.

use std::collections::BTreeSet;

use courtside_types::{Quarter, QuarterBoardEntry, QuarterProgress, QuarterStatus};

/// Tracks the current quarter, the completed set, and whether the game
/// has ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarterTracker {
    /// Quarter in progress. Stays at `Q4` once the game is final.
    current: Quarter,
    /// Quarters marked complete.
    completed: BTreeSet<Quarter>,
    /// Set when `Q4` is completed. Terminal.
    is_final: bool,
}

impl Default for QuarterTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl QuarterTracker {
    /// Start a tracker at `Q1` with nothing completed.
    pub const fn new() -> Self {
        Self {
            current: Quarter::Q1,
            completed: BTreeSet::new(),
            is_final: false,
        }
    }

    /// Quarter in progress.
    pub const fn current(&self) -> Quarter {
        self.current
    }

    /// Whether the fourth quarter has been completed.
    pub const fn is_final(&self) -> bool {
        self.is_final
    }

    /// Current position as a [`QuarterProgress`].
    pub const fn progress(&self) -> QuarterProgress {
        QuarterProgress {
            current_quarter: self.current,
            is_final: self.is_final,
        }
    }

    /// Mark the current quarter complete and advance.
    ///
    /// Completing `Q4` makes the tracker final. Once final, further calls
    /// change nothing and keep returning `{Q4, is_final: true}`.
    pub fn complete(&mut self) -> QuarterProgress {
        if self.is_final {
            return self.progress();
        }

        self.completed.insert(self.current);
        match self.current.next() {
            Some(next) => self.current = next,
            None => self.is_final = true,
        }

        self.progress()
    }

    /// Display status of `quarter`.
    pub fn status(&self, quarter: Quarter) -> QuarterStatus {
        if self.completed.contains(&quarter) {
            QuarterStatus::Completed
        } else if quarter == self.current {
            QuarterStatus::InProgress
        } else {
            QuarterStatus::Locked
        }
    }

    /// Status of every quarter, in playing order.
    pub fn board(&self) -> Vec<QuarterBoardEntry> {
        Quarter::ALL
            .into_iter()
            .map(|quarter| QuarterBoardEntry {
                quarter,
                status: self.status(quarter),
            })
            .collect()
    }
}
