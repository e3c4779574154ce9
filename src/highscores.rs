//! High score leaderboard
//!
//! Lives in memory for the lifetime of the process and survives session
//! restarts. Tracks the top 10 finished runs.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameState};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Ticks the run lasted
    pub ticks: u64,
    /// Whether the run reached the goal
    pub won: bool,
}

impl HighScoreEntry {
    /// Strictly better run: higher score, then a win, then the faster run
    pub fn beats(&self, other: &HighScoreEntry) -> bool {
        let key = |e: &HighScoreEntry| (e.score, e.won, Reverse(e.ticks));
        key(self) > key(other)
    }
}

/// High score leaderboard (best first)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Runs without a score never make the board
    pub fn qualifies(&self, entry: &HighScoreEntry) -> bool {
        entry.score > 0
            && (self.entries.len() < MAX_HIGH_SCORES
                || self.entries.last().is_none_or(|last| entry.beats(last)))
    }

    /// Add a run to the leaderboard; returns the rank achieved (1-indexed)
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(&entry) {
            return None;
        }
        // Equal runs keep the earlier one ahead
        let pos = self
            .entries
            .iter()
            .position(|e| entry.beats(e))
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(pos + 1)
    }

    /// Record a finished session; running sessions are ignored
    pub fn record(&mut self, state: &GameState) -> Option<usize> {
        let won = match state.phase() {
            GamePhase::Running => return None,
            GamePhase::Won => true,
            GamePhase::Lost => false,
        };
        let rank = self.add_score(HighScoreEntry {
            score: state.score(),
            ticks: state.time_ticks(),
            won,
        });
        if let Some(rank) = rank {
            log::info!("New high score #{}: {}", rank, state.score());
        }
        rank
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}
