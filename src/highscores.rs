//! Last/best score record
//!
//! Written by `save_state` when a run ends, read back at startup.

use serde::{Deserialize, Serialize};

/// Score of the most recent run and the best run so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub last_score: u64,
    pub best_score: u64,
}

impl ScoreRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best_score
    }

    /// Record a finished run; returns true on a new best
    pub fn record(&mut self, score: u64) -> bool {
        self.last_score = score;
        if self.qualifies(score) {
            self.best_score = score;
            true
        } else {
            false
        }
    }
}
