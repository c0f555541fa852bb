//! Best-score leaderboard
//!
//! In-memory only, one entry per player name, top 3 scores.

use serde::{Deserialize, Serialize};

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 3;

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player name
    pub name: String,
    /// Best score for this name
    pub score: u32,
}

/// Top scores, sorted descending
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a finished run
    ///
    /// An existing name keeps its best score; a new name is inserted. The
    /// table is then re-sorted and trimmed. Returns the 1-indexed rank of
    /// `name` afterwards, or `None` if it did not make the cut.
    pub fn record(&mut self, name: &str, score: u32) -> Option<usize> {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => {
                if score > existing.score {
                    existing.score = score;
                }
            }
            None => self.entries.push(LeaderboardEntry {
                name: name.to_string(),
                score,
            }),
        }

        // Stable sort keeps earlier entries ahead on ties
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);

        self.rank_of(name)
    }

    /// 1-indexed position of a name, if listed
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name).map(|i| i + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Lines for the home/game-over screens, e.g. `1. AB1 - 437`
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {} - {}", i + 1, e.name, e.score))
            .collect()
    }
}
