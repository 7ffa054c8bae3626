//! High score leaderboard system
//!
//! Persisted as a JSON array under one storage key, tracks the top 5 scores.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::persistence::KeyValueStore;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score (may be negative)
    pub score: i64,
    /// Human-readable local time the round ended
    pub date: String,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a new score, keeping the board sorted and capped.
    /// Returns the rank achieved (1-indexed) or None if it fell off the board.
    pub fn record(&mut self, score: i64, date: String) -> Option<usize> {
        let entry = HighScoreEntry { score, date };

        // Insert after any equal scores so earlier entries keep their place
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard from storage.
    ///
    /// Missing, unreadable or corrupt data yields an empty board.
    pub fn load(store: &dyn KeyValueStore, key: &str) -> Self {
        let json = match store.get(key) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                return Self::new();
            }
            Err(e) => {
                log::warn!("Could not read high scores, starting fresh: {e}");
                return Self::new();
            }
        };

        match serde_json::from_str::<HighScores>(&json) {
            Ok(mut scores) => {
                // Stored data may predate the cap or be hand-edited
                scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Corrupt high score data, starting fresh: {e}");
                Self::new()
            }
        }
    }

    /// Write the leaderboard back to storage
    pub fn save(&self, store: &mut dyn KeyValueStore, key: &str) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        store.set(key, &json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Format a timestamp for display on the leaderboard
pub fn format_date(time: DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}
