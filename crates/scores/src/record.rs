//! Score records.

use serde::{Deserialize, Serialize};

/// One leaderboard entry. Immutable once created.
///
/// Only `score` takes part in ranking; `name` and `timestamp_ms` are payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    name: String,
    score: u32,
    /// Unix timestamp (ms) when achieved
    timestamp_ms: u64,
}

impl ScoreRecord {
    pub fn new(name: impl Into<String>, score: u32, timestamp_ms: u64) -> Self {
        Self {
            name: name.into(),
            score,
            timestamp_ms,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }
}
