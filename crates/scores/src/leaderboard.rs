//! Pure ranking logic over a capacity-bounded list of records.
//!
//! # Tie-break
//!
//! A new record is appended *after* the existing entries and the list is then
//! sorted with [`slice::sort_by`], which is guaranteed stable. Entries with
//! equal scores therefore keep their relative order, and a newcomer ranks after
//! every existing entry with the same score. When the list is full, a newcomer
//! that only ties the lowest score falls off.

use thiserror::Error;

use crate::record::ScoreRecord;
use crate::types::MAX_SCORES;

/// Top-[`MAX_SCORES`] records, sorted by score descending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Leaderboard {
    entries: Vec<ScoreRecord>,
}

/// Loaded data that breaks the leaderboard invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{0} entries exceed the leaderboard capacity")]
    TooManyEntries(usize),
    #[error("entry {index} outranks its predecessor")]
    Unsorted { index: usize },
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt records read back from storage, checking both invariants.
    pub fn from_records(records: Vec<ScoreRecord>) -> Result<Self, InvariantViolation> {
        if records.len() > MAX_SCORES {
            return Err(InvariantViolation::TooManyEntries(records.len()));
        }
        if let Some(index) = records
            .windows(2)
            .position(|w| w[0].score() < w[1].score())
        {
            return Err(InvariantViolation::Unsorted { index: index + 1 });
        }
        Ok(Self { entries: records })
    }

    pub fn entries(&self) -> &[ScoreRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Score of the lowest-ranked entry, 0 when empty.
    pub fn lowest_score(&self) -> u32 {
        self.entries.last().map(|e| e.score()).unwrap_or(0)
    }

    /// Insert `record`, sort, truncate. Returns the resulting leaderboard and the
    /// newcomer's zero-based rank, or `None` if it did not make the cut.
    ///
    /// `self` is left untouched so the same computation serves hypothetical
    /// rank queries.
    pub fn ranked_with(&self, record: ScoreRecord) -> (Leaderboard, Option<usize>) {
        let newcomer = self.entries.len();

        let mut working: Vec<(usize, ScoreRecord)> =
            self.entries.iter().cloned().enumerate().collect();
        working.push((newcomer, record));

        // Stable: equal scores keep insertion order, newcomer last among them.
        working.sort_by(|a, b| b.1.score().cmp(&a.1.score()));
        working.truncate(MAX_SCORES);

        let position = working.iter().position(|(tag, _)| *tag == newcomer);
        let entries = working.into_iter().map(|(_, r)| r).collect();
        let next = Leaderboard { entries };
        debug_assert!(next.check().is_ok());

        (next, position)
    }

    fn check(&self) -> Result<(), InvariantViolation> {
        Self::from_records(self.entries.clone()).map(|_| ())
    }
}
