//! Bounded leaderboard with crash-tolerant persistence.
//!
//! - [`leaderboard`]: pure insert/sort/truncate ranking with a stable tie-break
//! - [`store`]: JSON file and in-memory storage backends
//! - [`manager`]: the locked, persisting owner of the leaderboard
//! - [`table`]: display rows for the leaderboard screen
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tetris_controls_scores::{MemoryStore, ScoreManager};
//! use tetris_controls_scores::types::ManualClock;
//!
//! let scores = ScoreManager::open(MemoryStore::new(), Arc::new(ManualClock::new(0)));
//! assert_eq!(scores.score_position(100), Some(0));
//!
//! scores.add_score("A", 100);
//! assert_eq!(scores.lowest_score(), 100);
//! assert_eq!(scores.scores()[0].name(), "A");
//! ```

pub mod config;
pub mod leaderboard;
pub mod manager;
pub mod record;
pub mod store;
pub mod table;

pub use tetris_controls_types as types;

pub use config::ScoresConfig;
pub use leaderboard::{InvariantViolation, Leaderboard};
pub use manager::ScoreManager;
pub use record::ScoreRecord;
pub use store::{FileStore, MemoryStore, ScoreStore, StoreError};
pub use table::{format_date, score_rows, ScoreRow};
