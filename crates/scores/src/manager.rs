//! Leaderboard manager: the single owner of the ranking and its storage.
//!
//! Construct one per process and share it by `Arc`. Every operation takes the
//! same lock, so a read-modify-persist sequence never interleaves with another
//! mutation or with a hypothetical rank query.
//!
//! Storage problems never reach the caller. A missing or unreadable file starts
//! an empty leaderboard; a failed write is logged and the in-memory leaderboard
//! stays authoritative for the rest of the run.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::ScoresConfig;
use crate::leaderboard::Leaderboard;
use crate::record::ScoreRecord;
use crate::store::{FileStore, ScoreStore};
use crate::types::{Clock, SystemClock};

struct State {
    board: Leaderboard,
    store: Box<dyn ScoreStore>,
}

impl State {
    fn persist(&self) {
        match self.store.save(self.board.entries()) {
            Ok(()) => log::debug!("scores saved ({} entries)", self.board.len()),
            Err(e) => log::error!("error writing score file, keeping scores in memory: {e}"),
        }
    }
}

pub struct ScoreManager {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
}

impl ScoreManager {
    /// Load the leaderboard from `store`.
    pub fn open(store: impl ScoreStore + 'static, clock: Arc<dyn Clock>) -> Self {
        let board = load_board(&store);
        Self {
            state: Mutex::new(State {
                board,
                store: Box::new(store),
            }),
            clock,
        }
    }

    /// File-backed manager stamped with wall-clock time.
    pub fn from_config(config: &ScoresConfig) -> Self {
        Self::open(FileStore::new(config.path.clone()), Arc::new(SystemClock))
    }

    /// Fresh copy of the current leaderboard, best first.
    pub fn scores(&self) -> Vec<ScoreRecord> {
        self.lock().board.entries().to_vec()
    }

    /// Record a finished game. Returns the rank it landed on, if any.
    pub fn add_score(&self, name: impl Into<String>, score: u32) -> Option<usize> {
        let record = ScoreRecord::new(name, score, self.clock.now_ms());

        let mut state = self.lock();
        let (board, position) = state.board.ranked_with(record);
        state.board = board;
        state.persist();

        log::info!("score {score} recorded at position {position:?}");
        position
    }

    /// Rank `score` would reach if added now, without recording it.
    pub fn score_position(&self, score: u32) -> Option<usize> {
        let candidate = ScoreRecord::new("", score, self.clock.now_ms());
        let (_, position) = self.lock().board.ranked_with(candidate);
        position
    }

    /// Qualification threshold hint: the lowest listed score, 0 when empty.
    pub fn lowest_score(&self) -> u32 {
        self.lock().board.lowest_score()
    }

    pub fn clear_scores(&self) {
        let mut state = self.lock();
        state.board = Leaderboard::new();
        state.persist();
        log::info!("scores cleared");
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // Mutations swap in a fully built board, so a poisoned state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn load_board(store: &dyn ScoreStore) -> Leaderboard {
    match store.load() {
        Ok(None) => {
            log::info!("no score file found, starting fresh");
            Leaderboard::new()
        }
        Ok(Some(records)) => match Leaderboard::from_records(records) {
            Ok(board) => {
                log::info!("loaded {} scores", board.len());
                board
            }
            Err(e) => {
                log::error!("discarding stored scores: {e}");
                Leaderboard::new()
            }
        },
        Err(e) => {
            log::error!("error reading score file: {e}");
            Leaderboard::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::ManualClock;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn manager(store: &MemoryStore) -> (ScoreManager, Arc<ManualClock>) {
        init_logger();
        let clock = Arc::new(ManualClock::new(1_000));
        (ScoreManager::open(store.clone(), clock.clone()), clock)
    }

    #[test]
    fn test_first_score_on_empty_board() {
        let store = MemoryStore::new();
        let (m, _) = manager(&store);

        assert_eq!(m.lowest_score(), 0);
        assert_eq!(m.add_score("A", 100), Some(0));

        let scores = m.scores();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].name(), "A");
        assert_eq!(scores[0].score(), 100);
        assert_eq!(scores[0].timestamp_ms(), 1_000);
        assert_eq!(m.lowest_score(), 100);
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let store = MemoryStore::new();
        let (m, clock) = manager(&store);

        m.add_score("A", 10);
        clock.advance(5);
        m.add_score("B", 20);
        let saved = store.snapshot().unwrap();
        assert_eq!(saved, m.scores());
        assert_eq!(saved[0].name(), "B");
        assert_eq!(saved[0].timestamp_ms(), 1_005);

        m.clear_scores();
        assert_eq!(store.snapshot(), Some(Vec::new()));
    }

    #[test]
    fn test_ties_rank_after_existing_entries() {
        let store = MemoryStore::new();
        let (m, _) = manager(&store);
        m.add_score("A", 50);
        m.add_score("B", 50);

        assert_eq!(m.score_position(50), Some(2));
        assert_eq!(m.add_score("C", 50), Some(2));

        let names: Vec<String> = m.scores().iter().map(|r| r.name().to_string()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_score_position_does_not_mutate() {
        let store = MemoryStore::new();
        let (m, _) = manager(&store);
        m.add_score("A", 50);
        let before = store.snapshot();

        assert_eq!(m.score_position(70), Some(0));
        assert_eq!(m.score_position(10), Some(1));
        assert_eq!(m.scores().len(), 1);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_non_qualifying_score_on_full_board() {
        let store = MemoryStore::new();
        let (m, _) = manager(&store);
        for s in (1..=10).map(|i| i * 100) {
            m.add_score(format!("p{s}"), s);
        }
        assert_eq!(m.lowest_score(), 100);

        let before = m.scores();
        assert_eq!(m.score_position(99), None);
        assert_eq!(m.add_score("late", 99), None);
        assert_eq!(m.scores(), before);
    }

    #[test]
    fn test_returned_scores_are_copies() {
        let store = MemoryStore::new();
        let (m, _) = manager(&store);
        m.add_score("A", 10);

        let mut copy = m.scores();
        copy.clear();
        assert_eq!(m.scores().len(), 1);
    }

    #[test]
    fn test_reopen_restores_scores() {
        let store = MemoryStore::new();
        {
            let (m, _) = manager(&store);
            m.add_score("A", 10);
            m.add_score("B", 30);
        }

        let (reopened, _) = manager(&store);
        let names: Vec<String> = reopened
            .scores()
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_clear_survives_reopen() {
        let store = MemoryStore::new();
        let (m, _) = manager(&store);
        m.add_score("A", 10);
        m.clear_scores();
        assert!(m.scores().is_empty());
        drop(m);

        let (reopened, _) = manager(&store);
        assert!(reopened.scores().is_empty());
        assert_eq!(reopened.lowest_score(), 0);
    }

    #[test]
    fn test_invalid_stored_board_starts_empty() {
        let store = MemoryStore::new();
        store
            .save(&[ScoreRecord::new("low", 1, 0), ScoreRecord::new("high", 2, 0)])
            .unwrap();

        let (m, _) = manager(&store);
        assert!(m.scores().is_empty());
    }

    #[test]
    fn test_concurrent_adds_keep_invariants() {
        let store = MemoryStore::new();
        let (m, _) = manager(&store);
        let m = Arc::new(m);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let m = m.clone();
                std::thread::spawn(move || {
                    for i in 0..25u32 {
                        m.add_score(format!("t{t}-{i}"), (t * 31 + i * 7) % 97);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let scores = m.scores();
        assert_eq!(scores.len(), crate::types::MAX_SCORES);
        assert!(scores.windows(2).all(|w| w[0].score() >= w[1].score()));
        assert_eq!(store.snapshot().unwrap(), scores);
    }
}
