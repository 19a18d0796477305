//! Game-over to leaderboard flow.
//!
//! Engine notifications arrive on the engine's own thread; they are forwarded
//! through a [`ChannelListener`] and drained here with [`GameOverFlow::poll`]
//! from the thread that owns the UI. When the game transitions into
//! `GameOver`, the finished score is checked against the leaderboard before
//! anyone is asked for a name.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::engine::{ChannelListener, Engine, EngineEvent, ListenerId};
use crate::scores::ScoreManager;
use crate::types::GameStatus;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub score: u32,
    /// Rank the score would take, `None` if it does not qualify.
    pub position: Option<usize>,
}

impl GameOver {
    pub fn qualifies(&self) -> bool {
        self.position.is_some()
    }
}

pub struct GameOverFlow {
    engine: Arc<dyn Engine>,
    scores: Arc<ScoreManager>,
    events: UnboundedReceiver<EngineEvent>,
    listener: Option<ListenerId>,
    previous: GameStatus,
    pending: Option<GameOver>,
    highlighted: Option<usize>,
}

impl GameOverFlow {
    /// Subscribe to `engine` and start tracking its status.
    pub fn attach(engine: Arc<dyn Engine>, scores: Arc<ScoreManager>) -> Self {
        let (listener, events) = ChannelListener::new();
        let id = engine.add_listener(Box::new(listener));
        let previous = engine.game_status();

        Self {
            engine,
            scores,
            events,
            listener: Some(id),
            previous,
            pending: None,
            highlighted: None,
        }
    }

    /// Drain pending engine events. Returns the game-over result when the
    /// engine has just entered `GameOver`.
    pub fn poll(&mut self) -> Option<GameOver> {
        let mut finished = None;

        while let Ok(event) = self.events.try_recv() {
            log::debug!(
                "engine status {} -> {}",
                self.previous.as_str(),
                event.status.as_str()
            );
            if event.status == GameStatus::GameOver && self.previous != GameStatus::GameOver {
                let score = self.engine.score();
                let position = self.scores.score_position(score);
                log::info!("game over with score {score}, leaderboard position {position:?}");

                let result = GameOver { score, position };
                self.pending = result.qualifies().then_some(result);
                finished = Some(result);
            }
            self.previous = event.status;
        }

        finished
    }

    /// A qualifying score waiting for a player name.
    pub fn pending(&self) -> Option<GameOver> {
        self.pending
    }

    /// Record the pending score under `name`.
    ///
    /// Empty names are ignored and leave the score pending. Returns the rank
    /// the score landed on.
    pub fn record(&mut self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        let pending = self.pending.take()?;

        let position = self.scores.add_score(name, pending.score);
        self.highlighted = position;
        position
    }

    /// Abandon name entry for the pending score.
    pub fn dismiss(&mut self) {
        self.pending = None;
    }

    /// Row to highlight the next time the leaderboard is shown. Consumed on read.
    pub fn take_highlight(&mut self) -> Option<usize> {
        self.highlighted.take()
    }

    pub fn new_game(&mut self) {
        self.pending = None;
        self.engine.stop();
        self.engine.start();
    }

    /// Pause a running game or resume a paused one; other states are left alone.
    pub fn toggle_pause(&self) {
        match self.engine.game_status() {
            GameStatus::Running => self.engine.pause(),
            GameStatus::Paused => self.engine.resume(),
            GameStatus::NotStarted | GameStatus::GameOver => {}
        }
    }

    pub fn engine(&self) -> &Arc<dyn Engine> {
        &self.engine
    }

    /// Unsubscribe from the engine. Idempotent; also runs on drop.
    pub fn detach(&mut self) {
        if let Some(id) = self.listener.take() {
            self.engine.remove_listener(id);
            log::debug!("game-over flow detached from engine");
        }
    }
}

impl Drop for GameOverFlow {
    fn drop(&mut self) {
        self.detach();
    }
}
