//! Engine collaborator contract.
//!
//! The simulation itself (piece generation, collision, gravity, line clears,
//! scoring) is an external component. This crate only describes what the
//! input and leaderboard layers need from it: commands, read accessors and a
//! state-change subscription.
//!
//! Engines run their own gravity timer, so every method takes `&self` and
//! implementations are expected to synchronize internally. Listeners may be
//! invoked from the engine's timer thread; [`ChannelListener`] forwards events
//! to whichever thread owns presentation state.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;

pub use tetris_controls_types as types;

use crate::types::{Command, GameStatus};

/// Color of an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellColor {
    Blue,
    Cyan,
    Green,
    Orange,
    Purple,
    Red,
    Yellow,
}

/// An occupied board (or piece) cell in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: u8,
    pub y: u8,
    pub color: CellColor,
}

impl Cell {
    pub fn new(x: u8, y: u8, color: CellColor) -> Self {
        Self { x, y, color }
    }
}

/// Notification delivered to listeners on engine state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineEvent {
    /// Engine status right after the transition.
    pub status: GameStatus,
}

/// Receiver of engine state-change notifications.
pub trait StateListener: Send + Sync {
    fn state_changed(&self, event: EngineEvent);
}

impl<F> StateListener for F
where
    F: Fn(EngineEvent) + Send + Sync,
{
    fn state_changed(&self, event: EngineEvent) {
        self(event)
    }
}

/// Handle returned by [`Engine::add_listener`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

impl ListenerId {
    /// Allocate a process-unique id. Engines may use this or their own scheme.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ListenerId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// The simulation engine as seen from the interaction layer.
pub trait Engine: Send + Sync {
    fn move_left(&self);
    fn move_right(&self);
    fn rotate_clockwise(&self);
    fn rotate_counterclockwise(&self);
    fn drop_piece(&self);

    fn start(&self);
    fn stop(&self);
    fn pause(&self);
    fn resume(&self);

    /// Board width in cells.
    fn width(&self) -> u8;
    /// Board height in cells.
    fn height(&self) -> u8;
    /// Occupied cells of the settled board.
    fn board(&self) -> Vec<Cell>;
    /// Cells of the falling piece.
    fn piece(&self) -> Vec<Cell>;
    /// Cells of the upcoming piece, in preview coordinates.
    fn next_piece(&self) -> Vec<Cell>;

    fn score(&self) -> u32;
    fn line_count(&self) -> u32;
    fn speed(&self) -> u32;
    fn piece_count(&self) -> u32;
    fn game_status(&self) -> GameStatus;

    fn add_listener(&self, listener: Box<dyn StateListener>) -> ListenerId;
    fn remove_listener(&self, id: ListenerId);

    /// Invoke the engine call matching `command`.
    fn apply_command(&self, command: Command) {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::RotateClockwise => self.rotate_clockwise(),
            Command::RotateCounterclockwise => self.rotate_counterclockwise(),
            Command::Drop => self.drop_piece(),
        }
    }
}

/// Listener that forwards every event into an unbounded channel.
///
/// The engine thread only pays for a channel send; the UI thread drains the
/// receiver with `try_recv` at its own pace.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    tx: mpsc::UnboundedSender<EngineEvent>,
}

impl ChannelListener {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<EngineEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl StateListener for ChannelListener {
    fn state_changed(&self, event: EngineEvent) {
        // Receiver gone means the UI side detached; nothing left to notify.
        let _ = self.tx.send(event);
    }
}

/// Counters shown in the stats panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineStats {
    pub score: u32,
    pub lines: u32,
    pub speed: u32,
    pub pieces: u32,
}

impl EngineStats {
    pub const HEADINGS: [&'static str; 4] = ["Score", "Lines", "Speed", "Pieces"];

    pub fn read<E: Engine + ?Sized>(engine: &E) -> Self {
        Self {
            score: engine.score(),
            lines: engine.line_count(),
            speed: engine.speed(),
            pieces: engine.piece_count(),
        }
    }

    /// Heading/value pairs in panel order.
    pub fn rows(&self) -> [(&'static str, String); 4] {
        [
            (Self::HEADINGS[0], self.score.to_string()),
            (Self::HEADINGS[1], self.lines.to_string()),
            (Self::HEADINGS[2], self.speed.to_string()),
            (Self::HEADINGS[3], self.pieces.to_string()),
        ]
    }
}
