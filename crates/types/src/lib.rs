//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types shared by the input decoders, the
//! engine contract and the leaderboard. Everything here is plain data with no
//! external dependencies.
//!
//! # Input Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `AUTOREPEAT_DELAY_MS` | 400 | Hold time before a touch press starts repeating |
//! | `AUTOREPEAT_RATE_MS` | 50 | Minimum spacing between repeated touch commands |
//! | `TRACKBALL_OBSOLESCENCE_MS` | 300 | Max gap between queued trackball samples |
//!
//! Both touch thresholds are strict: a repeat needs *more than* 400ms since
//! press-down and *more than* 50ms since the previous repeat.
//!
//! # Trackball Sensitivity
//!
//! Accumulated motion below both thresholds is treated as jitter:
//!
//! - `TRACKBALL_SENSITIVITY_X`: 0.5
//! - `TRACKBALL_SENSITIVITY_Y`: 1.0
//!
//! # Examples
//!
//! ```
//! use tetris_controls_types::{Clock, ManualClock, GameStatus, MAX_SCORES};
//!
//! let clock = ManualClock::new(0);
//! clock.advance(401);
//! assert_eq!(clock.now_ms(), 401);
//!
//! assert_eq!(GameStatus::default(), GameStatus::NotStarted);
//! assert_eq!(MAX_SCORES, 10);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Initial delay before a held touch press autorepeats (400ms).
pub const AUTOREPEAT_DELAY_MS: u64 = 400;

/// Minimum interval between autorepeated touch commands (50ms).
pub const AUTOREPEAT_RATE_MS: u64 = 50;

/// Maximum gap between successive trackball samples before the queue is stale (300ms).
pub const TRACKBALL_OBSOLESCENCE_MS: u64 = 300;

/// Horizontal trackball threshold on the accumulated `dx`.
pub const TRACKBALL_SENSITIVITY_X: f32 = 0.5;

/// Vertical trackball threshold on the accumulated `dy`.
pub const TRACKBALL_SENSITIVITY_Y: f32 = 1.0;

/// Leaderboard capacity.
pub const MAX_SCORES: usize = 10;


/// Discrete, payload-free game directives derived from raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateClockwise,
    /// Rotate piece 90° counter-clockwise
    RotateCounterclockwise,
    /// Drop the piece
    Drop,
}

impl Command {
    /// camelCase name used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::RotateClockwise => "rotateCw",
            Command::RotateCounterclockwise => "rotateCcw",
            Command::Drop => "drop",
        }
    }
}

/// Lifecycle state reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::NotStarted => "notStarted",
            GameStatus::Running => "running",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "gameOver",
        }
    }
}

/// Millisecond time source.
///
/// Decoders never read the wall clock directly; the coordinator and the
/// leaderboard ask a `Clock` so timing can be driven from tests.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Wall-clock time in milliseconds since the unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}
