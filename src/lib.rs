//! Falling-block interaction layer (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as
//! `tetris_controls::{types,engine,input,scores}` and adds the game-over flow
//! that ties the engine's final score to the leaderboard.

pub use tetris_controls_engine as engine;
pub use tetris_controls_input as input;
pub use tetris_controls_scores as scores;
pub use tetris_controls_types as types;

pub mod game_over;

pub use game_over::{GameOver, GameOverFlow};
