//! Input gesture decoding (engine-facing).
//!
//! Three independent decoders turn raw events into discrete
//! [`Command`](crate::types::Command)s:
//!
//! - [`map`]: stateless key mapping from `crossterm` key events
//! - [`touch`]: four-zone touch surface with press autorepeat
//! - [`trackball`]: motion integration with an obsolescence window
//!
//! [`InputCoordinator`] owns one of each and forwards every decoded command
//! to the attached [`Engine`](crate::engine::Engine).

pub mod config;
pub mod coordinator;
pub mod map;
pub mod touch;
pub mod trackball;

pub use tetris_controls_engine as engine;
pub use tetris_controls_types as types;

pub use config::InputConfig;
pub use coordinator::InputCoordinator;
pub use map::{decode_key, decode_key_code};
pub use touch::{Surface, TouchAction, TouchDecoder, TouchEvent, TouchPressState, Zone};
pub use trackball::{
    Gesture, GestureSession, TrackballAction, TrackballEvent, TrackballIntegrator,
};
