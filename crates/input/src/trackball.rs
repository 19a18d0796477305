//! Trackball motion integrator.
//!
//! A trackball reports a stream of small relative motions rather than taps.
//! Samples are summed until the accumulated motion crosses a sensitivity
//! threshold, at which point exactly one command is emitted and the gesture
//! starts over. A gap longer than the obsolescence window between samples
//! means the previous gesture was abandoned; its motion is discarded without
//! emitting anything. A click always drops the piece.
//!
//! Left/right is decided from the accumulated `dx`, but the rotation direction
//! comes from the latest sample's `dy` alone, not the accumulated `dy`.

use crate::config::InputConfig;
use crate::types::{Command, TRACKBALL_SENSITIVITY_X, TRACKBALL_SENSITIVITY_Y};

/// Phase of a raw trackball event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackballAction {
    /// Relative motion.
    Move,
    /// Button released (a click).
    Release,
    /// Anything else (button down, cancel, hover).
    Other,
}

/// Raw trackball event. `dx`/`dy` are relative motion since the previous event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackballEvent {
    pub action: TrackballAction,
    pub dx: f32,
    pub dy: f32,
    pub event_time_ms: u64,
}

impl TrackballEvent {
    pub fn motion(dx: f32, dy: f32, event_time_ms: u64) -> Self {
        Self {
            action: TrackballAction::Move,
            dx,
            dy,
            event_time_ms,
        }
    }

    pub fn release(event_time_ms: u64) -> Self {
        Self {
            action: TrackballAction::Release,
            dx: 0.0,
            dy: 0.0,
            event_time_ms,
        }
    }
}

/// Running sums of the gesture in progress.
///
/// Only the totals and the newest timestamp take part in decisions, so
/// samples are folded in as they arrive and a long run of cancelling jitter
/// costs constant space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub x: f32,
    pub y: f32,
    /// Samples folded into the sums.
    pub samples: usize,
    pub last_event_ms: u64,
}

impl Gesture {
    fn start(event: &TrackballEvent) -> Self {
        Self {
            x: event.dx,
            y: event.dy,
            samples: 1,
            last_event_ms: event.event_time_ms,
        }
    }
}

/// Motion accumulated for the gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureSession {
    #[default]
    Empty,
    Accumulating(Gesture),
}

impl GestureSession {
    pub fn is_empty(&self) -> bool {
        matches!(self, GestureSession::Empty)
    }

    /// Number of samples in the current gesture.
    pub fn len(&self) -> usize {
        match self {
            GestureSession::Empty => 0,
            GestureSession::Accumulating(g) => g.samples,
        }
    }

    /// Timestamp of the newest sample in the current gesture.
    pub fn last_event_ms(&self) -> Option<u64> {
        match self {
            GestureSession::Empty => None,
            GestureSession::Accumulating(g) => Some(g.last_event_ms),
        }
    }

    /// Accumulated `(x, y)` over the current gesture.
    pub fn totals(&self) -> (f32, f32) {
        match self {
            GestureSession::Empty => (0.0, 0.0),
            GestureSession::Accumulating(g) => (g.x, g.y),
        }
    }

    /// Pure transition function: `(session, event) -> (session', command)`.
    pub fn step(self, event: TrackballEvent, config: &InputConfig) -> (Self, Option<Command>) {
        match event.action {
            TrackballAction::Release => return (GestureSession::Empty, Some(Command::Drop)),
            TrackballAction::Other => return (self, None),
            TrackballAction::Move => {}
        }

        let gesture = match self {
            GestureSession::Accumulating(g)
                if event.event_time_ms.saturating_sub(g.last_event_ms)
                    > config.trackball_obsolescence_ms =>
            {
                log::trace!(
                    "trackball: dropping stale gesture of {} samples ({}ms gap)",
                    g.samples,
                    event.event_time_ms - g.last_event_ms
                );
                Gesture::start(&event)
            }
            GestureSession::Accumulating(g) => Gesture {
                x: g.x + event.dx,
                y: g.y + event.dy,
                samples: g.samples + 1,
                last_event_ms: event.event_time_ms,
            },
            GestureSession::Empty => Gesture::start(&event),
        };

        let (x, y) = (gesture.x, gesture.y);
        if x.abs() < TRACKBALL_SENSITIVITY_X && y.abs() < TRACKBALL_SENSITIVITY_Y {
            return (GestureSession::Accumulating(gesture), None);
        }

        let cmd = if x.abs() > y.abs() {
            if x > 0.0 {
                Some(Command::MoveRight)
            } else {
                Some(Command::MoveLeft)
            }
        } else if event.dy > 0.0 {
            Some(Command::RotateClockwise)
        } else if event.dy < 0.0 {
            Some(Command::RotateCounterclockwise)
        } else {
            None
        };

        (GestureSession::Empty, cmd)
    }
}

/// Stateful wrapper over [`GestureSession::step`].
#[derive(Debug, Clone, Default)]
pub struct TrackballIntegrator {
    session: GestureSession,
    config: InputConfig,
}

impl TrackballIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InputConfig) -> Self {
        Self {
            session: GestureSession::Empty,
            config,
        }
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    pub fn handle(&mut self, event: TrackballEvent) -> Option<Command> {
        let (next, cmd) = self.session.step(event, &self.config);
        self.session = next;
        cmd
    }

    pub fn reset(&mut self) {
        self.session = GestureSession::Empty;
    }
}
