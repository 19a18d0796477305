//! Routes raw input events to their decoder and forwards commands to the engine.

use std::sync::Arc;

use crossterm::event::{Event, KeyEvent, MouseEvent};

use crate::config::InputConfig;
use crate::engine::Engine;
use crate::map::decode_key;
use crate::touch::{Surface, TouchDecoder, TouchEvent, TouchPressState};
use crate::trackball::{GestureSession, TrackballEvent, TrackballIntegrator};
use crate::types::{Clock, Command};

/// Owns the three decoders and the engine they drive.
///
/// Each event runs its decoder synchronously and results in at most one engine
/// call. Events arriving while no engine is attached are ignored. Attaching or
/// detaching resets the touch press and the trackball gesture.
pub struct InputCoordinator {
    engine: Option<Arc<dyn Engine>>,
    clock: Arc<dyn Clock>,
    touch: TouchDecoder,
    trackball: TrackballIntegrator,
}

impl InputCoordinator {
    pub fn new(config: InputConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            engine: None,
            clock,
            touch: TouchDecoder::with_config(config),
            trackball: TrackballIntegrator::with_config(config),
        }
    }

    pub fn attach(&mut self, engine: Arc<dyn Engine>) {
        self.reset();
        self.engine = Some(engine);
    }

    /// Detach from the current engine, returning it.
    pub fn detach(&mut self) -> Option<Arc<dyn Engine>> {
        self.reset();
        self.engine.take()
    }

    pub fn is_attached(&self) -> bool {
        self.engine.is_some()
    }

    pub fn touch_state(&self) -> TouchPressState {
        self.touch.state()
    }

    pub fn gesture_session(&self) -> &GestureSession {
        self.trackball.session()
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Option<Command> {
        if self.engine.is_none() {
            return None;
        }
        self.dispatch(decode_key(key))
    }

    /// Touch samples are timestamped with the coordinator's clock at decode time.
    pub fn on_touch(&mut self, event: TouchEvent, surface: Surface) -> Option<Command> {
        if self.engine.is_none() {
            return None;
        }
        let now_ms = self.clock.now_ms();
        let cmd = self.touch.handle(event, now_ms, surface);
        self.dispatch(cmd)
    }

    pub fn on_trackball(&mut self, event: TrackballEvent) -> Option<Command> {
        if self.engine.is_none() {
            return None;
        }
        let cmd = self.trackball.handle(event);
        self.dispatch(cmd)
    }

    /// Left-button mouse events act as touch input over `surface`.
    pub fn on_mouse(&mut self, event: MouseEvent, surface: Surface) -> Option<Command> {
        let touch = TouchEvent::from_mouse(event)?;
        self.on_touch(touch, surface)
    }

    /// Convenience entry point for a crossterm event loop.
    pub fn on_event(&mut self, event: &Event, surface: Surface) -> Option<Command> {
        match event {
            Event::Key(key) => self.on_key(*key),
            Event::Mouse(mouse) => self.on_mouse(*mouse, surface),
            _ => None,
        }
    }

    fn dispatch(&self, cmd: Option<Command>) -> Option<Command> {
        let cmd = cmd?;
        if let Some(engine) = &self.engine {
            log::debug!("input: dispatching {}", cmd.as_str());
            engine.apply_command(cmd);
        }
        Some(cmd)
    }

    fn reset(&mut self) {
        self.touch.reset();
        self.trackball.reset();
    }
}
