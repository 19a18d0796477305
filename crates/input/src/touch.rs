//! Touch zone decoder with autorepeat.
//!
//! The surface is split into four zones: the top half drops the piece, the
//! bottom half is cut into thirds for left / rotate / right. A press emits once
//! immediately; while held, move samples re-emit at a fixed rate after an
//! initial delay. Zones are classified from each sample's own coordinates, so a
//! finger drifting between zones switches the repeated command.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::config::InputConfig;
use crate::types::Command;

/// Size of the input surface in pixels (or terminal cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Touch zones of the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Top,
    BottomLeft,
    BottomMiddle,
    BottomRight,
}

impl Zone {
    pub fn command(&self) -> Command {
        match self {
            Zone::Top => Command::Drop,
            Zone::BottomLeft => Command::MoveLeft,
            Zone::BottomMiddle => Command::RotateCounterclockwise,
            Zone::BottomRight => Command::MoveRight,
        }
    }

    /// Classify a point against the zones of `surface`.
    ///
    /// Coordinates are truncated to whole units and zones are half-open
    /// (`left <= x < right`), so every point inside a non-empty surface lands
    /// in exactly one zone. Points outside the surface and non-finite
    /// coordinates classify to `None`.
    pub fn classify(surface: Surface, x: f32, y: f32) -> Option<Zone> {
        if surface.is_empty() || !x.is_finite() || !y.is_finite() {
            return None;
        }

        let (px, py) = (x as i64, y as i64);
        let (w, h) = (surface.width as i64, surface.height as i64);
        if px < 0 || py < 0 || px >= w || py >= h {
            return None;
        }

        if py < h / 2 {
            return Some(Zone::Top);
        }

        if px < w / 3 {
            Some(Zone::BottomLeft)
        } else if px < 2 * w / 3 {
            Some(Zone::BottomMiddle)
        } else {
            Some(Zone::BottomRight)
        }
    }
}

/// Phase of a raw touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
}

/// Raw single-pointer touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub x: f32,
    pub y: f32,
}

impl TouchEvent {
    pub fn down(x: f32, y: f32) -> Self {
        Self {
            action: TouchAction::Down,
            x,
            y,
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            action: TouchAction::Move,
            x,
            y,
        }
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self {
            action: TouchAction::Up,
            x,
            y,
        }
    }

    /// Treat the left mouse button as a finger.
    ///
    /// Column/row become x/y, so the surface should be the terminal size in cells.
    pub fn from_mouse(event: MouseEvent) -> Option<Self> {
        let (x, y) = (event.column as f32, event.row as f32);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Self::down(x, y)),
            MouseEventKind::Drag(MouseButton::Left) => Some(Self::moved(x, y)),
            MouseEventKind::Up(MouseButton::Left) => Some(Self::up(x, y)),
            _ => None,
        }
    }
}

/// State of the single logical press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchPressState {
    #[default]
    Idle,
    Pressed {
        pressed_at: u64,
        last_repeat_at: u64,
    },
}

impl TouchPressState {
    pub fn is_pressed(&self) -> bool {
        matches!(self, TouchPressState::Pressed { .. })
    }

    /// Pure transition function: `(state, event, now) -> (state', command)`.
    pub fn step(
        self,
        event: TouchEvent,
        now_ms: u64,
        surface: Surface,
        config: &InputConfig,
    ) -> (Self, Option<Command>) {
        match (self, event.action) {
            (_, TouchAction::Down) => {
                let next = TouchPressState::Pressed {
                    pressed_at: now_ms,
                    last_repeat_at: now_ms,
                };
                let cmd = Zone::classify(surface, event.x, event.y).map(|z| z.command());
                (next, cmd)
            }
            (
                TouchPressState::Pressed {
                    pressed_at,
                    last_repeat_at,
                },
                TouchAction::Move,
            ) => {
                let held = now_ms.saturating_sub(pressed_at);
                let since_repeat = now_ms.saturating_sub(last_repeat_at);
                if held > config.autorepeat_delay_ms && since_repeat > config.autorepeat_rate_ms {
                    let next = TouchPressState::Pressed {
                        pressed_at,
                        last_repeat_at: now_ms,
                    };
                    let cmd = Zone::classify(surface, event.x, event.y).map(|z| z.command());
                    (next, cmd)
                } else {
                    (self, None)
                }
            }
            (TouchPressState::Idle, TouchAction::Move) => (self, None),
            (_, TouchAction::Up) => (TouchPressState::Idle, None),
        }
    }
}

/// Stateful wrapper over [`TouchPressState::step`].
#[derive(Debug, Clone)]
pub struct TouchDecoder {
    state: TouchPressState,
    config: InputConfig,
}

impl TouchDecoder {
    pub fn new() -> Self {
        Self::with_config(InputConfig::default())
    }

    pub fn with_config(config: InputConfig) -> Self {
        Self {
            state: TouchPressState::Idle,
            config,
        }
    }

    pub fn state(&self) -> TouchPressState {
        self.state
    }

    pub fn handle(&mut self, event: TouchEvent, now_ms: u64, surface: Surface) -> Option<Command> {
        let (next, cmd) = self.state.step(event, now_ms, surface, &self.config);
        self.state = next;
        cmd
    }

    pub fn reset(&mut self) {
        self.state = TouchPressState::Idle;
    }
}

impl Default for TouchDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    const SURFACE: Surface = Surface {
        width: 300,
        height: 600,
    };

    #[test]
    fn test_zone_classification() {
        assert_eq!(Zone::classify(SURFACE, 10.0, 10.0), Some(Zone::Top));
        assert_eq!(Zone::classify(SURFACE, 299.0, 299.9), Some(Zone::Top));
        assert_eq!(Zone::classify(SURFACE, 0.0, 300.0), Some(Zone::BottomLeft));
        assert_eq!(Zone::classify(SURFACE, 99.9, 599.0), Some(Zone::BottomLeft));
        assert_eq!(Zone::classify(SURFACE, 100.0, 450.0), Some(Zone::BottomMiddle));
        assert_eq!(Zone::classify(SURFACE, 199.0, 450.0), Some(Zone::BottomMiddle));
        assert_eq!(Zone::classify(SURFACE, 200.0, 450.0), Some(Zone::BottomRight));
        assert_eq!(Zone::classify(SURFACE, 299.0, 599.0), Some(Zone::BottomRight));
    }

    #[test]
    fn test_points_outside_surface_are_ignored() {
        assert_eq!(Zone::classify(SURFACE, 300.0, 10.0), None);
        assert_eq!(Zone::classify(SURFACE, 10.0, 600.0), None);
        assert_eq!(Zone::classify(SURFACE, -1.0, 10.0), None);
        assert_eq!(Zone::classify(Surface::new(0, 600), 0.0, 0.0), None);
        assert_eq!(Zone::classify(Surface::new(300, 0), 0.0, 0.0), None);
    }

    #[test]
    fn test_non_finite_coordinates_are_ignored() {
        assert_eq!(Zone::classify(SURFACE, f32::NAN, 10.0), None);
        assert_eq!(Zone::classify(SURFACE, 10.0, f32::NAN), None);
        assert_eq!(Zone::classify(SURFACE, f32::INFINITY, 500.0), None);
        assert_eq!(Zone::classify(SURFACE, 10.0, f32::NEG_INFINITY), None);

        let mut d = TouchDecoder::new();
        assert_eq!(d.handle(TouchEvent::down(f32::NAN, f32::NAN), 0, SURFACE), None);
        assert!(d.state().is_pressed());
    }

    #[test]
    fn test_press_emits_once_then_waits_for_delay() {
        let mut d = TouchDecoder::new();

        assert_eq!(d.handle(TouchEvent::down(10.0, 10.0), 1_000, SURFACE), Some(Command::Drop));
        assert!(d.state().is_pressed());

        // Inside the initial delay nothing repeats.
        for t in [1_010, 1_100, 1_300, 1_400] {
            assert_eq!(d.handle(TouchEvent::moved(10.0, 10.0), t, SURFACE), None, "t={t}");
        }

        // First sample past the delay repeats.
        assert_eq!(d.handle(TouchEvent::moved(10.0, 10.0), 1_401, SURFACE), Some(Command::Drop));

        // Rate limited afterwards.
        assert_eq!(d.handle(TouchEvent::moved(10.0, 10.0), 1_451, SURFACE), None);
        assert_eq!(d.handle(TouchEvent::moved(10.0, 10.0), 1_452, SURFACE), Some(Command::Drop));
        assert_eq!(d.handle(TouchEvent::moved(10.0, 10.0), 1_512, SURFACE), Some(Command::Drop));
    }

    #[test]
    fn test_repeat_follows_current_zone() {
        let mut d = TouchDecoder::new();

        assert_eq!(
            d.handle(TouchEvent::down(10.0, 500.0), 0, SURFACE),
            Some(Command::MoveLeft)
        );
        assert_eq!(
            d.handle(TouchEvent::moved(150.0, 500.0), 500, SURFACE),
            Some(Command::RotateCounterclockwise)
        );
        assert_eq!(
            d.handle(TouchEvent::moved(250.0, 500.0), 560, SURFACE),
            Some(Command::MoveRight)
        );
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut d = TouchDecoder::new();
        d.handle(TouchEvent::down(250.0, 500.0), 0, SURFACE);

        assert_eq!(d.handle(TouchEvent::up(250.0, 500.0), 450, SURFACE), None);
        assert_eq!(d.state(), TouchPressState::Idle);
        assert_eq!(d.handle(TouchEvent::moved(250.0, 500.0), 600, SURFACE), None);
    }

    #[test]
    fn test_repeat_outside_surface_consumes_slot_without_command() {
        let mut d = TouchDecoder::new();
        d.handle(TouchEvent::down(250.0, 500.0), 0, SURFACE);

        assert_eq!(d.handle(TouchEvent::moved(900.0, 500.0), 500, SURFACE), None);
        assert_eq!(
            d.state(),
            TouchPressState::Pressed {
                pressed_at: 0,
                last_repeat_at: 500
            }
        );
    }

    #[test]
    fn test_new_press_restarts_delay() {
        let mut d = TouchDecoder::with_config(InputConfig::default().with_autorepeat(100, 10));
        d.handle(TouchEvent::down(10.0, 10.0), 0, SURFACE);
        assert_eq!(d.handle(TouchEvent::moved(10.0, 10.0), 150, SURFACE), Some(Command::Drop));

        d.handle(TouchEvent::up(10.0, 10.0), 160, SURFACE);
        assert_eq!(d.handle(TouchEvent::down(10.0, 10.0), 170, SURFACE), Some(Command::Drop));
        assert_eq!(d.handle(TouchEvent::moved(10.0, 10.0), 200, SURFACE), None);
    }

    #[test]
    fn test_mouse_left_button_maps_to_touch() {
        let ev = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(TouchEvent::from_mouse(ev), Some(TouchEvent::down(4.0, 7.0)));

        let drag = MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            ..ev
        };
        assert_eq!(TouchEvent::from_mouse(drag), Some(TouchEvent::moved(4.0, 7.0)));

        let right = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            ..ev
        };
        assert_eq!(TouchEvent::from_mouse(right), None);

        let scroll = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            ..ev
        };
        assert_eq!(TouchEvent::from_mouse(scroll), None);
    }
}
