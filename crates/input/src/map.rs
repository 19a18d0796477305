//! Key mapping from terminal events to game commands.
//!
//! Several physical keys alias to the same command: arrow keys for d-pad
//! style play and letters for one-handed play.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// Map a key code to a command. Unknown keys map to `None`.
pub fn decode_key_code(code: KeyCode) -> Option<Command> {
    match code {
        // Rotation
        KeyCode::Down | KeyCode::Char('k') | KeyCode::Char('K') => Some(Command::RotateClockwise),
        KeyCode::Up | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Command::RotateCounterclockwise)
        }

        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(Command::MoveRight),

        // Drop
        KeyCode::Char(' ')
        | KeyCode::Enter
        | KeyCode::Char('q')
        | KeyCode::Char('Q')
        | KeyCode::Char('p')
        | KeyCode::Char('P') => Some(Command::Drop),

        _ => None,
    }
}

/// Map a key event to a command.
///
/// Presses and terminal auto-repeats are decoded; releases never produce a command.
pub fn decode_key(key: KeyEvent) -> Option<Command> {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => decode_key_code(key.code),
        KeyEventKind::Release => None,
    }
}
