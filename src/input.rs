use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::grid::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    /// Start a game, or play again after game over.
    Start,
    Quit,
    None,
}

#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        InputHandler
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),

            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => KeyAction::Steer(Direction::Up),
                's' => KeyAction::Steer(Direction::Down),
                'a' => KeyAction::Steer(Direction::Left),
                'd' => KeyAction::Steer(Direction::Right),
                ' ' | 'r' => KeyAction::Start,
                'q' => KeyAction::Quit,
                _ => KeyAction::None,
            },

            KeyCode::Enter => KeyAction::Start,
            KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}
