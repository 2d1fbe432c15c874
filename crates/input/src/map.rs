//! Key mapping from terminal events to intents.

use crate::types::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key to the intent it drives, if any.
pub fn map_key(key: KeyEvent) -> Option<Intent> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Intent::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Intent::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Intent::MoveDown),

        // Rotation. Rotate-right is not bound to bare Shift: most terminals never report it.
        KeyCode::Char('/') | KeyCode::Char('z') | KeyCode::Char('Z') => Some(Intent::RotateLeft),
        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => Some(Intent::RotateRight),

        // Start / pause / restart after game over
        KeyCode::Enter => Some(Intent::StartOrPause),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::ModifierKeyCode;

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), Some(Intent::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Right)), Some(Intent::MoveRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Down)), Some(Intent::MoveDown));

        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('A'))), Some(Intent::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('d'))), Some(Intent::MoveRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('s'))), Some(Intent::MoveDown));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('/'))), Some(Intent::RotateLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('z'))), Some(Intent::RotateLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), Some(Intent::RotateRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('x'))), Some(Intent::RotateRight));
        // Bare Shift is not a rotation key
        let shift = KeyCode::Modifier(ModifierKeyCode::LeftShift);
        assert_eq!(map_key(KeyEvent::from(shift)), None);
    }

    #[test]
    fn test_start_and_unmapped_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), Some(Intent::StartOrPause));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Tab)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
