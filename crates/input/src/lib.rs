//! Keyboard handling: maps crossterm key events to user actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use blockfall_types::UserAction;

/// Map a key press to the user action it drives, if any.
///
/// Arrows move, Down is an instant drop, Space rotates, `p` pauses,
/// `r`/Enter (re)starts, `q` quits.
pub fn map_key(key: KeyEvent) -> Option<UserAction> {
    match key.code {
        KeyCode::Left => Some(UserAction::MoveLeft),
        KeyCode::Right => Some(UserAction::MoveRight),
        KeyCode::Down => Some(UserAction::MoveDown),
        KeyCode::Up => Some(UserAction::MoveUp),

        KeyCode::Char(' ') => Some(UserAction::Rotate),

        KeyCode::Char('p') | KeyCode::Char('P') => Some(UserAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(UserAction::Start),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(UserAction::Terminate),

        _ => None,
    }
}

/// Whether this key should end the process (after a Terminate submit).
pub fn is_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
