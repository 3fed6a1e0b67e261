use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::state::AppState;

/// Keys available in the list view. Returns true on a quit request.
pub fn handle(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Ok(true);
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            return Ok(true);
        }

        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => state.move_down(),

        KeyCode::Char('a') | KeyCode::Char('A') => state.open_add(),
        KeyCode::Char('e') | KeyCode::Char('E') => state.open_edit(),
        KeyCode::Char('d') | KeyCode::Char('D') => state.open_delete(),

        KeyCode::Char('s') | KeyCode::Char('S') => state.save_hosts(),
        KeyCode::Char('r') | KeyCode::Char('R') => state.reload_hosts(),
        KeyCode::Char('o') | KeyCode::Char('O') => state.open_options(),

        _ => {}
    }

    Ok(false)
}
