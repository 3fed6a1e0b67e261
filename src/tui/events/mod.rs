pub mod form;
pub mod list;
pub mod options;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};

use crate::tui::state::AppState;
use crate::tui::types::Mode;

/// Handle one terminal event and return true if the program should quit.
/// Resize is bookkeeping only and applies in every mode; key presses are
/// routed to the active mode's handler.
pub fn handle_event(state: &mut AppState, event: Event) -> Result<bool> {
    match event {
        Event::Key(k) => {
            // Only process key press events, ignore releases and repeats
            if k.kind != KeyEventKind::Press {
                return Ok(false);
            }
            match state.mode {
                Mode::List => return list::handle(state, k),
                Mode::Add | Mode::Edit => form::handle(state, k.code),
                Mode::Options => options::handle(state, k.code),
                Mode::ConfirmDelete => match k.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => state.confirm_delete(),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                        state.cancel_dialog()
                    }
                    _ => {}
                },
            }
            Ok(false)
        }

        Event::Resize(width, height) => {
            state.set_viewport(width, height);
            Ok(false)
        }

        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hosts::Host;
    use crate::sort::SortKey;
    use crate::tui::types::FormField;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use std::path::PathBuf;
    use std::time::Duration;

    fn state_with(addresses: &[&str]) -> AppState {
        let hosts = addresses
            .iter()
            .map(|a| Host { address: a.to_string(), description: String::new() })
            .collect();
        AppState::new(hosts, PathBuf::from("hosts.txt"), Duration::from_secs(5), SortKey::Name)
    }

    fn press(state: &mut AppState, code: KeyCode) -> bool {
        handle_event(state, Event::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap()
    }

    #[test]
    fn test_quit_from_list() {
        let mut state = state_with(&["a"]);
        assert!(press(&mut state, KeyCode::Char('q')));
    }

    #[test]
    fn test_navigation_clamps_at_ends() {
        let mut state = state_with(&["a", "b"]);
        press(&mut state, KeyCode::Up);
        assert_eq!(state.cursor, 0);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Down);
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn test_dialog_round_trips() {
        let mut state = state_with(&["a"]);

        press(&mut state, KeyCode::Char('a'));
        assert_eq!(state.mode, Mode::Add);
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.mode, Mode::List);

        press(&mut state, KeyCode::Char('e'));
        assert_eq!(state.mode, Mode::Edit);
        assert_eq!(state.form.address.value, "a");
        press(&mut state, KeyCode::Esc);

        press(&mut state, KeyCode::Char('d'));
        assert_eq!(state.mode, Mode::ConfirmDelete);
        press(&mut state, KeyCode::Char('n'));
        assert_eq!(state.mode, Mode::List);
        assert_eq!(state.hosts.len(), 1);

        press(&mut state, KeyCode::Char('o'));
        assert_eq!(state.mode, Mode::Options);
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.mode, Mode::List);
    }

    #[test]
    fn test_edit_and_delete_need_a_selection() {
        let mut state = state_with(&[]);
        press(&mut state, KeyCode::Char('e'));
        assert_eq!(state.mode, Mode::List);
        press(&mut state, KeyCode::Char('d'));
        assert_eq!(state.mode, Mode::List);
    }

    #[test]
    fn test_form_typing_and_focus_cycle() {
        let mut state = state_with(&[]);
        press(&mut state, KeyCode::Char('a'));
        press(&mut state, KeyCode::Char('x'));
        assert_eq!(state.form.address.value, "x");

        press(&mut state, KeyCode::Tab);
        assert_eq!(state.form.focus, FormField::Description);
        press(&mut state, KeyCode::Char('y'));
        assert_eq!(state.form.description.value, "y");

        // Enter on the description confirms.
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.mode, Mode::List);
        assert_eq!(state.hosts.len(), 1);
        assert_eq!(state.hosts[0].address, "x");
    }

    #[test]
    fn test_enter_on_address_advances_focus() {
        let mut state = state_with(&[]);
        press(&mut state, KeyCode::Char('a'));
        press(&mut state, KeyCode::Char('h'));
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.mode, Mode::Add);
        assert_eq!(state.form.focus, FormField::Description);
    }

    #[test]
    fn test_resize_updates_viewport_only() {
        let mut state = state_with(&["a"]);
        handle_event(&mut state, Event::Resize(120, 40)).unwrap();
        assert_eq!((state.width, state.height), (120, 40));
        assert_eq!(state.hosts.len(), 1);
    }
}
