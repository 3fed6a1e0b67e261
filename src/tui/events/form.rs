use crossterm::event::KeyCode;

use crate::tui::state::AppState;
use crate::tui::types::FormField;

/// Keys inside the add/edit popup. Tab advances focus; Enter on the address
/// field advances, Enter on the description field confirms; Esc cancels and
/// discards the draft.
pub fn handle(state: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Esc => state.cancel_dialog(),

        KeyCode::Tab | KeyCode::BackTab => state.form.advance_focus(),

        KeyCode::Enter => {
            if state.form.focus == FormField::Address {
                state.form.advance_focus();
            } else {
                state.commit_form();
            }
        }

        KeyCode::Backspace => state.form.focused_mut().backspace(),
        KeyCode::Delete => state.form.focused_mut().delete(),
        KeyCode::Left => state.form.focused_mut().move_left(),
        KeyCode::Right => state.form.focused_mut().move_right(),
        KeyCode::Home => state.form.focused_mut().move_home(),
        KeyCode::End => state.form.focused_mut().move_end(),

        KeyCode::Char(ch) => state.form.focused_mut().insert(ch),

        _ => {}
    }
}
