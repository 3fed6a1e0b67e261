use crossterm::event::KeyCode;

use crate::sort::SORT_CHOICES;
use crate::tui::state::AppState;
use crate::tui::types::OptionsFocus;

/// Keys inside the options popup. The interval editor and the sort selector
/// are focused one at a time; Enter on the interval advances, Enter on the
/// selector commits, Esc cancels without applying anything.
pub fn handle(state: &mut AppState, code: KeyCode) {
    match state.options.focus {
        OptionsFocus::Interval => match code {
            KeyCode::Esc => state.cancel_dialog(),
            KeyCode::Tab | KeyCode::Enter => state.options.focus = OptionsFocus::SortKey,

            KeyCode::Backspace => state.options.interval.backspace(),
            KeyCode::Delete => state.options.interval.delete(),
            KeyCode::Left => state.options.interval.move_left(),
            KeyCode::Right => state.options.interval.move_right(),
            KeyCode::Home => state.options.interval.move_home(),
            KeyCode::End => state.options.interval.move_end(),
            KeyCode::Char(ch) => state.options.interval.insert(ch),

            _ => {}
        },

        OptionsFocus::SortKey => match code {
            KeyCode::Esc => state.cancel_dialog(),
            KeyCode::Tab => state.options.focus = OptionsFocus::Interval,
            KeyCode::Enter => state.commit_options(),

            KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
                state.options.sort_index = state.options.sort_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
                if state.options.sort_index + 1 < SORT_CHOICES.len() {
                    state.options.sort_index += 1;
                }
            }

            _ => {}
        },
    }
}
