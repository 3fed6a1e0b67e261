pub mod header;
pub mod popups;
pub mod table;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;

use crate::tui::state::AppState;
use crate::tui::types::Mode;

pub const COLOR_BRAND: Color = Color::Green;
pub const COLOR_ACTIVE: Color = Color::Cyan;
pub const COLOR_LABEL: Color = Color::Gray;
pub const COLOR_MUTED: Color = Color::DarkGray;
pub const COLOR_SUCCESS: Color = Color::Green;
pub const COLOR_ERROR: Color = Color::Red;
pub const COLOR_INFO: Color = Color::Magenta;

/// Render the entire UI
pub fn render(f: &mut Frame, state: &mut AppState) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(size);

    header::render(f, chunks[0], state);
    table::render(f, chunks[1], state);

    // Render popups (overlays)
    match state.mode {
        Mode::Add | Mode::Edit => popups::form::render(f, size, state),
        Mode::ConfirmDelete => popups::delete::render(f, size, state),
        Mode::Options => popups::options::render(f, size, state),
        Mode::List => {}
    }
}

/// Centered popup area, sized as fractions of the full frame.
pub(super) fn centered(size: Rect, width_pct: u16, height_pct: u16) -> Rect {
    let vchunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - height_pct) / 2),
            Constraint::Percentage(height_pct),
            Constraint::Percentage((100 - height_pct) / 2),
        ])
        .split(size);

    let hchunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_pct) / 2),
            Constraint::Percentage(width_pct),
            Constraint::Percentage((100 - width_pct) / 2),
        ])
        .split(vchunks[1]);

    hchunks[1]
}
