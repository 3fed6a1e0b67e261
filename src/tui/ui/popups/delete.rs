use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::state::AppState;
use crate::tui::ui::{COLOR_ERROR, centered};

pub fn render(f: &mut Frame, size: Rect, state: &AppState) {
    let area = centered(size, 50, 30);

    let address = state
        .hosts
        .get(state.confirm_index)
        .map(|h| h.address.clone())
        .unwrap_or_default();

    let popup = Paragraph::new(vec![
        Line::from(Span::styled(
            "Delete Host",
            Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Delete host '{address}' ?")),
        Line::from(""),
        Line::from("Y: Yes    N/Esc: No"),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Confirm "));

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}
