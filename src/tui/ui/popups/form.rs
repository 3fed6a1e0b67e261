use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::state::AppState;
use crate::tui::types::{FormField, Mode};
use crate::tui::ui::{COLOR_ACTIVE, COLOR_BRAND, COLOR_LABEL, centered};

pub fn render(f: &mut Frame, size: Rect, state: &AppState) {
    let area = centered(size, 60, 40);

    let title = if state.mode == Mode::Add { " Add Host " } else { " Edit Host " };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        title.trim(),
        Style::default().fg(COLOR_BRAND).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    let fields = [
        (FormField::Address, "Host", &state.form.address),
        (FormField::Description, "Desc", &state.form.description),
    ];
    for (field, label, input) in fields {
        let focused = state.form.focus == field;
        let prefix = if focused { "> " } else { "  " };
        let value = if focused { input.display_with_cursor() } else { input.value.clone() };
        let value_style = if focused {
            Style::default().fg(COLOR_ACTIVE)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::raw(prefix),
            Span::styled(format!("{label}: "), Style::default().fg(COLOR_LABEL)),
            Span::styled(value, value_style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Tab", Style::default().fg(COLOR_BRAND)),
        Span::styled(":switch  ", Style::default().fg(COLOR_LABEL)),
        Span::styled("Enter", Style::default().fg(COLOR_BRAND)),
        Span::styled(":confirm  ", Style::default().fg(COLOR_LABEL)),
        Span::styled("Esc", Style::default().fg(COLOR_BRAND)),
        Span::styled(":cancel", Style::default().fg(COLOR_LABEL)),
    ]));

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(COLOR_BRAND)),
    );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}
