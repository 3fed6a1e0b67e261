use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::sort::SORT_CHOICES;
use crate::tui::state::AppState;
use crate::tui::types::OptionsFocus;
use crate::tui::ui::{COLOR_ACTIVE, COLOR_BRAND, COLOR_LABEL, COLOR_MUTED, centered};

pub fn render(f: &mut Frame, size: Rect, state: &AppState) {
    let area = centered(size, 50, 50);

    let interval_focused = state.options.focus == OptionsFocus::Interval;
    let interval_value = if interval_focused {
        state.options.interval.display_with_cursor()
    } else {
        state.options.interval.value.clone()
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        "Options",
        Style::default().fg(COLOR_BRAND).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw(if interval_focused { "> " } else { "  " }),
        Span::styled("Interval (0.5-5 s): ", Style::default().fg(COLOR_LABEL)),
        Span::styled(
            interval_value,
            if interval_focused {
                Style::default().fg(COLOR_ACTIVE)
            } else {
                Style::default()
            },
        ),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Sort by:", Style::default().fg(COLOR_LABEL))));

    for (i, key) in SORT_CHOICES.iter().enumerate() {
        let selected = i == state.options.sort_index;
        let marker = if selected { "> " } else { "  " };
        let style = match (selected, state.options.focus) {
            (true, OptionsFocus::SortKey) => {
                Style::default().fg(COLOR_ACTIVE).add_modifier(Modifier::BOLD)
            }
            (true, _) => Style::default().add_modifier(Modifier::BOLD),
            _ => Style::default().fg(COLOR_MUTED),
        };
        lines.push(Line::from(vec![Span::raw(marker), Span::styled(key.to_string(), style)]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Tab", Style::default().fg(COLOR_BRAND)),
        Span::styled(":switch  ", Style::default().fg(COLOR_LABEL)),
        Span::styled("Up/Down", Style::default().fg(COLOR_BRAND)),
        Span::styled(":choose  ", Style::default().fg(COLOR_LABEL)),
        Span::styled("Enter", Style::default().fg(COLOR_BRAND)),
        Span::styled(":confirm  ", Style::default().fg(COLOR_LABEL)),
        Span::styled("Esc", Style::default().fg(COLOR_BRAND)),
        Span::styled(":cancel", Style::default().fg(COLOR_LABEL)),
    ]));

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Options ")
            .border_style(Style::default().fg(COLOR_BRAND)),
    );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}
