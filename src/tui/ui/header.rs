use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use super::{COLOR_BRAND, COLOR_ERROR, COLOR_INFO, COLOR_LABEL, COLOR_MUTED, COLOR_SUCCESS};
use crate::tui::state::{AppState, StatusLevel};

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    // Row 1: brand + live settings
    let title_spans = vec![
        Span::styled("MPING ", Style::default().fg(COLOR_BRAND).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("{} hosts ", state.hosts.len()),
            Style::default().fg(COLOR_LABEL),
        ),
        Span::styled(
            format!("[every {:.1}s] ", state.interval.as_secs_f64()),
            Style::default().fg(COLOR_MUTED),
        ),
        Span::styled(format!("[sort: {}]", state.sort_key), Style::default().fg(COLOR_MUTED)),
    ];

    // Row 2: key legend
    let legend = Line::from(Span::styled(
        "A Add   E Edit   D Delete   S Save   R Reload   O Options   Q Quit",
        Style::default().fg(COLOR_LABEL).add_modifier(Modifier::BOLD),
    ));

    // Row 3: transient status message
    let message = match &state.status_message {
        Some((msg, _, level)) => {
            let color = match level {
                StatusLevel::Success => COLOR_SUCCESS,
                StatusLevel::Error => COLOR_ERROR,
                StatusLevel::Info => COLOR_INFO,
            };
            Line::from(Span::styled(msg.clone(), Style::default().fg(color)))
        }
        None => Line::from(""),
    };

    let header = Paragraph::new(vec![Line::from(title_spans), legend, message]);

    f.render_widget(Clear, area);
    f.render_widget(header, area);
}
