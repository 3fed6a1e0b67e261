use std::time::Instant;

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState};

use super::{COLOR_BRAND, COLOR_ERROR, COLOR_LABEL, COLOR_MUTED, COLOR_SUCCESS};
use crate::tui::state::AppState;
use crate::tui::types::Mode;

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Hosts ")
        .border_style(Style::default().fg(COLOR_BRAND));

    if state.hosts.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No hosts configured", Style::default().fg(COLOR_MUTED))),
            Line::from(""),
            Line::from(Span::styled("Press 'a' to add a host", Style::default().fg(COLOR_LABEL))),
        ])
        .block(block);

        f.render_widget(Clear, area);
        f.render_widget(empty, area);
        return;
    }

    let now = Local::now();
    let mono_now = Instant::now();

    let rows: Vec<Row> = state
        .hosts
        .iter()
        .zip(&state.records)
        .enumerate()
        .map(|(i, (host, record))| {
            let (status, status_color) = if record.reachable {
                ("UP", COLOR_SUCCESS)
            } else {
                ("DOWN", COLOR_ERROR)
            };
            let reply = record
                .latency_ms
                .map(|ms| format!("{ms:.1}"))
                .unwrap_or_else(|| "-".into());
            let change = record
                .last_change
                .map(|at| at.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "-".into());
            let age = record
                .age_secs(now)
                .map(|secs| secs.to_string())
                .unwrap_or_else(|| "-".into());

            let mut row = Row::new(vec![
                Cell::from(host.address.clone()),
                Cell::from(host.description.clone()),
                Cell::from(Span::styled(
                    status,
                    Style::default().fg(status_color).add_modifier(Modifier::BOLD),
                )),
                Cell::from(reply),
                Cell::from(change),
                Cell::from(age),
            ]);

            // Rows with an open flash window get a loud background, unless
            // the selection highlight already covers them.
            let selected = state.mode == Mode::List && i == state.cursor;
            if record.is_flashing(mono_now) && !selected {
                row = row.style(
                    Style::default().bg(status_color).add_modifier(Modifier::BOLD),
                );
            }
            row
        })
        .collect();

    let widths = [
        Constraint::Min(18),
        Constraint::Min(14),
        Constraint::Length(6),
        Constraint::Length(9),
        Constraint::Length(11),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(["HOST", "DESC", "STATUS", "REPLY(ms)", "LAST CHANGE", "AGE"])
                .style(Style::default().fg(COLOR_LABEL).add_modifier(Modifier::BOLD)),
        )
        .block(block)
        .highlight_style(Style::default().bg(Color::Blue));

    let mut table_state = TableState::default();
    table_state.select(Some(state.cursor.min(state.hosts.len() - 1)));

    f.render_widget(Clear, area);
    f.render_stateful_widget(table, area, &mut table_state);
}
