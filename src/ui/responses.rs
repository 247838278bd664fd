//! Collected responses per shared form

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    let items: Vec<ListItem> = app
        .responses
        .iter()
        .map(|form| {
            ListItem::new(Line::from(vec![
                Span::styled(form.log.form_id.clone(), Style::default().fg(Color::White)),
                Span::styled(
                    format!("  {} responses", form.log.records.len()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Responses · Esc back ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    if !app.responses.is_empty() {
        state.select(Some(app.state.response_index));
    }
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let mut lines = Vec::new();
    if let Some(form) = app.responses.get(app.state.response_index) {
        for record in form.log.records.iter().rev() {
            lines.push(Line::from(Span::styled(
                record.submitted_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            for (label, answer) in form.rows(record) {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {label}: "), Style::default().fg(Color::DarkGray)),
                    Span::styled(answer, Style::default().fg(Color::White)),
                ]));
            }
            lines.push(Line::from(""));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "Share a form with s; submissions show up here",
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(" Submissions ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
        chunks[1],
    );
}
