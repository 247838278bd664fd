//! Layout components (palette sidebar, canvas geometry, status bar)

use crate::app::App;
use formsmith::state::FieldType;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of one palette button
pub const BUTTON_HEIGHT: u16 = 3;

/// Height of one field card on the canvas
pub const CARD_HEIGHT: u16 = 4;

/// Rows above the first card inside the canvas (border + step header)
const CANVAS_HEADER: u16 = 2;

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Palette
            Constraint::Min(0),     // Canvas
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// Palette button areas, in palette order
pub fn palette_rects(sidebar: Rect) -> Vec<(Rect, FieldType)> {
    FieldType::ALL
        .iter()
        .enumerate()
        .filter_map(|(idx, field_type)| {
            let y = sidebar.y + 1 + idx as u16 * BUTTON_HEIGHT;
            (y + BUTTON_HEIGHT <= sidebar.bottom()).then(|| {
                (
                    Rect::new(sidebar.x + 1, y, sidebar.width.saturating_sub(2), BUTTON_HEIGHT),
                    *field_type,
                )
            })
        })
        .collect()
}

/// How many cards fit inside the canvas at once
pub fn card_capacity(canvas: Rect) -> usize {
    let top = canvas.y + CANVAS_HEADER;
    let inner_bottom = canvas.bottom().saturating_sub(1);
    (inner_bottom.saturating_sub(top) / CARD_HEIGHT) as usize
}

/// First visible card, scrolled just far enough to show `selected`
pub fn scroll_offset(canvas: Rect, count: usize, selected: usize) -> usize {
    let capacity = card_capacity(canvas).max(1);
    let max_offset = count.saturating_sub(capacity);
    (selected + 1).saturating_sub(capacity).min(max_offset)
}

/// Visible cards as `(index within the step, area)`, starting at `offset`
pub fn card_rects(canvas: Rect, count: usize, offset: usize) -> Vec<(usize, Rect)> {
    (offset..count)
        .take(card_capacity(canvas))
        .enumerate()
        .map(|(slot, idx)| {
            let y = canvas.y + CANVAS_HEADER + slot as u16 * CARD_HEIGHT;
            (
                idx,
                Rect::new(canvas.x + 1, y, canvas.width.saturating_sub(2), CARD_HEIGHT),
            )
        })
        .collect()
}

fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Index (within the visible step) of the card under a screen position
pub fn card_at(canvas: Rect, count: usize, offset: usize, col: u16, row: u16) -> Option<usize> {
    card_rects(canvas, count, offset)
        .into_iter()
        .find(|(_, rect)| contains(*rect, col, row))
        .map(|(idx, _)| idx)
}

/// Palette entry under a screen position
pub fn palette_at(sidebar: Rect, col: u16, row: u16) -> Option<FieldType> {
    palette_rects(sidebar)
        .into_iter()
        .find(|(rect, _)| contains(*rect, col, row))
        .map(|(_, field_type)| field_type)
}

pub fn in_canvas(canvas: Rect, col: u16, row: u16) -> bool {
    contains(canvas, col, row)
}

/// Draw the field palette
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Add Field ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(block, area);

    let dragging_type = app.palette_drag_type();
    for (idx, (rect, field_type)) in palette_rects(area).into_iter().enumerate() {
        let is_dragging = dragging_type == Some(field_type);
        let style = if is_dragging {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let button = Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", idx + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(field_type.label(), style),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if is_dragging {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                }),
        );
        frame.render_widget(button, rect);
    }
}

/// Draw the status bar on the last row
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let row = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);

    let enabled = Style::default().fg(Color::Cyan);
    let disabled = Style::default().fg(Color::DarkGray);
    let session = &app.session;

    let mut spans = vec![
        Span::styled(
            " u undo ",
            if session.can_undo() { enabled } else { disabled },
        ),
        Span::styled(
            " U redo ",
            if session.can_redo() { enabled } else { disabled },
        ),
        Span::styled(" t templates  s share  v responses  ? keys  q quit ", disabled),
    ];
    if let Some(message) = &app.state.status_message {
        spans.push(Span::styled(
            format!("│ {message}"),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), row);
}
