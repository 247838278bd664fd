//! Canvas: the current step's field cards

use super::layout::{card_rects, scroll_offset};
use crate::app::App;
use formsmith::state::{Field, FieldType};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let steps = app.session.steps();
    let title = format!(
        " Form · Step {} of {} ",
        steps.current() + 1,
        steps.step_count().max(1)
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(block, area);

    let fields = steps.current_fields();
    let header = Rect::new(area.x + 1, area.y + 1, area.width.saturating_sub(2), 1);
    if fields.is_empty() {
        frame.render_widget(
            Paragraph::new("Press 1-5 or drag a field type from the palette")
                .style(Style::default().fg(Color::DarkGray)),
            header,
        );
        return;
    }

    let scroll = scroll_offset(area, fields.len(), app.state.selected_index);
    let cards = card_rects(area, fields.len(), scroll);
    let below = fields.len().saturating_sub(scroll + cards.len());

    let mut nav = vec![
        Span::styled(
            "◀ Shift+Tab ",
            if steps.has_prev() {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        ),
        Span::styled(
            " Tab ▶",
            if steps.has_next() {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        ),
    ];
    if scroll > 0 {
        nav.push(Span::styled(
            format!("  ▲ {scroll} above"),
            Style::default().fg(Color::Yellow),
        ));
    }
    if below > 0 {
        nav.push(Span::styled(
            format!("  ▼ {below} below"),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(nav)), header);

    let dragged = app.session.drag().dragged_id();
    for (idx, rect) in cards {
        let field = &fields[idx];
        let is_active = idx == app.state.selected_index;
        let is_dragging = dragged == Some(&field.id);
        draw_card(frame, rect, field, is_active, is_dragging);
    }
}

/// Draw one field card
fn draw_card(frame: &mut Frame, area: Rect, field: &Field, is_active: bool, is_dragging: bool) {
    let border_style = if is_dragging {
        Style::default().fg(Color::Magenta)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = if field.required {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    };

    let mut details = vec![Span::styled(
        format!("[{}] ", field.field_type),
        Style::default().fg(Color::DarkGray),
    )];
    details.push(Span::styled(
        preview(field),
        Style::default().fg(Color::White),
    ));

    let mut lines = vec![Line::from(details)];
    if let Some(help) = &field.help_text {
        lines.push(Line::from(Span::styled(
            help.clone(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

/// One-line rendering of what the input would look like
fn preview(field: &Field) -> String {
    match field.field_type {
        FieldType::Text | FieldType::Textarea => {
            let mut out = field
                .placeholder
                .clone()
                .unwrap_or_else(|| "(no placeholder)".to_string());
            match (field.min_length, field.max_length) {
                (Some(min), Some(max)) => out.push_str(&format!("  {min}..{max} chars")),
                (Some(min), None) => out.push_str(&format!("  ≥{min} chars")),
                (None, Some(max)) => out.push_str(&format!("  ≤{max} chars")),
                (None, None) => {}
            }
            if field.pattern.is_some() {
                out.push_str("  /pattern/");
            }
            out
        }
        FieldType::Checkbox if field.is_checkbox_group() => field
            .options
            .iter()
            .map(|opt| format!("☐ {opt}"))
            .collect::<Vec<_>>()
            .join("  "),
        FieldType::Checkbox => {
            if field.checked.unwrap_or(false) {
                "☑ checked by default".to_string()
            } else {
                "☐".to_string()
            }
        }
        FieldType::Dropdown if field.options.is_empty() => "Select... (no options)".to_string(),
        FieldType::Dropdown => format!("Select... {}", field.options.join(" | ")),
        FieldType::Date => "yyyy-mm-dd".to_string(),
    }
}
