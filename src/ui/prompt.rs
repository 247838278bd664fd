//! Centered single-line text prompt

use formsmith::state::TextInput;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const MAX_WIDTH: u16 = 60;
const HEIGHT: u16 = 6;

/// Dialog area centered in `area`
pub fn prompt_area(area: Rect) -> Rect {
    let width = MAX_WIDTH.min(area.width);
    let height = HEIGHT.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn draw(frame: &mut Frame, area: Rect, input: &TextInput) {
    let dialog_area = prompt_area(area);

    // Clear the area behind the dialog
    frame.render_widget(Clear, dialog_area);

    let content = vec![
        Line::from(Span::styled(
            input.target.title(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(input.buffer.as_str(), Style::default().fg(Color::White)),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::raw(" save  "),
            Span::styled("Esc", Style::default().fg(Color::Cyan)),
            Span::raw(" cancel"),
        ]),
    ];

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(dialog, dialog_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_area_is_centered() {
        let area = prompt_area(Rect::new(20, 0, 80, 30));
        assert_eq!(area, Rect::new(30, 12, 60, 6));
    }

    #[test]
    fn test_prompt_area_shrinks_on_small_screens() {
        let area = prompt_area(Rect::new(0, 0, 40, 4));
        assert_eq!(area.width, 40);
        assert_eq!(area.height, 4);
    }
}
