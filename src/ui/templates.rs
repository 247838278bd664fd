//! Template picker

use crate::app::App;
use formsmith::storage::predefined_templates;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let builtin = predefined_templates().len();
    let items: Vec<ListItem> = app
        .templates
        .iter()
        .enumerate()
        .map(|(idx, template)| {
            let kind = if idx < builtin { "built-in" } else { "custom" };
            ListItem::new(Line::from(vec![
                Span::styled(template.name.clone(), Style::default().fg(Color::White)),
                Span::styled(
                    format!("  {} fields · {kind}", template.fields.len()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Templates · Enter load · x delete · Esc back ")
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
    state.select(Some(app.state.template_index));
    frame.render_stateful_widget(list, area, &mut state);
}
