//! UI module for rendering the TUI

mod canvas;
pub mod layout;
mod prompt;
mod responses;
mod templates;

use crate::app::App;
use formsmith::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (sidebar_area, main_area) = layout::create_layout(area);

    layout::draw_sidebar(frame, sidebar_area, app);

    match app.state.current_view {
        View::Editor => canvas::draw(frame, main_area, app),
        View::Templates => templates::draw(frame, main_area, app),
        View::Responses => responses::draw(frame, main_area, app),
    }

    if let Some(input) = &app.state.input {
        prompt::draw(frame, main_area, input);
    }

    layout::draw_status_bar(frame, app);
}
