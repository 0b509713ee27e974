//! Main render function that dispatches to widgets.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use super::app::App;
use super::widgets;

/// Render the entire TUI frame.
pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    // Vertical layout: header (1) + content (flex) + status (1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header bar
            Constraint::Min(5),    // content
            Constraint::Length(1), // status bar
        ])
        .split(size);

    widgets::header_bar::render(frame, app, vertical[0]);

    // Input on top, result below once revealed
    if app.controller.state().result_view().is_some() {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(vertical[1]);
        widgets::input_panel::render(frame, app, split[0]);
        widgets::result_panel::render(frame, app, split[1]);
    } else {
        widgets::input_panel::render(frame, app, vertical[1]);
    }

    widgets::status_bar::render(frame, app, vertical[2]);

    // Popups (rendered on top of everything)
    if app.show_help {
        widgets::help_popup::render(frame);
    }
    widgets::path_prompt::render(frame, app);
    widgets::loading_popup::render(frame, app);
}
