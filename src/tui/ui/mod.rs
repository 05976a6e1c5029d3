mod footer;
mod header;
mod output_panel;
mod settings_panel;
mod typing_panel;

use ratatui::prelude::*;

use crate::tui::app::App;

pub fn draw_ui(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Header
            Constraint::Min(6),     // Typing area
            Constraint::Length(6),  // Settings
            Constraint::Length(10), // Output log
            Constraint::Length(2),  // Footer
        ])
        .split(frame.area());

    header::render(frame, app, root[0]);
    typing_panel::render(frame, app, root[1]);
    settings_panel::render(frame, app, root[2]);
    output_panel::render(frame, app, root[3]);
    footer::render(frame, app, root[4]);
}
