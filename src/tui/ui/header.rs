use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let state = app.engine_state();

    let path_display = match &app.settings_path {
        Some(path) => {
            let display = path.display().to_string();
            let count = display.chars().count();
            if count > 45 {
                let tail: String = display.chars().skip(count - 42).collect();
                format!("...{}", tail)
            } else {
                display
            }
        }
        None => "(no settings path)".to_string(),
    };

    let line = Line::from(vec![
        Span::styled("kahako ", t.text_primary().add_modifier(Modifier::BOLD)),
        Span::styled(format!("[{}] ", state.label()), t.state_badge(state)),
        Span::styled(format!(" {} ", app.simulator.mode()), t.text_secondary()),
        Span::styled(path_display, t.text_muted()),
        Span::raw(" "),
        Span::styled("ctrl-q:quit", t.key_hint()),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Left), area);
}
