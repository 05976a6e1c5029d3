use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Pane};
use crate::tui::theme::{theme, Theme};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    if let Some(prompt) = &app.confirm_prompt {
        render_confirm_prompt(frame, app, area, prompt, t);
    } else {
        render_status_and_hints(frame, app, area, t);
    }
}

fn render_confirm_prompt(frame: &mut Frame, app: &App, area: Rect, prompt: &str, t: &Theme) {
    let lines = vec![
        Line::styled(format!("Status: {}", app.status), t.status_message()),
        Line::from(vec![
            Span::styled(format!("CONFIRM: {} ", prompt), t.confirm_prompt()),
            Span::styled("[", t.text_muted()),
            Span::styled("y", t.key_hint()),
            Span::styled("/", t.text_muted()),
            Span::styled("Enter", t.key_hint()),
            Span::styled(":yes  ", t.text_muted()),
            Span::styled("n", t.key_hint()),
            Span::styled("/", t.text_muted()),
            Span::styled("Esc", t.key_hint()),
            Span::styled(":no]", t.text_muted()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_and_hints(frame: &mut Frame, app: &App, area: Rect, t: &Theme) {
    let line1 = Line::styled(format!("Status: {}", app.status), t.status_message());

    let pane_hint = |label: &'static str, pane: Pane| {
        Span::styled(
            label,
            if app.focused_pane == pane {
                t.key_hint()
            } else {
                t.text_muted()
            },
        )
    };

    let mut spans = vec![
        Span::styled("Tab", t.key_hint()),
        Span::styled(":", t.text_muted()),
        pane_hint("Type", Pane::Typing),
        Span::styled(" ", t.text_muted()),
        pane_hint("Settings", Pane::Settings),
        Span::styled(" ", t.text_muted()),
        pane_hint("Output", Pane::Output),
        Span::styled("  ", t.text_muted()),
    ];
    match app.focused_pane {
        Pane::Typing => spans.extend([
            Span::styled("Alt-key", t.key_hint()),
            Span::styled(":chord  ", t.text_muted()),
            Span::styled("Esc", t.key_hint()),
            Span::styled(":click away  ", t.text_muted()),
            Span::styled("F2", t.key_hint()),
            Span::styled(":compose  ", t.text_muted()),
            Span::styled("Ctrl-L", t.key_hint()),
            Span::styled(":clear", t.text_muted()),
        ]),
        Pane::Settings | Pane::Output => spans.extend([
            Span::styled("arrows", t.key_hint()),
            Span::styled(":navigate  ", t.text_muted()),
            Span::styled("q", t.key_hint()),
            Span::styled(":quit", t.text_muted()),
        ]),
    }

    frame.render_widget(Paragraph::new(vec![line1, Line::from(spans)]), area);
}
