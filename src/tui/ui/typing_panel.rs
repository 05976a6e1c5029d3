use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::{App, Pane};
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let focused = app.focused_pane == Pane::Typing;

    let block = Block::default()
        .title(t.panel_title("TYPE HERE", focused))
        .borders(Borders::ALL)
        .border_style(t.panel_border(focused))
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Plain
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = app.text();
    if text.is_empty() && !focused {
        let empty = Paragraph::new(Line::styled(
            "Try `a, \\o, `' or Alt-e. Tab moves between panes.",
            t.text_muted(),
        ));
        frame.render_widget(empty, inner);
        return;
    }

    let lines = text_lines(&text, app.cursor(), focused);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// Split the text into lines, highlighting the character at `cursor`
fn text_lines(text: &str, cursor: usize, show_cursor: bool) -> Vec<Line<'static>> {
    let t = theme();
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();

    for (i, ch) in text.chars().enumerate() {
        if show_cursor && i == cursor {
            spans.push(Span::styled(std::mem::take(&mut run), t.text_primary()));
            let shown = if ch == '\n' { ' ' } else { ch };
            spans.push(Span::styled(shown.to_string(), t.cursor()));
        }
        if ch == '\n' {
            spans.push(Span::styled(std::mem::take(&mut run), t.text_primary()));
            lines.push(Line::from(std::mem::take(&mut spans)));
            continue;
        }
        if !(show_cursor && i == cursor) {
            run.push(ch);
        }
    }

    spans.push(Span::styled(run, t.text_primary()));
    if show_cursor && cursor >= text.chars().count() {
        spans.push(Span::styled(" ", t.cursor()));
    }
    lines.push(Line::from(spans));
    lines
}
