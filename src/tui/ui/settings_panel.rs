use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::{App, Pane, SettingEntry};
use crate::tui::theme::theme;

const COL_WIDTH: usize = 26;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let focused = app.focused_pane == Pane::Settings;

    let block = Block::default()
        .title(t.panel_title("SETTINGS", focused))
        .borders(Borders::ALL)
        .border_style(t.panel_border(focused))
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Plain
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    render_settings_grid(frame, app, inner, focused);
}

fn render_settings_grid(frame: &mut Frame, app: &App, area: Rect, focused: bool) {
    let t = theme();

    // Row-first grid so Up/Down order matches reading order
    let num_cols = (area.width as usize / COL_WIDTH).clamp(1, 4);
    let mut lines: Vec<Line<'static>> = Vec::new();

    for (row, chunk) in SettingEntry::ALL.chunks(num_cols).enumerate() {
        let mut spans = Vec::new();
        for (col, entry) in chunk.iter().enumerate() {
            let idx = row * num_cols + col;
            let sel = focused && app.setting_index == idx;

            spans.push(Span::styled(
                if sel { ">" } else { " " },
                Style::default().fg(if sel {
                    t.palette.accent_primary
                } else {
                    t.palette.text_muted
                }),
            ));

            let cell = if entry.is_toggle() {
                let enabled = app.setting_enabled(*entry);
                spans.push(Span::styled(
                    if enabled { "[x]" } else { "[ ]" },
                    t.checkbox(enabled),
                ));
                format!(" {}", entry.label())
            } else {
                format!("{}: [{}]", entry.label(), app.setting_value(*entry))
            };
            let used = cell.chars().count() + if entry.is_toggle() { 4 } else { 1 };
            let padded = format!("{}{}", cell, " ".repeat(COL_WIDTH.saturating_sub(used)));
            spans.push(Span::styled(
                padded,
                if sel {
                    t.selected()
                } else {
                    t.setting_value(app.setting_enabled(*entry))
                },
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(vec![
        Span::styled("Enter", t.key_hint()),
        Span::styled(":change  ", t.text_muted()),
        Span::styled("s", t.key_hint()),
        Span::styled(":save  ", t.text_muted()),
        Span::styled("r", t.key_hint()),
        Span::styled(":reset", t.text_muted()),
    ]));

    frame.render_widget(Paragraph::new(lines), area);
}
