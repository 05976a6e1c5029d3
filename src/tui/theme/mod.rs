mod palette;

use ratatui::prelude::*;

pub use palette::Palette;

use crate::tui::app::EngineState;

pub struct Theme {
    pub palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    pub fn new() -> Self {
        Self {
            palette: Palette::new(),
        }
    }

    pub fn panel_border(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.palette.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.border_default)
        }
    }

    /// Header badge for the engine state
    pub fn state_badge(&self, state: EngineState) -> Style {
        let bg = match state {
            EngineState::Idle => self.palette.bg_idle,
            EngineState::Armed(_) => self.palette.bg_armed,
            EngineState::Composing => self.palette.bg_composing,
            EngineState::Ineligible => self.palette.bg_ineligible,
        };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn checkbox(&self, checked: bool) -> Style {
        if checked {
            Style::default().fg(self.palette.accent_success)
        } else {
            Style::default().fg(self.palette.text_muted)
        }
    }

    pub fn text_primary(&self) -> Style {
        Style::default().fg(self.palette.text_primary)
    }

    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.palette.text_secondary)
    }

    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.palette.text_muted)
    }

    /// Character under the typing cursor
    pub fn cursor(&self) -> Style {
        Style::default()
            .fg(self.palette.selection_fg)
            .bg(self.palette.cursor_bg)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.palette.selection_fg)
            .bg(self.palette.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn output_command(&self) -> Style {
        Style::default()
            .fg(self.palette.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn output_text(&self) -> Style {
        Style::default().fg(self.palette.text_primary)
    }

    /// Captured log records, coloured by level
    pub fn output_log(&self, line: &str) -> Style {
        if line.starts_with("[WARN]") || line.starts_with("[ERROR]") {
            Style::default().fg(self.palette.accent_danger)
        } else {
            Style::default().fg(self.palette.text_muted)
        }
    }

    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.palette.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn confirm_prompt(&self) -> Style {
        Style::default()
            .fg(self.palette.accent_danger)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_message(&self) -> Style {
        Style::default().fg(self.palette.accent_warning)
    }

    pub fn setting_value(&self, enabled: bool) -> Style {
        if enabled {
            Style::default().fg(self.palette.accent_success)
        } else {
            Style::default().fg(self.palette.text_muted)
        }
    }

    pub fn panel_title(&self, title: &str, focused: bool) -> Line<'_> {
        let style = if focused {
            Style::default()
                .fg(self.palette.accent_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.text_muted)
        };
        Line::styled(format!(" {} ", title), style)
    }
}

pub static THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::new)
}
