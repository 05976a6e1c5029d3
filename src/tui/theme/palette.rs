use ratatui::prelude::*;

/// Deep-water palette for the playground: dark navy base, reef accents
pub struct Palette {
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub accent_primary: Color,
    pub accent_success: Color,
    pub accent_warning: Color,
    pub accent_danger: Color,

    pub border_default: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub cursor_bg: Color,

    // Header badge backgrounds, one per engine state
    pub bg_idle: Color,
    pub bg_armed: Color,
    pub bg_composing: Color,
    pub bg_ineligible: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text_primary: Color::Rgb(226, 232, 240),
            text_secondary: Color::Rgb(176, 190, 207),
            text_muted: Color::Rgb(100, 116, 139),

            accent_primary: Color::Rgb(56, 189, 248),
            accent_success: Color::Rgb(74, 222, 128),
            accent_warning: Color::Rgb(251, 191, 36),
            accent_danger: Color::Rgb(248, 113, 113),

            border_default: Color::Rgb(51, 65, 85),
            border_focused: Color::Rgb(56, 189, 248),
            selection_bg: Color::Rgb(56, 189, 248),
            selection_fg: Color::Rgb(15, 23, 42),
            cursor_bg: Color::Rgb(226, 232, 240),

            bg_idle: Color::Rgb(74, 222, 128),
            bg_armed: Color::Rgb(251, 191, 36),
            bg_composing: Color::Rgb(192, 132, 252),
            bg_ineligible: Color::Rgb(248, 113, 113),
        }
    }
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }
}
