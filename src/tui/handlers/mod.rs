use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use kahako_core::Keystroke;

use crate::tui::app::{App, Pane, PendingAction};

/// Handle input and return true if the app should quit
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    if app.confirm_prompt.is_some() {
        handle_confirmation(app, key.code);
        return false;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    // Global: Ctrl-C/Ctrl-Q quit, Tab cycles panes, F2 toggles composition
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl && !alt => return true,
        KeyCode::Tab => {
            app.cycle_pane_forward();
            return false;
        }
        KeyCode::BackTab => {
            app.cycle_pane_backward();
            return false;
        }
        KeyCode::F(2) => {
            app.toggle_composition();
            return false;
        }
        _ => {}
    }

    match app.focused_pane {
        Pane::Typing => handle_typing_input(app, key.code, ctrl, alt),
        Pane::Settings => return handle_settings_input(app, key.code),
        Pane::Output => return handle_output_input(app, key.code),
    }
    false
}

/// Paste arrives as one block of text when bracketed paste is on
pub fn handle_paste(app: &mut App, text: String) {
    if app.focused_pane == Pane::Typing && app.confirm_prompt.is_none() {
        app.press(Keystroke::Paste(text));
    }
}

fn handle_confirmation(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.run_pending(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.set_status("Cancelled");
            app.clear_confirm();
        }
        _ => {}
    }
}

fn handle_typing_input(app: &mut App, key: KeyCode, ctrl: bool, alt: bool) {
    // Everything typed here goes to the simulated editor
    let keystroke = match key {
        KeyCode::Char('l') if ctrl && !alt => {
            app.start_confirm("Clear the typing area?", PendingAction::ClearText);
            return;
        }
        KeyCode::Char(c) if ctrl || alt => Keystroke::Chord { key: c, ctrl, alt },
        KeyCode::Char(c) => Keystroke::Char(c),
        KeyCode::Enter => Keystroke::Char('\n'),
        KeyCode::Backspace => Keystroke::Backspace,
        KeyCode::Delete => Keystroke::Delete,
        KeyCode::Left => Keystroke::Left,
        KeyCode::Right => Keystroke::Right,
        // Esc stands in for clicking elsewhere
        KeyCode::Esc => Keystroke::Focus,
        _ => return,
    };
    app.press(keystroke);
}

fn handle_settings_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Up | KeyCode::Char('k') => {
            if app.setting_index > 0 {
                app.setting_index -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.setting_index + 1 < crate::tui::app::SettingEntry::ALL.len() {
                app.setting_index += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.change_selected_setting(),
        KeyCode::Char('s') => app.save_settings(),
        KeyCode::Char('r') => {
            app.start_confirm("Reset settings to defaults?", PendingAction::ResetSettings)
        }
        _ => {}
    }
    false
}

fn handle_output_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Up | KeyCode::Char('k') => {
            app.output_scroll = app.output_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.output_scroll = app.output_scroll.saturating_add(1);
        }
        KeyCode::Char('c') => {
            app.output.clear();
            app.output_scroll = 0;
        }
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kahako_core::Settings;

    use super::*;
    use crate::tui::logger::LogBuffer;

    fn app() -> App {
        App::new(Settings::new(), Arc::new(LogBuffer::default()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_pane_takes_plain_q() {
        let mut app = app();
        assert!(!handle_input(&mut app, key(KeyCode::Char('q'))));
        assert_eq!(app.text(), "q");
        assert!(handle_input(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));
    }

    #[test]
    fn test_alt_key_is_a_chord() {
        let mut app = app();
        handle_input(&mut app, key(KeyCode::Char('k')));
        handle_input(&mut app, KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT));
        handle_input(
            &mut app,
            KeyEvent::new(KeyCode::Char('O'), KeyModifiers::ALT | KeyModifiers::SHIFT),
        );
        assert_eq!(app.text(), "kāŌ");
    }

    #[test]
    fn test_escape_disarms() {
        let mut app = app();
        handle_input(&mut app, key(KeyCode::Char('`')));
        handle_input(&mut app, key(KeyCode::Esc));
        handle_input(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.text(), "`a");
    }

    #[test]
    fn test_tab_then_settings_navigation() {
        let mut app = app();
        handle_input(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focused_pane, Pane::Settings);
        handle_input(&mut app, key(KeyCode::Down));
        assert_eq!(app.setting_index, 1);
        handle_input(&mut app, key(KeyCode::Up));
        handle_input(&mut app, key(KeyCode::Up));
        assert_eq!(app.setting_index, 0);
        assert!(handle_input(&mut app, key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_confirmation_cancel_keeps_text() {
        let mut app = app();
        handle_input(&mut app, key(KeyCode::Char('a')));
        handle_input(&mut app, KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        assert!(app.confirm_prompt.is_some());
        handle_input(&mut app, key(KeyCode::Esc));
        assert!(app.confirm_prompt.is_none());
        assert_eq!(app.text(), "a");
    }

    #[test]
    fn test_paste_goes_to_typing_area() {
        let mut app = app();
        handle_paste(&mut app, "aloha".into());
        assert_eq!(app.text(), "aloha");
    }
}
