mod app;
mod handlers;
mod logger;
mod theme;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;

use kahako_core::Settings;

use app::App;
use handlers::{handle_input, handle_paste};
use logger::LogBuffer;
use ui::draw_ui;

pub fn run(settings: Settings) -> Result<()> {
    let log = Arc::new(LogBuffer::default());
    logger::install(log.clone(), log::LevelFilter::Warn)
        .context("failed to install the capture logger")?;
    let mut app = App::new(settings, log);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    run_result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.drain_log();
        terminal.draw(|f| draw_ui(f, app))?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_input(app, key) {
                    return Ok(());
                }
            }
            Event::Paste(text) => handle_paste(app, text),
            _ => {}
        }
    }
}
