// Kahako TUI
// Interactive playground: type into a simulated editor and watch the engine work

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use kahako_core::Settings;

#[path = "../tui/mod.rs"]
mod tui;

/// Interactive kahakō/ʻokina playground
#[derive(Parser, Debug)]
#[command(name = "kahako-tui")]
#[command(version)]
#[command(about = "Try the kahakō/ʻokina engine in the terminal", long_about = None)]
struct Args {
    /// TOML settings file (defaults to ~/.config/kahako/settings.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::load_default().context("failed to load default settings")?,
    };
    tui::run(settings)
}
