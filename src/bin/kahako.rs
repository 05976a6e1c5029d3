// Kahako CLI
// Replays key-sequence scripts through the engine and prints the resulting text

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use kahako_core::{
    default_settings_content, ChannelMode, Engine, EngineConfig, Settings, Simulator,
    SurfaceDescriptor, SurfaceKind, TextBuffer,
};

/// Hawaiian kahakō and ʻokina input engine
#[derive(Parser, Debug)]
#[command(name = "kahako")]
#[command(author = "kahako contributors")]
#[command(version)]
#[command(about = "Replay keystrokes through the kahakō/ʻokina engine", long_about = None)]
struct Args {
    /// TOML settings file (defaults to ~/.config/kahako/settings.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Suppress the trigger character while armed
    #[arg(short, long)]
    strict: bool,

    /// Text channels the simulated editor delivers (pre-commit, fallback, both)
    #[arg(long, value_name = "MODE", default_value = "both")]
    channels: ChannelMode,

    /// Kind of editable surface to type into (line, multiline, rich)
    #[arg(long, value_name = "KIND", default_value = "multiline")]
    surface: SurfaceKind,

    /// Print every notification and the engine's answer
    #[arg(long)]
    trace: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate settings and exit
    #[arg(long)]
    check_config: bool,

    /// Print a commented default settings file and exit
    #[arg(long)]
    print_default_config: bool,

    /// Key-sequence scripts, e.g. "Hawai`'i" or "k{Alt-a}ne" (read from stdin when absent)
    #[arg(value_name = "SCRIPT")]
    scripts: Vec<String>,
}

fn load_settings(args: &Args) -> Result<Settings> {
    match &args.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Settings::load_default().context("failed to load default settings"),
    }
}

fn engine_config(args: &Args, settings: &Settings) -> EngineConfig {
    let mut config = settings.to_engine_config();
    if args.strict {
        config.strict_dead_keys = true;
    }
    if args.verbose {
        config.debug_logging = true;
    }
    config
}

fn init_logging(config: &EngineConfig) {
    let level = if config.debug_logging {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn check_config(args: &Args, settings: &Settings, config: &EngineConfig) -> Result<()> {
    let engine = Engine::new(config.clone());
    if let Some(err) = engine.eligibility().rule_error() {
        bail!("exclusion rule is invalid: {}", err);
    }
    match settings.source_path() {
        Some(path) => println!("Settings are valid: {}", path.display()),
        None => println!("Settings are valid (built-in defaults)"),
    }
    if args.verbose {
        print!("{}", settings.to_toml_string()?);
    }
    Ok(())
}

fn surface_for(kind: SurfaceKind) -> TextBuffer {
    TextBuffer::new(SurfaceDescriptor::new(kind))
}

fn replay(args: &Args, config: &EngineConfig, script: &str) -> Result<String> {
    let mut sim = Simulator::with_parts(
        Engine::new(config.clone()),
        surface_for(args.surface),
        args.channels,
    );
    let outcomes = sim
        .run_script(script)
        .with_context(|| format!("invalid key sequence {:?}", script))?;
    if args.trace {
        for outcome in &outcomes {
            eprintln!("  {}", outcome);
        }
    }
    Ok(sim.text())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", default_settings_content());
        return Ok(());
    }

    let settings = load_settings(&args)?;
    let config = engine_config(&args, &settings);
    init_logging(&config);

    if args.check_config {
        return check_config(&args, &settings, &config);
    }

    log::debug!(
        "channels={} surface={} strict={} chord={}",
        args.channels,
        args.surface,
        config.strict_dead_keys,
        config.chord_modifier
    );

    if args.scripts.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("failed to read stdin")?;
            println!("{}", replay(&args, &config, &line)?);
        }
    } else {
        for script in &args.scripts {
            println!("{}", replay(&args, &config, script)?);
        }
    }
    Ok(())
}
