// Terminal Sokoban with ratatui
// Controls: W/A/S/D or arrow keys, U undo, R reload, +/- zoom, Q quit (configurable).
// Tiles: '#' wall, '@' player, '$' box, '.' target, '*' box on target, '+' player on target, ' ' floor.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sokoterm::app::App;
use sokoterm::config::GameConfig;
use sokoterm::console_interface::{ConsoleFrontend, render_grid_to_string};
use sokoterm::interfaces::LevelStore;
use sokoterm::persistence::FileStore;
use sokoterm::replay::replay;
use sokoterm::session::SessionSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Parser)]
#[command(name = "sokoterm", about = "Push every box onto a target.")]
struct Cli {
    /// Directory holding `.sok` levels; saves are written here too.
    #[arg(long, default_value = ".")]
    levels_dir: PathBuf,

    /// JSON file with key bindings and limits.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the log file.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play interactively (the default).
    Play,
    /// Replay a saved `.dep` move list against a level and report the result.
    Check {
        /// Level name or file inside the levels directory.
        level: String,
        /// Move history file.
        history: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_dir = cli
        .log_dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("sokoterm").join("logs"));
    let _guard = setup_logging(&log_dir)?;

    let config = GameConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let store = FileStore::new(&cli.levels_dir);
    let settings = SessionSettings::from(&config);

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => {
            let frontend = ConsoleFrontend::new(&config);
            App::new(store, frontend, settings).run()?;
        }
        Command::Check { level, history } => {
            let level_bytes = store.load_level(&level)?;
            let history_bytes = std::fs::read(&history)
                .with_context(|| format!("reading {}", history.display()))?;
            let report = replay(&level, &level_bytes, &history_bytes, &settings)?;
            print!("{}", render_grid_to_string(&report.grid));
            if report.won {
                println!("solved in {} moves", report.moves);
            } else {
                println!("not solved after {} moves", report.moves);
            }
        }
    }
    Ok(())
}

/// File-only logging: the terminal belongs to the game.
fn setup_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, "sokoterm.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!(log_dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}
