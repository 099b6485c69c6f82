mod app;
mod bootstrap;
mod cli;
mod config;
mod demo_data;
mod runtime;
mod time_utils;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use app::App;
use cli::{Cli, Commands};
use config::TrackyConfig;
use tracky::{EntryStore, SyncedTicker};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ConfigPath => {
            let path = TrackyConfig::config_path()?;
            if !path.exists() {
                TrackyConfig::default().save()?;
                println!("Created default config at {}", path.display());
            } else {
                println!("{}", path.display());
            }
            Ok(())
        }
        Commands::Run => {
            // The local offset can only be read while the process is
            // single-threaded, so capture it before the runtime spawns
            // its workers.
            time_utils::init_local_offset();
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(run())
        }
    }
}

async fn run() -> Result<()> {
    let config = TrackyConfig::load()?;
    let _log_guard = init_logging()?;

    let store = if config.demo_data {
        EntryStore::with_entries(demo_data::seed_entries(time_utils::local_now()))
    } else {
        EntryStore::new()
    };

    // One ticker per process; every display element in the UI tree hangs
    // off this instance.
    let ticker = SyncedTicker::start(Duration::from_millis(config.tick_interval_ms));

    let mut app = App::new(store, ticker.clone(), &config);
    bootstrap::initialize_app_state(&mut app);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    ticker.shutdown();

    res
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = TrackyConfig::log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log dir {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, "tracky.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TRACKY_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}
