//! `TaskDeck`: terminal task manager backed by a REST task API.
//!
//! Launches the TUI against the configured API. Configuration via CLI
//! flags, environment variables, or config file
//! (`~/.config/taskdeck/config.toml`).
//!
//! ```bash
//! # Default API at http://localhost:5000/api
//! cargo run --bin taskdeck
//!
//! # Another server
//! cargo run --bin taskdeck -- --api-url http://tasks.internal:8080/api
//!
//! # Or via environment variables
//! TASKDECK_API_URL=http://127.0.0.1:5000/api TASKDECK_LOG=debug cargo run
//! ```

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::non_blocking::WorkerGuard;

use taskdeck::api::http::HttpTaskApi;
use taskdeck::app::App;
use taskdeck::config::{ApiConfig, CliArgs, ClientConfig};
use taskdeck::controller::{Command, Controller};
use taskdeck::sync::{SyncHandle, spawn_sync, submit_or_fail};
use taskdeck::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::from_cli(&cli)
        }
    };

    let api_config = match config.to_api_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return Err(io::Error::new(io::ErrorKind::InvalidInput, e));
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(api = %api_config.base_url, "taskdeck starting");

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, &api_config, &config);

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskdeck exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskdeck.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
///
/// Must run inside the tokio runtime: requests execute on background tasks
/// while this loop stays synchronous around crossterm's poll.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    api_config: &ApiConfig,
    client_config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new().with_timestamp_format(client_config.timestamp_format.clone());
    let mut controller = Controller::new();

    let api = Arc::new(HttpTaskApi::new(api_config));
    let mut sync = spawn_sync(api, api_config.channel_capacity);

    // Initial fetch on mount.
    let requests = controller.dispatch(Command::Refresh);
    submit_or_fail(&sync, &mut controller, requests);

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app, controller.state()))?;

        // Step 2: Fold in every finished request (non-blocking).
        drain_outcomes(&mut controller, &mut sync);

        // Step 3: Poll for terminal input events.
        if event::poll(client_config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Some(command) = app.handle_key_event(key, controller.state()) {
                let requests = controller.dispatch(command);
                submit_or_fail(&sync, &mut controller, requests);
            }
        }

        if app.should_quit {
            sync.shutdown();
            return Ok(());
        }
    }
}

/// Apply all pending outcomes and queue any follow-up requests.
fn drain_outcomes(controller: &mut Controller, sync: &mut SyncHandle) {
    for outcome in sync.drain() {
        let follow_ups = controller.apply(outcome);
        submit_or_fail(sync, controller, follow_ups);
    }
}
