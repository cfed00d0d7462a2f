mod animation;
mod app;
mod config;
mod error;
mod event;
mod game;
mod input;
mod ui;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use crate::app::App;
use crate::config::{CliArgs, Config};
use crate::error::FingerpickError;
use crate::event::EventHandler;
use crate::input::viewport_for;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CliArgs::parse();

    if cli.print_default_config {
        print!("{}", config::default_config_toml());
        return Ok(());
    }

    // Initialize color-eyre with custom panic hook that restores terminal
    install_panic_hook();

    let config::Loaded { config, created } = config::load(&cli)?;

    // Held until exit so buffered log lines get flushed
    let _log_guard = init_logging(&config.general.log_level, cli.log_file.clone());
    if let Some(path) = created {
        info!("Created default config at {}", path.display());
    }

    info!(
        fps = config.appearance.fps,
        countdown = config.game.countdown_start,
        seed = ?config.game.seed,
        "fingerpick starting"
    );

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| FingerpickError::Terminal(format!("Failed to enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let size = terminal.size()?;
    let mut event_handler = EventHandler::new(config.tick_rate());
    let mut app = App::new(&config, viewport_for(size.width, size.height), event_handler.sender());

    // ── Main event loop ───────────────────────────────────────────────
    let result = run(&mut terminal, &mut app, &mut event_handler).await;

    app.shutdown();
    event_handler.stop();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("fingerpick exiting");
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        match events.next().await {
            Some(event) => app.handle_event(event),
            None => break,
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        // Call default handler
        default_hook(panic_info);
    }));
    color_eyre::install().ok();
}

/// Initialize tracing to a log file. stdout belongs to the TUI.
///
/// `RUST_LOG` wins over the configured level.
fn init_logging(level: &str, log_file: Option<PathBuf>) -> WorkerGuard {
    use tracing_subscriber::EnvFilter;

    let path = log_file.unwrap_or_else(|| Config::log_dir().join("fingerpick.log"));
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("fingerpick.log"));

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    guard
}
