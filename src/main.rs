mod app;
mod catalog;
mod config;
mod event;
mod launcher;
mod logging;
mod player;
mod ui;
mod view;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use app::App;
use catalog::Catalog;
use config::{Cli, Config};
use event::{Event, EventHandler};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn main() -> Result<()> {
    let config = Config::from(Cli::parse());
    let _log_guard = match logging::init(&config.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("gameshelf: running without a log file: {e:#}");
            None
        }
    };

    let catalog = load_catalog(&config)?;
    info!(version = env!("CARGO_PKG_VERSION"), games = catalog.len(), "gameshelf starting");

    let mut app = App::new(&config, catalog);

    enable_raw_mode().context("failed to enable raw mode")?;
    let result = run_session(&mut app, &config);
    app.launcher.shutdown();
    let restored = restore_terminal(&mut io::stdout());

    info!("gameshelf stopped");
    result.and(restored)
}

fn load_catalog(config: &Config) -> Result<Catalog> {
    match (&config.catalog, &config.games_dir) {
        (Some(path), _) => Catalog::load(path),
        (None, Some(dir)) => Catalog::discover(dir),
        (None, None) => Ok(Catalog::builtin()),
    }
}

/// Everything between raw mode on and raw mode off.
fn run_session(app: &mut App, config: &Config) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    run(&mut terminal, app, config)
}

/// Undo raw mode, the alternate screen and mouse capture. Safe to call
/// even if setup stopped halfway.
fn restore_terminal<W: Write>(out: &mut W) -> Result<()> {
    let raw = disable_raw_mode().context("failed to disable raw mode");
    execute!(out, LeaveAlternateScreen, DisableMouseCapture, Show)
        .context("failed to restore the terminal")?;
    raw
}

fn run(terminal: &mut Tui, app: &mut App, config: &Config) -> Result<()> {
    let event_handler = EventHandler::new(config.tick_rate);

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match event_handler.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
            Event::Mouse(mouse) => app.on_mouse(mouse),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
