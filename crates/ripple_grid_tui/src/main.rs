//! Ripple Grid - terminal front end
//!
//! Renders a grid session and forwards clicks to it.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod input;
mod replay;
mod ui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, GridArgs};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

use app::App;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { grid } => run_play(grid),
        Command::Replay { grid, json, clicks } => run_replay(grid, json, clicks),
    }
}

/// Run the interactive grid
fn run_play(grid: GridArgs) -> Result<()> {
    // Log to a file so tracing output does not tear the UI
    let log_file = std::fs::File::create("ripple_grid_tui.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!("Starting Ripple Grid TUI");
    let config = grid.resolve()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, App::new(&config));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "UI loop error");
    }
    res
}

/// Draw / poll loop. Each key is handled to completion before the next.
#[instrument(skip_all)]
fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> Result<()> {
    loop {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|f| ui::draw(f, &app, now))?;

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code, Instant::now());
        }

        if app.should_quit() {
            info!(clicks = app.session().clicks(), "User quit");
            return Ok(());
        }
    }
}

/// Run a click sequence and print the report
fn run_replay(grid: GridArgs, json: bool, clicks: Vec<ripple_grid::Position>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = grid.resolve()?;
    let report = replay::replay(&config, &clicks, json)?;
    println!("{report}");
    Ok(())
}
