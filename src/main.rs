//! Terminal lifecycle, event loop, and cleanup for the ask client.

mod actions;
mod app;
mod backend;
mod config;
mod events;
mod state;
mod ui;
mod widget;

use std::fs::File;
use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use app::App;
use backend::AskClient;
use config::{Cli, Config};
use events::{key_to_action, TICK_RATE};
use state::ChatState;
use widget::ChatWidget;

fn init_logging(config: &Config) -> Result<()> {
    // The UI owns stdout, so logs go to a file or nowhere.
    let writer = match &config.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            BoxMakeWriter::new(std::sync::Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::sink),
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ask_tui=info".parse()?))
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::from_cli(Cli::parse())?;
    init_logging(&config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let client = AskClient::new(config.ask_url.clone(), config.timeout)?;
    tracing::info!(url = %client.url(), timeout = ?config.timeout, "starting");

    let widget = ChatWidget::new(ChatState::default(), Arc::new(client), runtime.handle().clone());
    let mut app = App::new(widget, config.ask_url.to_string());
    app.bootstrap()?;

    // Set up the terminal in raw / alternate-screen mode.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, DisableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.show_cursor()?;

    let result = run_loop(&mut terminal, &mut app);

    // Always restore the terminal, even on error.
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    tracing::info!(pending = app.widget.pending_count(), "exiting");
    // Outstanding requests are abandoned, not awaited.
    runtime.shutdown_background();
    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.tick = app.tick.wrapping_add(1);
        app.poll_results();

        let tick = app.tick;
        terminal.draw(|frame| ui::render(frame, app, tick))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = key_to_action(&key) {
                    app.dispatch(action);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
