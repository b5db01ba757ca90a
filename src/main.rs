//! # driftvpn
//!
//! A terminal dashboard that simulates a VPN client: a staged connect sequence,
//! a generated session address, synthetic bandwidth numbers, a mocked secure
//! browser, and AI-assisted server suggestions. No traffic is tunneled.
//!
//! ## Modules
//! - [`app`]: Core application state and key handling.
//! - [`connection`]: Connection state machine.
//! - [`session`]: Per-connection counters and generated address.
//! - [`browse`]: Simulated secure browser.
//! - [`suggest`]: AI server suggestion resolver.
//! - [`catalog`]: Static server catalog.
//! - [`cli`]: Command-line argument parsing and subcommands.
//! - [`event`]: Event loop handling.
//! - [`ui`]: TUI rendering and widget definitions.

mod app;
mod browse;
mod catalog;
mod cli;
mod config;
mod connection;
mod constants;
mod event;
mod session;
mod suggest;
mod theme;
mod timer;
mod ui;
mod utils;

use app::App;
use clap::Parser;
use cli::args::Args;
use color_eyre::Result;
use config::Settings;
use event::{Event, EventHandler};

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse arguments
    let args = Args::parse();
    let settings = Settings::from_args(&args);

    // Handle CLI commands (servers, suggest)
    if let Some(command) = &args.command {
        if cli::commands::handle_command(command, &settings)? {
            return Ok(());
        }
    }

    // Run the TUI application
    let terminal = ratatui::init();
    let result = run_tui(terminal, &settings);
    ratatui::restore();

    result
}

/// Runs the main TUI event loop.
fn run_tui(mut terminal: ratatui::DefaultTerminal, settings: &Settings) -> Result<()> {
    let mut app = App::new(settings);
    let events = EventHandler::new(settings.tick_rate);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        match events.next()? {
            Event::Key(key_event) => app.handle_key(key_event),
            Event::Tick => app.on_tick(),
            // The next loop iteration redraws at the new size.
            Event::Resize => {}
        }
    }

    Ok(())
}
