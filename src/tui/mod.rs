mod events;
mod state;
mod types;
mod ui;
pub mod bus;

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;
use crossterm::cursor::{Hide, Show};
use crossterm::event;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::hosts::Host;
use crate::monitor::round;
use crate::sort::SortKey;

use state::AppState;
pub use state::{MAX_INTERVAL_SECS, MIN_INTERVAL_SECS};

/// Run the dashboard until the user quits.
pub async fn run(
    hosts: Vec<Host>,
    hosts_path: PathBuf,
    interval: Duration,
    sort_key: SortKey,
) -> Result<()> {
    let mut state = AppState::new(hosts, hosts_path, interval, sort_key);

    // Init terminal in alternate screen
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let backend = CrosstermBackend::new(&mut stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    tracing::info!("TUI bus: subscribing for probe rounds");
    let mut bus_rx = bus::subscribe();

    loop {
        // Drain TUI bus (non-blocking) for finished probe rounds
        while let Ok(ev) = bus_rx.try_recv() {
            match ev {
                bus::TuiEvent::RoundComplete { epoch, outcomes } => {
                    let transitions =
                        state.apply_round(epoch, &outcomes, Local::now(), Instant::now());
                    if transitions > 0 {
                        ring_bell()?;
                    }
                }
            }
        }

        // Clear expired status notifications
        state.clear_expired_status();

        // Arm the next probe round if one is due. The round runs off-loop
        // and reports back over the bus.
        if let Some((epoch, addresses)) = state.take_due_round(Instant::now()) {
            tokio::spawn(async move {
                let outcomes = round::run_round(addresses).await;
                bus::publish_round(epoch, outcomes);
            });
        }

        // Render UI
        terminal.draw(|f| {
            ui::render(f, &mut state);
        })?;

        // Poll for events
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            let should_quit = events::handle_event(&mut state, ev)?;

            if should_quit {
                break;
            }
        }
    }

    // Cleanup terminal
    drop(terminal);
    let exec_result = execute!(stdout, Show, LeaveAlternateScreen);
    let raw_mode_result = disable_raw_mode();
    exec_result.and(raw_mode_result)?;
    Ok(())
}

/// Sound the terminal bell once per applied batch that changed any host's
/// reachability. The bell byte goes straight to the tty, bypassing the
/// backend buffer.
fn ring_bell() -> Result<()> {
    let mut out = std::io::stdout();
    write!(out, "\x07")?;
    out.flush()?;
    Ok(())
}
