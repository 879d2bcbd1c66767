//! tzpanel - Terminal timestamp converter
//!
//! A small TUI panel that converts one Unix timestamp (seconds or
//! milliseconds) into `YYYY-MM-DD HH:mm:ss` across multiple fixed-UTC-offset
//! rows, and back again from any edited row.

mod app;
mod i18n;
mod models;
mod panel;
mod presets;
mod storage;
mod theme;
mod time;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use app::App;

/// Frame rate for transient-state expiry (approximately 30 FPS)
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Main entry point
fn main() -> Result<()> {
    color_eyre::install().ok();

    // First argument optionally overrides the state file path.
    let args: Vec<String> = std::env::args().collect();
    let state_path = storage::resolve_state_path(args.get(1).map(String::as_str));

    run_tui(state_path)
}

/// Run the TUI application
fn run_tui(state_path: std::path::PathBuf) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let now_ms = chrono::Utc::now().timestamp_millis();
    let mut app = App::new(state_path, now_ms);

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Run the main event loop
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Expire toast/highlight state
        app.tick();

        // Render the UI
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle input events with timeout so expiry keeps running
        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
