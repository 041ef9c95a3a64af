// TUI module - Terminal User Interface
//
// Manages the terminal with ratatui: setup/teardown of the alternate
// screen, the event loop, and the frame layout. The loop multiplexes
// three sources with tokio::select!:
//   1. Keyboard input (dispatch table -> actions)
//   2. The poll interval (may start a refresh cycle)
//   3. Completions from spawned tasks (refresh cycles, webhook sends)
//
// Refresh cycles run on spawned tasks so a slow backend never blocks
// input; their outcomes come back over an mpsc channel and are applied in
// arrival order. The poller's in-flight gate guarantees at most one cycle
// is ever outstanding.

pub mod app;
pub mod clipboard;
pub mod components;

use crate::backend::ApiClient;
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::render::FeedView;
use anyhow::{Context, Result};
use app::{App, Feedback, InputMode};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done. Blocks until the user quits.
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    let backend = ApiClient::new(&config)?;
    let mut app = App::new(
        backend,
        config.webhook_url(),
        config.event_limit,
        log_buffer,
    );

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let terminal_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(terminal_backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, config.poll_interval_ms).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<ApiClient>,
    poll_interval_ms: u64,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<Feedback>(64);

    let mut poll_interval = tokio::time::interval(Duration::from_millis(poll_interval_ms));
    // First tick fires immediately, giving an instant initial refresh
    poll_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // Separate redraw cadence so toasts expire and the clock advances even
    // when nothing else happens
    let mut redraw_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        app.expire_toast();
        terminal
            .draw(|f| draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        if key_event.kind == KeyEventKind::Press {
                            app.handle_key(key_event, &tx);
                        }
                    }
                }
            } => {}

            // Poll cadence: maybe start a refresh cycle
            _ = poll_interval.tick() => {
                if let Some(cycle) = app.poller.begin_cycle() {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let _ = tx.send(Feedback::Cycle(cycle.await)).await;
                    });
                }
            }

            // Completed background work
            Some(feedback) = rx.recv() => {
                app.handle_feedback(feedback);
            }

            // Periodic redraw
            _ = redraw_interval.tick() => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Draw one frame: title bar, search bar, feed, status bar, overlays.
///
/// The feed is a pure function of (events, query, session state); this
/// function only lays the resulting view tree out on screen.
fn draw(f: &mut Frame, app: &App<ApiClient>) {
    let view = FeedView::build(app.poller.events(), &app.query, app.poller.state());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Length(1), // search bar
            Constraint::Min(3),    // feed
            Constraint::Length(2), // status bar
        ])
        .split(f.area());

    components::title_bar::render(
        f,
        chunks[0],
        app.poller.info(),
        app.poller.paused(),
        &app.theme,
    );
    components::search_bar::render(f, chunks[1], &app.query, app.mode, &app.theme);
    components::feed::render(f, chunks[2], &view, app.selected, &app.theme);
    components::status_bar::render(
        f,
        chunks[3],
        &view,
        &app.log_buffer,
        app.start_time,
        &app.theme,
    );

    if app.mode == InputMode::Compose {
        components::compose::render(f, f.area(), &app.compose, &app.theme);
    }

    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}
