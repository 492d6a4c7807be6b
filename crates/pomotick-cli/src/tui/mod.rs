//! Terminal UI for the Pomodoro timer.
//!
//! Three event sources feed one loop:
//!
//! 1. **Keyboard task**: polls crossterm and forwards key presses
//! 2. **Tick source**: the controller's [`IntervalTicks`], armed while running
//! 3. **Redraw interval**: keeps the wall clock view current
//!
//! The keyboard task honors a shared `CancellationToken` for shutdown.

pub mod app;
pub mod error;
pub mod input;
pub mod screen;
pub mod ticks;
pub mod ui;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pomotick_core::{Config, Database, SessionController};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::notifier::DesktopNotifier;
use app::App;
use error::{Result, TuiError};
use input::{handle_key_event, InputEvent};
use screen::Screen;
use ticks::IntervalTicks;

const REDRAW_PERIOD: Duration = Duration::from_millis(250);
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

type Term = Terminal<CrosstermBackend<Stdout>>;

fn setup_terminal() -> Result<Term> {
    enable_raw_mode().map_err(|e| TuiError::TerminalInit(e.to_string()))?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| TuiError::TerminalInit(e.to_string()))?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| TuiError::TerminalInit(e.to_string()))
}

/// Restore the terminal. Must run before exit, even on error.
fn cleanup_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode().map_err(|e| TuiError::TerminalCleanup(e.to_string()))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| TuiError::TerminalCleanup(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| TuiError::TerminalCleanup(e.to_string()))?;
    Ok(())
}

fn spawn_keyboard_task(
    event_tx: mpsc::UnboundedSender<InputEvent>,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if cancel_token.is_cancelled() {
                debug!("keyboard task shutting down");
                break;
            }

            let poll_result = tokio::task::spawn_blocking(|| {
                if event::poll(POLL_TIMEOUT).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await;

            let forwarded = match poll_result {
                Ok(Some(CrosstermEvent::Key(key))) => event_tx.send(InputEvent::Key(key)),
                Ok(Some(CrosstermEvent::Resize(..))) => event_tx.send(InputEvent::Resize),
                Ok(_) => Ok(()),
                Err(e) => {
                    error!(error = %e, "keyboard polling task panicked");
                    break;
                }
            };
            if forwarded.is_err() {
                debug!("event channel closed, keyboard task exiting");
                break;
            }
        }
    })
}

async fn run_event_loop(
    terminal: &mut Term,
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<InputEvent>,
) -> Result<()> {
    let mut redraw = tokio::time::interval(REDRAW_PERIOD);

    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| TuiError::Draw(e.to_string()))?;

        tokio::select! {
            () = app.controller.ticks_mut().next() => {
                app.on_tick();
            }
            received = event_rx.recv() => match received {
                Some(InputEvent::Key(key)) => {
                    let action = handle_key_event(key, app.confirming);
                    app.apply(action);
                }
                Some(InputEvent::Resize) => debug!("terminal resized"),
                None => {
                    warn!("event channel closed");
                    break;
                }
            },
            _ = redraw.tick() => {}
        }

        if app.should_quit {
            info!("user requested quit");
            break;
        }
    }

    Ok(())
}

/// Run the interactive timer until the user quits.
///
/// Statistics are flushed on the way out whether or not the loop failed.
pub async fn run(config: &Config) -> Result<()> {
    let store = Database::open()?;
    let controller = SessionController::new(
        store,
        IntervalTicks::new(),
        Screen::default(),
        DesktopNotifier::from_config(&config.notifications),
    );
    info!(
        backend = controller.notifier().backend().name(),
        permission = ?controller.notifier().permission(),
        "notifications"
    );
    let mut app = App::new(controller, &config.ui);

    let mut terminal = setup_terminal()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<InputEvent>();
    let cancel_token = CancellationToken::new();
    let keyboard = spawn_keyboard_task(event_tx, cancel_token.clone());

    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;

    cancel_token.cancel();
    app.shutdown();
    if let Err(e) = keyboard.await {
        warn!(error = %e, "keyboard task did not shut down cleanly");
    }

    let cleanup = cleanup_terminal(&mut terminal);
    if let Err(e) = &result {
        error!(error = %e, "event loop failed");
    }
    result.and(cleanup)
}
