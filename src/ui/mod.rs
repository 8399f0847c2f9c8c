//! TUI module using ratatui.
//!
//! Component-based pattern:
//! - `app.rs` - UI state and key handling on top of the workflow controller
//! - `picker.rs` - single-file picker
//! - `render.rs` - drawing
//! - `terminal.rs` - raw mode / alternate screen guard
//!
//! The event loop owns the controller. Submissions run on a spawned task and
//! report back over a channel, so the UI stays responsive while one is in flight.

mod app;
mod picker;
mod render;
mod terminal;

pub use app::{App, StatusMessage};
pub use picker::{FileEntry, FilePickerState};

use crate::config::Config;
use crate::export::FileExporter;
use crate::service::{HttpService, ServiceError, SummarizationService, SummaryResult};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

/// Spinner refresh interval
const TICK_RATE: Duration = Duration::from_millis(100);

#[derive(Error, Debug)]
pub enum UiError {
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
    #[error("failed to create service client: {0}")]
    Service(#[from] ServiceError),
}

/// Run the TUI until the user quits
pub async fn run(config: &Config) -> Result<(), UiError> {
    let service: Arc<dyn SummarizationService> =
        Arc::new(HttpService::new(config.service.clone())?);
    let start_dir = std::env::current_dir()?;
    let app = App::new(FileExporter::new(&config.export.dir), &start_dir);

    tracing::info!(endpoint = %config.service.url, "starting tui");
    let (mut terminal, _guard) = terminal::setup_terminal()?;
    event_loop(&mut terminal, app, service).await
}

async fn event_loop(
    terminal: &mut terminal::CrosstermTerminal,
    mut app: App,
    service: Arc<dyn SummarizationService>,
) -> Result<(), UiError> {
    let (outcome_tx, mut outcome_rx) =
        mpsc::unbounded_channel::<Result<SummaryResult, ServiceError>>();
    let mut session = app.controller.subscribe();
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_RATE);

    loop {
        let snapshot = session.borrow_and_update().clone();
        terminal.draw(|frame| render::draw(frame, &snapshot, &app))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if let Some(request) = app.handle_key(key) {
                        let service = Arc::clone(&service);
                        let tx = outcome_tx.clone();
                        tokio::spawn(async move {
                            let outcome = service.summarize(&request).await;
                            let _ = tx.send(outcome);
                        });
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(outcome) = outcome_rx.recv() => app.controller.finish_submission(outcome),
            _ = ticker.tick() => app.tick(),
        }

        if app.should_quit {
            break;
        }
    }

    tracing::info!("tui closed");
    Ok(())
}
