//! Terminal event loop.

use std::collections::VecDeque;
use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use ratatui::crossterm::execute;
use tokio::sync::mpsc as async_mpsc;

use super::app::{App, AppAction};
use crate::api::SearchBackend;
use crate::data_models::{Query, SearchResult};
use crate::error::SearchError;

type Outcome = Result<SearchResult, SearchError>;

/// Runs the interactive search screen until the user quits.
///
/// Must be called from within a tokio runtime: each search is spawned as a
/// task and its outcome is applied on the next frame.
pub async fn run<B>(backend: Arc<B>) -> Result<()>
where
    B: SearchBackend + 'static,
{
    let mut app = App::new();
    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(stdout(), EnableMouseCapture)?;

    let (event_tx, event_rx) = mpsc::channel();
    let event_loop_running = Arc::new(AtomicBool::new(true));
    let event_loop_flag = Arc::clone(&event_loop_running);

    let event_thread = thread::spawn(move || -> Result<()> {
        while event_loop_flag.load(Ordering::Relaxed) {
            if event::poll(Duration::from_millis(50))? {
                let event = event::read()?;
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        }
        Ok(())
    });

    let (outcome_tx, mut outcome_rx) = async_mpsc::unbounded_channel::<Outcome>();
    let mut pending_events = VecDeque::new();

    let result: Result<()> = 'event_loop: loop {
        loop {
            match event_rx.try_recv() {
                Ok(event) => pending_events.push_back(event),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    break 'event_loop Err(anyhow!("input event channel disconnected"));
                }
            }
        }

        while let Some(event) = pending_events.pop_front() {
            let action = match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => AppAction::None,
            };
            match action {
                AppAction::Quit => break 'event_loop Ok(()),
                AppAction::Search(query) => spawn_search(&backend, query, &outcome_tx),
                AppAction::None => {}
            }
        }

        drain_outcomes(&mut app, &mut outcome_rx);
        app.tick();

        if let Err(e) = terminal.draw(|frame| app.draw(frame)) {
            break Err(e.into());
        }

        tokio::time::sleep(Duration::from_millis(16)).await;
    };

    ratatui::restore();
    execute!(stdout(), DisableMouseCapture)?;

    event_loop_running.store(false, Ordering::Relaxed);
    match event_thread.join() {
        Ok(join_result) => join_result?,
        Err(err) => std::panic::resume_unwind(err),
    }

    result
}

/// Applies every search outcome that has arrived since the last turn.
fn drain_outcomes(
    app: &mut App,
    outcome_rx: &mut async_mpsc::UnboundedReceiver<Outcome>,
) -> usize {
    let mut applied = 0;
    while let Ok(outcome) = outcome_rx.try_recv() {
        app.apply_outcome(outcome);
        applied += 1;
    }
    applied
}

fn spawn_search<B>(
    backend: &Arc<B>,
    query: Query,
    outcome_tx: &async_mpsc::UnboundedSender<Outcome>,
) where
    B: SearchBackend + 'static,
{
    let backend = Arc::clone(backend);
    let outcome_tx = outcome_tx.clone();
    tokio::spawn(async move {
        let outcome = backend.search(&query).await;
        if outcome_tx.send(outcome).is_err() {
            tracing::debug!(query = %query, "screen closed before the search finished");
        }
    });
}
