//! Terminal event handling.
//!
//! Captures keyboard and resize events from the terminal on a dedicated
//! thread and forwards them to the application loop.

use std::time::Duration;

use crossterm::event::{Event, KeyEventKind};
use tokio::sync::mpsc;

/// Terminal input events.
#[derive(Debug, Clone)]
pub enum TerminalEvent {
    /// A key was pressed.
    Key(crossterm::event::KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// A periodic tick for UI refresh.
    Tick,
}

/// Spawns the blocking crossterm reader thread.
///
/// Emits a `Tick` whenever `tick` elapses without input so the UI keeps
/// redrawing.
pub fn spawn_reader(tick: Duration) -> mpsc::Receiver<TerminalEvent> {
    let (tx, rx) = mpsc::channel(64);
    let _ = std::thread::spawn(move || {
        loop {
            let ready = crossterm::event::poll(tick).unwrap_or(false);
            let event = if ready {
                match crossterm::event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        Some(TerminalEvent::Key(key))
                    }
                    Ok(Event::Resize(width, height)) => Some(TerminalEvent::Resize(width, height)),
                    Ok(_) => None,
                    Err(err) => {
                        tracing::warn!(error = %err, "terminal event read failed");
                        None
                    }
                }
            } else {
                Some(TerminalEvent::Tick)
            };
            if let Some(event) = event {
                if tx.blocking_send(event).is_err() {
                    break;
                }
            }
        }
    });
    rx
}
