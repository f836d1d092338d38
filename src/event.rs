use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;
use tracing::warn;

use crate::error::Result;

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// A key press event.
    Key(KeyEvent),
    /// A mouse event (click, move, wheel).
    Mouse(MouseEvent),
    /// A periodic tick for rendering.
    Tick,
    /// Terminal resize event. The view re-measures on the next draw.
    Resize(u16, u16),
}

/// Async event handler that polls crossterm events and forwards them via a channel.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new EventHandler with the given tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            loop {
                let polled = match event::poll(tick_rate) {
                    Ok(ready) => ready,
                    Err(e) => {
                        warn!(error = %e, "event poll failed");
                        false
                    }
                };
                let sent = if polled {
                    match event::read() {
                        // Press only; some platforms also report releases.
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            tx.send(Event::Key(key))
                        }
                        Ok(CrosstermEvent::Mouse(mouse)) => tx.send(Event::Mouse(mouse)),
                        Ok(CrosstermEvent::Resize(w, h)) => tx.send(Event::Resize(w, h)),
                        _ => Ok(()),
                    }
                } else {
                    tx.send(Event::Tick)
                };
                if sent.is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Receive the next event (blocks until available).
    pub async fn next(&mut self) -> Result<Event> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| crate::error::AppError::Terminal("Event channel closed".into()))
    }
}
