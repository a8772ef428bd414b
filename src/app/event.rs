//! Terminal and control event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  The tab
//! control's listeners and navigation tasks post into the same channel.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

use flip_tabs::core::{FeedbackEvent, NavigationOutcome};

use crate::ui::tab_host::TabSlot;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
    /// A notified selection change from the control built as `generation`.
    Selection {
        generation: u64,
        event: FeedbackEvent<TabSlot>,
    },
    /// A spawned navigation finished.
    Navigated {
        target: usize,
        outcome: NavigationOutcome,
    },
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;

/// Spawns a background task that polls the terminal and sends its events,
/// plus a `Tick` every `tick_rate` of silence, into `tx`.
pub fn spawn_event_reader(tick_rate: Duration, tx: EventSender) {
    tokio::spawn(async move {
        loop {
            let has_event = event::poll(tick_rate).unwrap_or(false);
            let app_event = if has_event {
                match event::read() {
                    Ok(CtEvent::Key(k)) => AppEvent::Key(k),
                    Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                    Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                    _ => continue,
                }
            } else {
                AppEvent::Tick
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });
}
