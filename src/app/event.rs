//! Terminal event abstraction.
//!
//! A background task polls crossterm for input and interleaves a `Frame`
//! event on a fixed cadence, so the main loop only ever waits on one channel.
//! Frame deadlines are absolute: slow input handling delays a frame but
//! never shifts the cadence of the ones after it.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Time to advance animations and redraw.
    Frame,
}

/// Spawns the reader task and returns its event channel.
pub fn spawn_event_reader(frame_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut next_frame = Instant::now() + frame_interval;
        loop {
            let wait = next_frame.saturating_duration_since(Instant::now());
            let has_event = event::poll(wait).unwrap_or(false);

            if has_event {
                let app_event = match event::read() {
                    // Ignore key release/repeat reports on terminals that send them.
                    Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => AppEvent::Key(k),
                    Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                    Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                    _ => continue,
                };
                if tx.send(app_event).is_err() {
                    break; // receiver dropped
                }
                continue;
            }

            let now = Instant::now();
            if now >= next_frame {
                // Skip frames we were too slow for rather than bursting.
                while next_frame <= now {
                    next_frame += frame_interval;
                }
                if tx.send(AppEvent::Frame).is_err() {
                    break;
                }
            }
        }
    });

    rx
}
