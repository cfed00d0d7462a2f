use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::game::Epoch;

/// Application-level events
#[derive(Debug, Clone)]
pub enum Event {
    /// User key press
    Key(KeyEvent),
    /// Mouse button, drag or release
    Mouse(MouseEvent),
    /// Animation / render tick
    Tick,
    /// Terminal resize
    Resize(u16, u16),
    /// Countdown hold is over; the value goes on screen
    CountdownBegin(Epoch),
    /// One countdown step
    CountdownTick(Epoch),
}

/// Handles event collection from multiple sources.
///
/// Uses crossterm's async `EventStream` (via `futures::StreamExt`) instead of
/// blocking `event::poll()` / `event::read()`, so no tokio worker thread is
/// ever blocked.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
    stop: Arc<AtomicBool>,
}

impl EventHandler {
    /// Create a new event handler. Spawns background tasks for async input and tick generation.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let _tx = tx.clone();
        let stop = Arc::new(AtomicBool::new(false));

        // Async input task on crossterm's EventStream
        let input_tx = tx.clone();
        let input_stop = stop.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            loop {
                if input_stop.load(Ordering::Relaxed) {
                    return;
                }
                let maybe_event = reader.next().await;
                if input_stop.load(Ordering::Relaxed) {
                    return;
                }
                let event = match maybe_event {
                    Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        Event::Key(key)
                    }
                    Some(Ok(CrosstermEvent::Mouse(mouse))) => Event::Mouse(mouse),
                    Some(Ok(CrosstermEvent::Resize(w, h))) => Event::Resize(w, h),
                    Some(Err(_)) | None => {
                        // Stream ended or errored
                        return;
                    }
                    _ => continue,
                };
                if input_tx.send(event).is_err() {
                    return;
                }
            }
        });

        // Tick task
        let tick_tx = tx.clone();
        let tick_stop = stop.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);
            loop {
                interval.tick().await;
                if tick_stop.load(Ordering::Relaxed) {
                    return;
                }
                if tick_tx.send(Event::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, _tx: tx, stop }
    }

    /// Get a clone of the sender for timer tasks
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self._tx.clone()
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Signal all background tasks to stop
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Spawn the countdown timer for run `epoch`: one `CountdownBegin` after
/// `initial_delay`, then a `CountdownTick` every `interval` until aborted.
pub fn spawn_countdown_ticker(
    tx: mpsc::UnboundedSender<Event>,
    epoch: Epoch,
    initial_delay: Duration,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(initial_delay).await;
        if tx.send(Event::CountdownBegin(epoch)).is_err() {
            return;
        }
        let first = tokio::time::Instant::now() + interval;
        let mut ticks = tokio::time::interval_at(first, interval);
        loop {
            ticks.tick().await;
            if tx.send(Event::CountdownTick(epoch)).is_err() {
                return;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn ticker_holds_then_ticks_each_interval() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = Instant::now();
        let handle = spawn_countdown_ticker(
            tx,
            4,
            Duration::from_millis(800),
            Duration::from_millis(1000),
        );

        assert_matches!(rx.recv().await, Some(Event::CountdownBegin(4)));
        assert_eq!(start.elapsed(), Duration::from_millis(800));

        assert_matches!(rx.recv().await, Some(Event::CountdownTick(4)));
        assert_eq!(start.elapsed(), Duration::from_millis(1800));

        assert_matches!(rx.recv().await, Some(Event::CountdownTick(4)));
        assert_eq!(start.elapsed(), Duration::from_millis(2800));

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn aborted_ticker_goes_quiet() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_countdown_ticker(
            tx,
            1,
            Duration::from_millis(10),
            Duration::from_millis(10),
        );
        assert_matches!(rx.recv().await, Some(Event::CountdownBegin(1)));
        handle.abort();
        let _ = handle.await;

        // sender was dropped with the task
        assert_matches!(rx.recv().await, None);
    }
}
