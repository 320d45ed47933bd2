//! Event loop plumbing: terminal events and the tick cadence.
//!
//! Input reading happens on a feeder thread that only pushes into an mpsc
//! channel; all state transitions stay on the main thread, one event at a
//! time.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Tick cadence of the page loop. Timer countdowns advance by this much per
/// tick, so it bounds the granularity of typewriter delays.
pub const TICK_RATE_MS: u64 = 25;

/// Unified event type consumed by the page loop.
#[derive(Clone, Debug)]
pub enum PageEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Source of terminal events (keyboard, resize).
pub trait PageEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<PageEvent, RecvTimeoutError>;
}

/// Production event source backed by crossterm.
pub struct CrosstermEventSource {
    rx: Receiver<PageEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(PageEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(cols, rows)) => {
                    if tx.send(PageEvent::Resize(cols, rows)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PageEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<PageEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source fed by hand.
pub struct TestEventSource {
    rx: Receiver<PageEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<PageEvent>) -> Self {
        Self { rx }
    }
}

impl PageEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<PageEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Advances the page one event at a time, synthesizing `Tick` whenever no
/// event arrives within the tick interval.
pub struct Runner<E: PageEventSource> {
    source: E,
    tick: Duration,
}

impl<E: PageEventSource> Runner<E> {
    pub fn new(source: E, tick: Duration) -> Self {
        Self { source, tick }
    }

    pub fn step(&self) -> PageEvent {
        match self.source.recv_timeout(self.tick) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => PageEvent::Tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(1));

        assert_matches!(runner.step(), PageEvent::Tick);
    }

    #[test]
    fn step_passes_events_through() {
        let (tx, rx) = mpsc::channel();
        tx.send(PageEvent::Resize(80, 24)).unwrap();
        let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(10));

        assert_matches!(runner.step(), PageEvent::Resize(80, 24));
    }

    #[test]
    fn step_keeps_ticking_after_disconnect() {
        let (tx, rx) = mpsc::channel::<PageEvent>();
        drop(tx);
        let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(1));

        assert_matches!(runner.step(), PageEvent::Tick);
        assert_matches!(runner.step(), PageEvent::Tick);
    }
}
