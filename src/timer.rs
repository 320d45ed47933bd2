//! Tick-driven delayed-callback scheduling.
//!
//! Delays count down with the event loop's tick cadence rather than a wall
//! clock, so tests can advance time deterministically. Callers keep the
//! returned token and match it against fired tokens; a token that was
//! cancelled (or superseded) simply never matches again.

/// Cancellation handle for a scheduled delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug)]
struct Entry {
    token: TimerToken,
    remaining_ms: u64,
}

/// Owns every scheduled delay on the page.
#[derive(Debug, Default)]
pub struct Timers {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a callback `delay_ms` from now. Tokens are never reused.
    pub fn schedule(&mut self, delay_ms: u64) -> TimerToken {
        self.next_id += 1;
        let token = TimerToken(self.next_id);
        self.entries.push(Entry {
            token,
            remaining_ms: delay_ms,
        });
        token
    }

    /// Drop a pending delay. Unknown (already fired or cancelled) tokens are
    /// ignored.
    pub fn cancel(&mut self, token: TimerToken) {
        self.entries.retain(|e| e.token != token);
    }

    /// Advance time by `elapsed_ms` and return every delay that expired, in
    /// scheduling order.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<TimerToken> {
        let mut fired = Vec::new();
        for entry in &mut self.entries {
            entry.remaining_ms = entry.remaining_ms.saturating_sub(elapsed_ms);
            if entry.remaining_ms == 0 {
                fired.push(entry.token);
            }
        }
        self.entries.retain(|e| e.remaining_ms > 0);
        fired
    }

    /// Number of delays still pending.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Remaining countdown for a token, if it is still pending.
    pub fn remaining_ms(&self, token: TimerToken) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.token == token)
            .map(|e| e.remaining_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_and_fire() {
        let mut timers = Timers::new();
        let token = timers.schedule(100);

        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.remaining_ms(token), Some(100));

        assert!(timers.advance(50).is_empty());
        assert_eq!(timers.remaining_ms(token), Some(50));

        let fired = timers.advance(50);
        assert_eq!(fired, vec![token]);
        assert_eq!(timers.pending(), 0);
        assert_eq!(timers.remaining_ms(token), None);
    }

    #[test]
    fn cancel_removes_pending_delay() {
        let mut timers = Timers::new();
        let token = timers.schedule(100);

        timers.cancel(token);

        assert_eq!(timers.pending(), 0);
        assert!(timers.advance(1000).is_empty());
    }

    #[test]
    fn cancel_unknown_token_is_noop() {
        let mut timers = Timers::new();
        let fired = timers.schedule(10);
        assert_eq!(timers.advance(10), vec![fired]);

        // Cancelling after the fact must not disturb other entries
        let live = timers.schedule(10);
        timers.cancel(fired);
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.remaining_ms(live), Some(10));
    }

    #[test]
    fn overshoot_fires_in_one_advance() {
        let mut timers = Timers::new();
        let token = timers.schedule(30);

        let fired = timers.advance(1000);
        assert_eq!(fired, vec![token]);
    }

    #[test]
    fn multiple_delays_fire_independently() {
        let mut timers = Timers::new();
        let short = timers.schedule(25);
        let long = timers.schedule(75);

        assert_eq!(timers.advance(25), vec![short]);
        assert_eq!(timers.pending(), 1);
        assert!(timers.advance(25).is_empty());
        assert_eq!(timers.advance(25), vec![long]);
    }

    #[test]
    fn tokens_are_unique() {
        let mut timers = Timers::new();
        let a = timers.schedule(10);
        let b = timers.schedule(10);
        assert_ne!(a, b);
    }
}
