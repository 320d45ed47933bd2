//! Character-by-character reveal of the intro text.
//!
//! The engine holds at most one pending timer at a time and identifies it by
//! token, so a timer that fired after its session was cancelled or restarted
//! is recognized as stale and dropped without touching the revealed prefix.

use crate::timer::{TimerToken, Timers};
use rand::Rng;

/// Characters that double the pause before the next reveal step.
pub const PAUSE_CHARS: [char; 5] = ['.', ',', '!', '?', '—'];

/// Bounds of the randomized per-step delay, in milliseconds.
pub const MIN_STEP_DELAY_MS: u64 = 50;
pub const MAX_STEP_DELAY_MS: u64 = 150;

/// What happens to already-revealed text when the intro scrolls out of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HidePolicy {
    Keep,
    Clear,
}

/// A reveal session over a fixed source string.
#[derive(Debug)]
pub struct Typewriter {
    source: String,
    char_count: usize,
    revealed_chars: usize,
    active: bool,
    pending: Option<TimerToken>,
    last_scheduled_delay_ms: Option<u64>,
}

impl Typewriter {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let char_count = source.chars().count();
        Self {
            source,
            char_count,
            revealed_chars: 0,
            active: false,
            pending: None,
            last_scheduled_delay_ms: None,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn revealed_chars(&self) -> usize {
        self.revealed_chars
    }

    /// Currently revealed prefix of the source.
    pub fn revealed(&self) -> &str {
        match self.source.char_indices().nth(self.revealed_chars) {
            Some((byte_idx, _)) => &self.source[..byte_idx],
            None => &self.source,
        }
    }

    /// Delay chosen for the most recently scheduled step.
    pub fn last_scheduled_delay_ms(&self) -> Option<u64> {
        self.last_scheduled_delay_ms
    }

    pub fn pending_token(&self) -> Option<TimerToken> {
        self.pending
    }

    /// Begin a reveal session from the start of the source. An empty source
    /// finishes immediately without scheduling anything.
    pub fn start(&mut self, timers: &mut Timers) {
        self.invalidate_pending(timers);
        self.revealed_chars = 0;
        if self.char_count == 0 {
            self.active = false;
            return;
        }
        self.active = true;
        self.schedule_step(timers, None);
    }

    /// Invalidate any pending step and go inactive. Revealed text is left in
    /// place; callers clear it separately if their policy says so.
    pub fn cancel(&mut self, timers: &mut Timers) {
        self.invalidate_pending(timers);
        self.active = false;
    }

    pub fn restart(&mut self, timers: &mut Timers) {
        self.cancel(timers);
        self.start(timers);
    }

    /// Throw away the revealed prefix. Session state is untouched.
    pub fn clear_revealed(&mut self) {
        self.revealed_chars = 0;
    }

    /// Handle a fired timer. A token that does not match the single pending
    /// step belongs to a cancelled session and is ignored.
    pub fn on_timer(&mut self, token: TimerToken, timers: &mut Timers) {
        if !self.active || self.pending != Some(token) {
            return;
        }
        self.pending = None;

        let Some(revealed_char) = self.source.chars().nth(self.revealed_chars) else {
            debug_assert!(false, "reveal step past the end of the source");
            self.active = false;
            return;
        };
        self.revealed_chars += 1;
        debug_assert!(self.revealed_chars <= self.char_count);

        if self.revealed_chars == self.char_count {
            self.active = false;
            return;
        }
        self.schedule_step(timers, Some(revealed_char));
    }

    fn schedule_step(&mut self, timers: &mut Timers, just_revealed: Option<char>) {
        debug_assert!(self.pending.is_none());
        let mut delay = rand::thread_rng().gen_range(MIN_STEP_DELAY_MS..MAX_STEP_DELAY_MS);
        if let Some(c) = just_revealed {
            if PAUSE_CHARS.contains(&c) {
                delay *= 2;
            }
        }
        self.last_scheduled_delay_ms = Some(delay);
        self.pending = Some(timers.schedule(delay));
    }

    fn invalidate_pending(&mut self, timers: &mut Timers) {
        if let Some(token) = self.pending.take() {
            timers.cancel(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the engine to completion, firing each pending timer in turn.
    fn run_to_end(tw: &mut Typewriter, timers: &mut Timers) {
        let mut steps = 0;
        while tw.is_active() {
            for token in timers.advance(MAX_STEP_DELAY_MS * 2) {
                tw.on_timer(token, timers);
            }
            steps += 1;
            assert!(steps < 10_000, "reveal session failed to terminate");
        }
    }

    #[test]
    fn full_reveal_matches_source() {
        let mut timers = Timers::new();
        let mut tw = Typewriter::new("Hi, I'm Christian!");
        tw.start(&mut timers);

        run_to_end(&mut tw, &mut timers);

        assert_eq!(tw.revealed(), "Hi, I'm Christian!");
        assert!(!tw.is_active());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn reveal_states_step_through_prefixes() {
        let mut timers = Timers::new();
        let mut tw = Typewriter::new("Hi!");
        tw.start(&mut timers);

        assert_eq!(tw.revealed(), "");

        let mut seen = vec![tw.revealed().to_string()];
        while tw.is_active() {
            for token in timers.advance(MAX_STEP_DELAY_MS * 2) {
                tw.on_timer(token, &mut timers);
            }
            seen.push(tw.revealed().to_string());
        }

        assert_eq!(seen, vec!["", "H", "Hi", "Hi!"]);
        assert!(!tw.is_active());
    }

    #[test]
    fn revealed_length_is_monotonic_and_restart_resets() {
        let mut timers = Timers::new();
        let mut tw = Typewriter::new("abcdef");
        tw.start(&mut timers);

        let mut previous = 0;
        for _ in 0..3 {
            for token in timers.advance(MAX_STEP_DELAY_MS) {
                tw.on_timer(token, &mut timers);
            }
            assert!(tw.revealed_chars() >= previous);
            previous = tw.revealed_chars();
        }
        assert!(previous > 0);

        tw.restart(&mut timers);
        assert_eq!(tw.revealed_chars(), 0);
        assert!(tw.is_active());
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn stale_timer_after_cancel_is_noop() {
        let mut timers = Timers::new();
        let mut tw = Typewriter::new("hello");
        tw.start(&mut timers);

        let stale = tw.pending_token().unwrap();
        tw.cancel(&mut timers);

        // Simulate the cancelled step's callback arriving late anyway
        tw.on_timer(stale, &mut timers);

        assert_eq!(tw.revealed(), "");
        assert_eq!(tw.revealed_chars(), 0);
        assert!(!tw.is_active());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn stale_timer_after_restart_does_not_double_step() {
        let mut timers = Timers::new();
        let mut tw = Typewriter::new("hello");
        tw.start(&mut timers);
        let first_session = tw.pending_token().unwrap();

        tw.restart(&mut timers);
        let second_session = tw.pending_token().unwrap();
        assert_ne!(first_session, second_session);

        // The old session's token must not advance the new session
        tw.on_timer(first_session, &mut timers);
        assert_eq!(tw.revealed_chars(), 0);

        tw.on_timer(second_session, &mut timers);
        assert_eq!(tw.revealed_chars(), 1);
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn empty_source_finishes_immediately() {
        let mut timers = Timers::new();
        let mut tw = Typewriter::new("");
        tw.start(&mut timers);

        assert!(!tw.is_active());
        assert_eq!(tw.revealed(), "");
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn at_most_one_pending_step() {
        let mut timers = Timers::new();
        let mut tw = Typewriter::new("abc");
        tw.start(&mut timers);

        while tw.is_active() {
            assert_eq!(timers.pending(), 1);
            for token in timers.advance(MAX_STEP_DELAY_MS * 2) {
                tw.on_timer(token, &mut timers);
            }
        }
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn plain_step_delay_stays_in_base_range() {
        let mut timers = Timers::new();
        let mut tw = Typewriter::new("ab");
        tw.start(&mut timers);

        // Step revealing 'a' schedules the next step with an undoubled delay
        for token in timers.advance(MAX_STEP_DELAY_MS) {
            tw.on_timer(token, &mut timers);
        }
        let delay = tw.last_scheduled_delay_ms().unwrap();
        assert!((MIN_STEP_DELAY_MS..MAX_STEP_DELAY_MS).contains(&delay));
    }

    #[test]
    fn punctuation_doubles_the_following_delay() {
        for pause in PAUSE_CHARS {
            let mut timers = Timers::new();
            let mut tw = Typewriter::new(format!("{pause}x"));
            tw.start(&mut timers);

            for token in timers.advance(MAX_STEP_DELAY_MS) {
                tw.on_timer(token, &mut timers);
            }
            let delay = tw.last_scheduled_delay_ms().unwrap();
            assert!(
                (MIN_STEP_DELAY_MS * 2..MAX_STEP_DELAY_MS * 2).contains(&delay),
                "delay after {pause:?} was {delay}ms"
            );
        }
    }

    #[test]
    fn punctuation_delays_are_statistically_double() {
        let mut plain_total = 0u64;
        let mut pause_total = 0u64;
        let samples = 200;

        for _ in 0..samples {
            let mut timers = Timers::new();
            let mut tw = Typewriter::new("a!x");
            tw.start(&mut timers);

            for token in timers.advance(MAX_STEP_DELAY_MS) {
                tw.on_timer(token, &mut timers);
            }
            plain_total += tw.last_scheduled_delay_ms().unwrap();

            for token in timers.advance(MAX_STEP_DELAY_MS * 2) {
                tw.on_timer(token, &mut timers);
            }
            pause_total += tw.last_scheduled_delay_ms().unwrap();
        }

        let plain_mean = plain_total as f64 / samples as f64;
        let pause_mean = pause_total as f64 / samples as f64;
        assert!(
            pause_mean > plain_mean + 30.0,
            "expected doubled pacing, got plain {plain_mean:.1}ms vs pause {pause_mean:.1}ms"
        );
    }

    #[test]
    fn clear_revealed_resets_prefix_only() {
        let mut timers = Timers::new();
        let mut tw = Typewriter::new("abc");
        tw.start(&mut timers);
        for token in timers.advance(MAX_STEP_DELAY_MS) {
            tw.on_timer(token, &mut timers);
        }
        assert_eq!(tw.revealed(), "a");

        tw.cancel(&mut timers);
        assert_eq!(tw.revealed(), "a", "cancel alone preserves text");

        tw.clear_revealed();
        assert_eq!(tw.revealed(), "");
    }

    #[test]
    fn multibyte_source_reveals_on_char_boundaries() {
        let mut timers = Timers::new();
        let mut tw = Typewriter::new("héllo — ok");
        tw.start(&mut timers);

        run_to_end(&mut tw, &mut timers);
        assert_eq!(tw.revealed(), "héllo — ok");
    }
}
