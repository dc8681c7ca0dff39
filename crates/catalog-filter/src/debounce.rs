//! Debounced query input.

use std::time::{Duration, Instant};

/// Holds the latest typed query until input has been idle long enough.
///
/// Only the most recent input is kept, so a query that was superseded
/// before the delay elapsed is never applied.
#[derive(Debug, Clone)]
pub struct QueryDebouncer {
    delay: Duration,
    pending: Option<String>,
    last_input: Option<Instant>,
}

impl QueryDebouncer {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(debounce_ms),
            pending: None,
            last_input: None,
        }
    }

    /// Record a keystroke. Replaces any pending query and restarts the timer.
    pub fn note_input(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(query.into());
        self.last_input = Some(now);
    }

    /// Take the pending query if input has been idle for the full delay.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let last_input = self.last_input?;
        if now.saturating_duration_since(last_input) < self.delay {
            return None;
        }
        self.last_input = None;
        self.pending.take()
    }

    /// Take the pending query immediately, e.g. when the user presses enter.
    pub fn flush(&mut self) -> Option<String> {
        self.last_input = None;
        self.pending.take()
    }
}
