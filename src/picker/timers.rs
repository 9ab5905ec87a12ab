//! Deadline-based timers for a single-threaded event loop.
//!
//! Nothing here sleeps or spawns: the host asks for the next deadline, waits
//! for terminal input with that timeout, then lets the picker fire whatever
//! expired.

use std::time::{Duration, Instant};

use chrono::NaiveDate;

/// Window in which focus/blur/mousedown bursts collapse into one decision
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(5);

/// How long `open()` stays suppressed after `close()`
pub const CLOSING_GUARD: Duration = Duration::from_millis(100);

/// Source of monotonic time and of the current calendar date
pub trait Clock {
    fn now(&self) -> Instant;
    fn today(&self) -> NaiveDate;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Trailing-edge debounce: every trigger restarts the window and only the
/// last one fires.
#[derive(Debug, Clone)]
pub struct Debounce {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self { window, deadline: None }
    }

    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once when the window has elapsed
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Self-expiring flag armed by `close()`
#[derive(Debug, Clone, Default)]
pub struct ClosingGuard {
    until: Option<Instant>,
}

impl ClosingGuard {
    pub fn arm(&mut self, now: Instant) {
        self.until = Some(now + CLOSING_GUARD);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }
}
