//! Resize coalescing.
//!
//! Terminals emit a burst of resize events while a window is dragged. Chart
//! bindings are only rebuilt once the size has been stable for `delay`; each
//! new event pushes the deadline back.

use std::time::{Duration, Instant};

pub const RESIZE_SETTLE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Record an event, cancelling any pending deadline.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// How long the event loop may block before the deadline is due;
    /// `None` when nothing is pending.
    pub fn time_left(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// True exactly once per settled burst.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
