//! Monotonic timestamps used to compute request durations.

use std::time::{Duration, Instant};

/// Offset from a clock's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp(Duration);

impl Timestamp {
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    pub fn from_duration(offset: Duration) -> Self {
        Self(offset)
    }

    /// Milliseconds elapsed from `earlier` to `self`, zero if `earlier` is later.
    pub fn millis_since(&self, earlier: Timestamp) -> f64 {
        self.0.saturating_sub(earlier.0).as_secs_f64() * 1000.0
    }
}

/// Source of timestamps for the recorder.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Clock backed by [`Instant`], measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.origin.elapsed())
    }
}

/// Opaque correlation value handed out at request start.
///
/// Hosts store it in whatever request-scoped slot their framework offers and
/// give it back at completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    start: Timestamp,
}

impl RequestToken {
    pub fn new(start: Timestamp) -> Self {
        Self { start }
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }
}
