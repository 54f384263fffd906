use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// Source of append timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that returns a fixed instant and advances by `step` after each read.
///
/// Gives tests and replays deterministic, strictly increasing timestamps.
#[derive(Debug)]
pub struct ManualClock {
    next: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: Mutex::new(start),
            step,
        }
    }

    /// Moves the next returned instant to `at`.
    pub fn set(&self, at: DateTime<Utc>) {
        *self.next.lock().unwrap() = at;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().unwrap();
        let now = *next;
        *next = now + self.step;
        now
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
