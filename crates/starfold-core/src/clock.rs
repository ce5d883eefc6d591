//! Clock abstraction for determinism.

use chrono::{DateTime, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Seconds elapsed between `since` and now, clamped at zero.
    fn seconds_since(&self, since: DateTime<Utc>) -> f64 {
        seconds_between(since, self.now())
    }
}

/// Seconds from `since` to `until` at microsecond precision, clamped at zero.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn seconds_between(since: DateTime<Utc>, until: DateTime<Utc>) -> f64 {
    (until - since)
        .num_microseconds()
        .map_or(0.0, |micros| micros.max(0) as f64 / 1_000_000.0)
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
