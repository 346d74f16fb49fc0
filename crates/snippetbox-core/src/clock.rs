//! Time source for expiration decisions
//!
//! The store never asks the database for the current time. It asks a
//! `Clock`, so that "is this snippet still visible" is a pure comparison
//! against a value the caller controls.

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Source of the current UTC time
pub trait Clock: Send + Sync {
    /// The current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock
///
/// # Example
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use snippetbox_core::clock::{Clock, FixedClock};
///
/// let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
/// clock.advance(Duration::days(1));
/// assert_eq!(clock.now(), Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
/// ```
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Jump to an absolute instant
    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    /// Move the clock forward (or backward, for a negative delta)
    pub fn advance(&self, delta: Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += delta;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
            .lock()
            .map(|guard| *guard)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}
