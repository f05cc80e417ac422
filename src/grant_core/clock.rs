//! Clock abstraction used to stamp authentication time.

use chrono::{DateTime, Utc};

/// Source of the current UTC instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by [`Utc::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Creates a clock fixed at the given Unix timestamp (seconds).
    ///
    /// # Panics
    ///
    /// Panics if `secs` is outside the range chrono can represent.
    pub fn from_timestamp(secs: i64) -> Self {
        match DateTime::from_timestamp(secs, 0) {
            Some(instant) => FixedClock(instant),
            None => panic!("timestamp {secs} out of range for FixedClock"),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
