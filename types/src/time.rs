//! Timestamp type used throughout the staking core.
//!
//! Timestamps are Unix epoch seconds (UTC) supplied by a trusted clock. The
//! core never reads the system clock itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds in one day, the unit of every reward and lock-period computation.
pub const SECS_PER_DAY: u64 = 86_400;

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed since this timestamp (relative to `now`).
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Whole days elapsed since this timestamp, truncated toward zero.
    pub fn days_until(&self, now: Timestamp) -> u64 {
        self.elapsed_since(now) / SECS_PER_DAY
    }

    /// Whether at least `days` whole days separate this timestamp from `now`.
    pub fn days_have_passed(&self, days: u64, now: Timestamp) -> bool {
        now >= self.plus_days(days)
    }

    /// This timestamp shifted forward by whole days, saturating at `u64::MAX`.
    pub fn plus_days(&self, days: u64) -> Self {
        Self(self.0.saturating_add(days.saturating_mul(SECS_PER_DAY)))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
