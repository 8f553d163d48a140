//! Nullable clock: deterministic time for testing.

use staking_types::{Timestamp, SECS_PER_DAY};
use std::cell::Cell;

/// A clock that only moves when told to.
///
/// Remembers where it started, so scenarios can be written in days since
/// launch.
pub struct NullClock {
    origin: u64,
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(origin_secs: u64) -> Self {
        Self {
            origin: origin_secs,
            current: Cell::new(origin_secs),
        }
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }

    pub fn origin(&self) -> Timestamp {
        Timestamp::new(self.origin)
    }

    /// The instant `days` whole days after the origin.
    pub fn at_day(&self, days: u64) -> Timestamp {
        self.origin().plus_days(days)
    }

    /// Whole days elapsed since the origin.
    pub fn day(&self) -> u64 {
        self.origin().days_until(self.now())
    }

    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get().saturating_add(secs));
    }

    pub fn advance_days(&self, days: u64) {
        self.advance(days.saturating_mul(SECS_PER_DAY));
    }

    pub fn set(&self, secs: u64) {
        self.current.set(secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_only_on_request() {
        let clock = NullClock::new(100);
        assert_eq!(clock.now(), Timestamp::new(100));
        clock.advance(5);
        clock.advance_days(1);
        assert_eq!(clock.now(), Timestamp::new(105 + SECS_PER_DAY));
        clock.set(7);
        assert_eq!(clock.now(), Timestamp::new(7));
    }

    #[test]
    fn days_are_counted_from_origin() {
        let clock = NullClock::new(1_000);
        assert_eq!(clock.day(), 0);
        clock.advance(SECS_PER_DAY - 1);
        assert_eq!(clock.day(), 0);
        clock.advance(1);
        assert_eq!(clock.day(), 1);
        assert_eq!(clock.at_day(3), Timestamp::new(1_000 + 3 * SECS_PER_DAY));
        assert_eq!(clock.origin(), Timestamp::new(1_000));
    }
}
