use proptest::prelude::*;

use staking_types::{Timestamp, SECS_PER_DAY};

proptest! {
    /// Whole-day elapsed time never decreases as the query time moves forward.
    #[test]
    fn days_until_monotonic(
        start in 0u64..1_000_000_000,
        offset in 0u64..100_000_000,
        step in 0u64..10_000_000,
    ) {
        let t = Timestamp::new(start);
        let d1 = t.days_until(Timestamp::new(start + offset));
        let d2 = t.days_until(Timestamp::new(start + offset + step));
        prop_assert!(d2 >= d1);
    }

    /// Shifting by `n` days and measuring back yields exactly `n` days.
    #[test]
    fn plus_days_then_days_until_is_identity(
        start in 0u64..1_000_000_000,
        days in 0u64..100_000,
    ) {
        let t = Timestamp::new(start);
        prop_assert_eq!(t.days_until(t.plus_days(days)), days);
        prop_assert_eq!(t.plus_days(days).as_secs() - start, days * SECS_PER_DAY);
    }
}
