//! The tiered annual-rate schedule.
//!
//! Tiers partition the total-staked axis into contiguous `[lower, upper)`
//! ranges, each with one annual rate in percent. A synthetic terminal tier
//! `{0%, [max_amount, max_amount + TERMINAL_TIER_SPAN)}` is appended on
//! construction so a pool filled to its cap accrues nothing.

use crate::error::RewardError;
use serde::{Deserialize, Serialize};

/// Width of the synthetic terminal tier above `max_amount`.
pub const TERMINAL_TIER_SPAN: u128 = 10;

/// Largest annual rate a tier may carry, in percent.
pub const MAX_ANNUAL_RATE: u32 = 100;

/// One contiguous range of total stake with a fixed annual rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTier {
    /// Annual rate in whole percent.
    pub annual_rate: u32,
    pub lower_bound: u128,
    pub upper_bound: u128,
}

impl RewardTier {
    pub fn contains(&self, total_staked: u128) -> bool {
        self.lower_bound <= total_staked && total_staked < self.upper_bound
    }
}

/// A validated, immutable tier schedule plus the bonus multiplier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSchedule {
    multiplier: u32,
    tiers: Vec<RewardTier>,
}

impl TierSchedule {
    /// Validate the parallel tier arrays and build the schedule.
    ///
    /// `max_amount` is the staking cap; the last configured upper bound must
    /// equal it, and the terminal zero-rate tier starts there.
    pub fn new(
        multiplier: u32,
        annual_rates: &[u32],
        lower_bounds: &[u128],
        upper_bounds: &[u128],
        max_amount: u128,
    ) -> Result<Self, RewardError> {
        if annual_rates.is_empty() || lower_bounds.is_empty() || upper_bounds.is_empty() {
            return Err(RewardError::EmptyTiers);
        }
        if annual_rates.len() != lower_bounds.len() || lower_bounds.len() != upper_bounds.len() {
            return Err(RewardError::TierLengthMismatch);
        }
        if lower_bounds[0] != 0 {
            return Err(RewardError::FirstLowerBoundNotZero);
        }
        if multiplier == 0 || multiplier >= 100 || 100 % multiplier != 0 {
            return Err(RewardError::InvalidMultiplier);
        }

        let mut tiers: Vec<RewardTier> = Vec::with_capacity(annual_rates.len() + 1);
        for (index, ((&annual_rate, &lower_bound), &upper_bound)) in annual_rates
            .iter()
            .zip(lower_bounds)
            .zip(upper_bounds)
            .enumerate()
        {
            if annual_rate > MAX_ANNUAL_RATE {
                return Err(RewardError::RateTooHigh {
                    index,
                    rate: annual_rate,
                });
            }
            if lower_bound >= upper_bound {
                return Err(RewardError::TiersNotContiguous { index });
            }
            if let Some(prev) = tiers.last() {
                if prev.upper_bound != lower_bound {
                    return Err(RewardError::TiersNotContiguous { index });
                }
            }
            tiers.push(RewardTier {
                annual_rate,
                lower_bound,
                upper_bound,
            });
        }

        if upper_bounds[upper_bounds.len() - 1] != max_amount {
            return Err(RewardError::LastUpperBoundMismatch);
        }
        tiers.push(RewardTier {
            annual_rate: 0,
            lower_bound: max_amount,
            upper_bound: max_amount
                .checked_add(TERMINAL_TIER_SPAN)
                .ok_or(RewardError::Overflow)?,
        });

        Ok(Self { multiplier, tiers })
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// All tiers, including the terminal one.
    pub fn tiers(&self) -> &[RewardTier] {
        &self.tiers
    }

    pub fn get(&self, index: usize) -> Option<&RewardTier> {
        self.tiers.get(index)
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// The rate of the lowest tier, used for the first checkpoint.
    pub fn lowest_rate(&self) -> u32 {
        self.tiers.first().map_or(0, |tier| tier.annual_rate)
    }

    /// Index of the tier containing `total_staked`.
    ///
    /// Totals beyond the terminal tier map to the terminal tier.
    pub fn tier_index_for(&self, total_staked: u128) -> usize {
        self.tiers
            .iter()
            .position(|tier| tier.contains(total_staked))
            .unwrap_or(self.tiers.len().saturating_sub(1))
    }

    /// Annual rate implied by `total_staked`.
    pub fn rate_for(&self, total_staked: u128) -> u32 {
        self.tiers
            .get(self.tier_index_for(total_staked))
            .map_or(0, |tier| tier.annual_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAP: u128 = 5_000_000_000;

    fn reference(multiplier: u32) -> Result<TierSchedule, RewardError> {
        TierSchedule::new(
            multiplier,
            &[17, 19, 21, 23],
            &[0, 1_250_000_000, 2_500_000_000, 3_750_000_000],
            &[1_250_000_000, 2_500_000_000, 3_750_000_000, CAP],
            CAP,
        )
    }

    #[test]
    fn appends_terminal_zero_rate_tier() {
        let schedule = reference(5).unwrap();
        assert_eq!(schedule.len(), 5);
        assert_eq!(
            schedule.tiers()[4],
            RewardTier {
                annual_rate: 0,
                lower_bound: CAP,
                upper_bound: CAP + 10,
            }
        );
        assert_eq!(schedule.multiplier(), 5);
        assert_eq!(schedule.lowest_rate(), 17);
    }

    #[test]
    fn tiers_are_contiguous_from_zero() {
        let schedule = reference(5).unwrap();
        assert_eq!(schedule.tiers()[0].lower_bound, 0);
        for pair in schedule.tiers().windows(2) {
            assert_eq!(pair[0].upper_bound, pair[1].lower_bound);
        }
    }

    #[test]
    fn looks_up_rate_by_total() {
        let schedule = reference(5).unwrap();
        assert_eq!(schedule.rate_for(0), 17);
        assert_eq!(schedule.rate_for(1_249_999_999), 17);
        assert_eq!(schedule.rate_for(1_250_000_000), 19);
        assert_eq!(schedule.rate_for(3_000_000_000), 21);
        assert_eq!(schedule.rate_for(4_999_999_999), 23);
        assert_eq!(schedule.rate_for(CAP), 0);
        assert_eq!(schedule.tier_index_for(u128::MAX), 4);
    }

    #[test]
    fn rejects_empty_arrays() {
        let err = TierSchedule::new(5, &[], &[0], &[CAP], CAP).unwrap_err();
        assert_eq!(err, RewardError::EmptyTiers);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = TierSchedule::new(5, &[17, 19], &[0], &[1, CAP], CAP).unwrap_err();
        assert_eq!(err, RewardError::TierLengthMismatch);
    }

    #[test]
    fn rejects_nonzero_first_lower_bound() {
        let err = TierSchedule::new(5, &[17], &[123], &[CAP], CAP).unwrap_err();
        assert_eq!(err, RewardError::FirstLowerBoundNotZero);
    }

    #[test]
    fn multiplier_must_divide_one_hundred() {
        for bad in [0, 3, 100, 123] {
            assert_eq!(reference(bad).unwrap_err(), RewardError::InvalidMultiplier);
        }
        for good in [1, 2, 4, 5, 10, 20, 25, 50] {
            assert!(reference(good).is_ok(), "multiplier {good} should be accepted");
        }
    }

    #[test]
    fn rejects_rate_above_one_hundred() {
        let err = TierSchedule::new(5, &[101], &[0], &[CAP], CAP).unwrap_err();
        assert_eq!(err, RewardError::RateTooHigh { index: 0, rate: 101 });
    }

    #[test]
    fn rejects_gaps_and_overlaps() {
        let gap = TierSchedule::new(5, &[17, 19], &[0, 200], &[100, CAP], CAP).unwrap_err();
        assert_eq!(gap, RewardError::TiersNotContiguous { index: 1 });
        let inverted = TierSchedule::new(5, &[17], &[0], &[0], CAP).unwrap_err();
        assert_eq!(inverted, RewardError::TiersNotContiguous { index: 0 });
    }

    #[test]
    fn last_upper_bound_must_match_cap() {
        let err = TierSchedule::new(5, &[17], &[0], &[CAP - 1], CAP).unwrap_err();
        assert_eq!(err, RewardError::LastUpperBoundMismatch);
    }

    #[test]
    fn error_messages_are_stable() {
        assert_eq!(
            RewardError::InvalidMultiplier.to_string(),
            "[Validation] Multiplier should be smaller than 100 and divide it equally"
        );
        assert_eq!(
            RewardError::EmptyTiers.to_string(),
            "[Validation] All parameters must have at least one element"
        );
    }
}
