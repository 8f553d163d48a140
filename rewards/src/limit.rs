//! Staking-limit waves: the admission ceiling as a function of time.
//!
//! The ceiling starts at `initial_amount` at launch and grows by another
//! `initial_amount` every `days_interval` days until it reaches `max_amount`:
//!
//! `limit(t) = initial × (1 + min(⌊(t − launch) / interval⌋, max_intervals − 1))`
//!
//! Because `max_amount` is an exact multiple of `initial_amount`, clamping the
//! wave count is the same as `min(max_amount, …)`: the ceiling lands exactly on
//! `max_amount` and never extrapolates past it.

use crate::error::RewardError;
use serde::{Deserialize, Serialize};
use staking_types::{Timestamp, SECS_PER_DAY};

/// Validated staking-limit parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingLimitConfig {
    pub max_amount: u128,
    pub initial_amount: u128,
    /// Length of one admission wave, in days.
    pub days_interval: u64,
    /// Cooldown between initiating and executing a withdrawal, in days.
    pub unstaking_period: u64,
    /// Number of waves needed to reach `max_amount` (`max_amount / initial_amount`).
    pub max_intervals: u64,
}

impl StakingLimitConfig {
    pub fn new(
        max_amount: u128,
        initial_amount: u128,
        days_interval: u64,
        unstaking_period: u64,
    ) -> Result<Self, RewardError> {
        if max_amount == 0 || initial_amount == 0 || days_interval == 0 || unstaking_period == 0 {
            return Err(RewardError::ZeroParameter);
        }
        if max_amount % initial_amount != 0 {
            return Err(RewardError::MaxAmountNotMultiple);
        }
        let max_intervals =
            u64::try_from(max_amount / initial_amount).map_err(|_| RewardError::Overflow)?;
        Ok(Self {
            max_amount,
            initial_amount,
            days_interval,
            unstaking_period,
            max_intervals,
        })
    }

    /// Minimum holding duration before a withdrawal may be initiated, in days.
    pub fn lock_period_days(&self) -> u64 {
        self.days_interval.saturating_mul(self.max_intervals)
    }

    /// Number of completed waves at `now`, clamped to the last wave.
    pub fn waves_elapsed(&self, launch: Timestamp, now: Timestamp) -> u64 {
        let wave_secs = self.days_interval.saturating_mul(SECS_PER_DAY);
        let waves = launch
            .elapsed_since(now)
            .checked_div(wave_secs)
            .unwrap_or(0);
        waves.min(self.max_intervals.saturating_sub(1))
    }

    /// The admission ceiling at `now`.
    pub fn current_staking_limit(&self, launch: Timestamp, now: Timestamp) -> u128 {
        let waves = self.waves_elapsed(launch, now) as u128;
        // waves + 1 <= max_intervals, so this never exceeds max_amount.
        self.initial_amount.saturating_mul(waves + 1)
    }
}
