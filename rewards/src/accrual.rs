//! Time-weighted reward computation.
//!
//! For a deposit held `d` whole days, with the history yielding segments
//! `(rate_i, days_i)` inside the holding window:
//!
//! ```text
//! weighted_sum   = Σ rate_i × days_i
//! average_rate   = ⌊weighted_sum / d⌋
//! bonus          = ⌊weighted_sum × multiplier / 1000⌋
//! effective_rate = average_rate + bonus
//! reward         = ⌊amount × effective_rate × d / 36500⌋
//! ```
//!
//! Every division truncates and every multiplication happens before the
//! division that follows it, in exactly this order, so results are
//! reproducible bit-for-bit.

use crate::error::RewardError;
use crate::history::{BaseRewardHistory, RateInterval};
use crate::stake::StakeDeposit;
use staking_types::Timestamp;

/// 365 days × 100 (rates are whole percent).
pub const ANNUALIZATION_DIVISOR: u128 = 36_500;

/// Scale of the bonus term.
pub const BONUS_DIVISOR: u128 = 1_000;

/// Principal plus the reward accrued on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardQuote {
    pub amount: u128,
    pub reward: u128,
}

impl RewardQuote {
    /// Principal plus reward, the full payout.
    pub fn total(&self) -> Option<u128> {
        self.amount.checked_add(self.reward)
    }
}

/// Read-only reward calculator over the global checkpoint history.
pub struct RewardAccrualEngine<'a> {
    history: &'a BaseRewardHistory,
    multiplier: u32,
}

impl<'a> RewardAccrualEngine<'a> {
    pub fn new(history: &'a BaseRewardHistory, multiplier: u32) -> Self {
        Self {
            history,
            multiplier,
        }
    }

    /// Reward earned by `deposit` up to `as_of`.
    ///
    /// Returns `(amount, 0)` when less than one whole day has elapsed.
    pub fn reward(
        &self,
        deposit: &StakeDeposit,
        as_of: Timestamp,
    ) -> Result<RewardQuote, RewardError> {
        let staking_days = deposit.start_timestamp.days_until(as_of);
        if staking_days == 0 {
            return Ok(RewardQuote {
                amount: deposit.amount,
                reward: 0,
            });
        }

        let intervals = self.history.intervals_between(
            deposit.start_checkpoint_index,
            deposit.start_timestamp,
            as_of,
        )?;
        let weighted_sum = weighted_sum(&intervals)?;
        let effective_rate = self.effective_rate(weighted_sum, staking_days)?;

        let reward = deposit
            .amount
            .checked_mul(effective_rate)
            .and_then(|v| v.checked_mul(staking_days as u128))
            .ok_or(RewardError::Overflow)?
            / ANNUALIZATION_DIVISOR;

        Ok(RewardQuote {
            amount: deposit.amount,
            reward,
        })
    }

    /// Average rate over the holding period plus the multiplier bonus.
    pub fn effective_rate(&self, weighted_sum: u128, staking_days: u64) -> Result<u128, RewardError> {
        if staking_days == 0 {
            return Ok(0);
        }
        let average_rate = weighted_sum / staking_days as u128;
        let bonus = weighted_sum
            .checked_mul(self.multiplier as u128)
            .ok_or(RewardError::Overflow)?
            / BONUS_DIVISOR;
        average_rate.checked_add(bonus).ok_or(RewardError::Overflow)
    }
}

/// `Σ rate × days` over the segments, with no intermediate rounding.
pub fn weighted_sum(intervals: &[RateInterval]) -> Result<u128, RewardError> {
    intervals.iter().try_fold(0u128, |acc, interval| {
        (interval.annual_rate as u128)
            .checked_mul(interval.days as u128)
            .and_then(|term| acc.checked_add(term))
            .ok_or(RewardError::Overflow)
    })
}
