//! Reward accrual engine for tiered, time-weighted staking rewards.
//!
//! All computation is deterministic integer arithmetic over whole days:
//! `reward = amount × effective_rate × days / 36500`
//!
//! This crate handles:
//! - The staking-limit wave function (admission ceiling over time)
//! - The tiered annual-rate schedule with its terminal zero-rate tier
//! - The append-only checkpoint history recording when the applicable rate changed
//! - Time-weighted reward computation for a single deposit

pub mod accrual;
pub mod error;
pub mod history;
pub mod limit;
pub mod stake;
pub mod tier;

pub use accrual::{RewardAccrualEngine, RewardQuote, ANNUALIZATION_DIVISOR, BONUS_DIVISOR};
pub use error::RewardError;
pub use history::{BaseRewardHistory, Checkpoint, RateInterval};
pub use limit::StakingLimitConfig;
pub use stake::StakeDeposit;
pub use tier::{RewardTier, TierSchedule, TERMINAL_TIER_SPAN};
