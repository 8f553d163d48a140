//! Reward-engine errors.
//!
//! Display strings are matched by external consumers and must not change.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewardError {
    #[error("[Validation] Some parameters are 0")]
    ZeroParameter,

    #[error("[Validation] maxAmount should be a multiple of initialAmount")]
    MaxAmountNotMultiple,

    #[error("[Validation] All parameters must have at least one element")]
    EmptyTiers,

    #[error("[Validation] All parameters must have the same number of elements")]
    TierLengthMismatch,

    #[error("[Validation] First lower bound should be 0")]
    FirstLowerBoundNotZero,

    #[error("[Validation] Multiplier should be smaller than 100 and divide it equally")]
    InvalidMultiplier,

    #[error("[Validation] Annual reward rate should be at most 100")]
    RateTooHigh { index: usize, rate: u32 },

    #[error("[Validation] Reward tiers should be contiguous and non-overlapping")]
    TiersNotContiguous { index: usize },

    #[error("[Validation] Last upper bound should be maxAmount")]
    LastUpperBoundMismatch,

    #[error("[Validation] checkpoint {0} does not exist")]
    CheckpointNotFound(u64),

    #[error("[Validation] checkpoint timestamp precedes the latest checkpoint")]
    CheckpointTimeRegression,

    #[error("[Validation] arithmetic overflow in reward computation")]
    Overflow,
}
