//! Staking-core errors.
//!
//! Every variant's display string is a stable identifier: external consumers
//! match on it. [`StakingError::kind`] groups variants into the coarse
//! categories callers branch on.

use staking_rewards::RewardError;
use staking_types::TransferError;
use thiserror::Error;

/// Coarse error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed, zero or mismatched arguments.
    Validation,
    /// Caller lacks administrative authority.
    Authorization,
    /// Operation illegal for the current status or pause state.
    Lifecycle,
    /// Deposit would exceed the current admission ceiling.
    LimitExceeded,
    /// Duplicate or missing deposit / withdrawal initiation.
    StateConflict,
    /// Lock period or unstaking period not yet elapsed.
    TemporalGuard,
    /// The value-transfer collaborator declined a move.
    TransferFailure,
}

#[derive(Debug, Error)]
pub enum StakingError {
    #[error(transparent)]
    Rewards(#[from] RewardError),

    #[error("[Validation] {0} is the zero address")]
    ZeroAccount(&'static str),

    #[error("[Validation] The stake deposit has to be larger than 0")]
    ZeroDeposit,

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("Ownable: caller is not the owner")]
    NotOwner,

    #[error("Pausable: paused")]
    Paused,

    #[error("Pausable: not paused")]
    NotPaused,

    #[error("[Lifecycle] Setup is already done")]
    SetupAlreadyDone,

    #[error("[Lifecycle] Setup is not done")]
    SetupNotDone,

    #[error("[Lifecycle] Staking limit is not setup")]
    StakingLimitNotSetup,

    #[error("[Lifecycle] Rewards are disabled")]
    RewardsDisabled,

    #[error("[Deposit] Your deposit would exceed the current staking limit")]
    LimitExceeded,

    #[error("[Deposit] You already have a stake")]
    AlreadyStaked,

    #[error("[Initiate Withdrawal] There is no stake deposit for this account")]
    NoStakeToInitiate,

    #[error("[Initiate Withdrawal] You already initiated the withdrawal")]
    AlreadyInitiated,

    #[error("[Withdraw] Not enough days passed")]
    LockPeriodActive,

    #[error("[Withdraw] There is no stake deposit for this account")]
    NoStakeToWithdraw,

    #[error("[Withdraw] Withdraw is not initialized")]
    WithdrawNotInitiated,

    #[error("[Withdraw] The unstaking period did not pass")]
    UnstakingPeriodActive,

    #[error("[Validation] This account doesn't have a stake deposit")]
    NoStakeDeposit,

    #[error("{0}")]
    DepositTransfer(TransferError),

    #[error("[Withdraw] Something went wrong while transferring your initial deposit: {0}")]
    PrincipalTransfer(TransferError),

    #[error("[Withdraw] Something went wrong while transferring your reward: {0}")]
    RewardTransfer(TransferError),

    /// The payout was declined and returning the staged reward failed too:
    /// `reward` is still held by the custody account.
    #[error(
        "[Withdraw] Something went wrong while transferring your initial deposit: {payout}; \
         returning the staged reward of {reward} failed: {rollback}"
    )]
    RewardStranded {
        payout: TransferError,
        rollback: TransferError,
        reward: u128,
    },
}

impl StakingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Rewards(RewardError::CheckpointTimeRegression) => ErrorKind::TemporalGuard,
            Self::Rewards(_)
            | Self::ZeroAccount(_)
            | Self::ZeroDeposit
            | Self::Config(_)
            | Self::Snapshot(_) => ErrorKind::Validation,
            Self::NotOwner => ErrorKind::Authorization,
            Self::Paused
            | Self::NotPaused
            | Self::SetupAlreadyDone
            | Self::SetupNotDone
            | Self::StakingLimitNotSetup
            | Self::RewardsDisabled => ErrorKind::Lifecycle,
            Self::LimitExceeded => ErrorKind::LimitExceeded,
            Self::AlreadyStaked
            | Self::NoStakeToInitiate
            | Self::AlreadyInitiated
            | Self::NoStakeToWithdraw
            | Self::WithdrawNotInitiated
            | Self::NoStakeDeposit => ErrorKind::StateConflict,
            Self::LockPeriodActive | Self::UnstakingPeriodActive => ErrorKind::TemporalGuard,
            Self::DepositTransfer(_)
            | Self::PrincipalTransfer(_)
            | Self::RewardTransfer(_)
            | Self::RewardStranded { .. } => ErrorKind::TransferFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_errors_pass_through_verbatim() {
        let err: StakingError = RewardError::FirstLowerBoundNotZero.into();
        assert_eq!(err.to_string(), "[Validation] First lower bound should be 0");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn clock_regression_is_temporal() {
        let err: StakingError = RewardError::CheckpointTimeRegression.into();
        assert_eq!(err.kind(), ErrorKind::TemporalGuard);
    }

    #[test]
    fn transfer_reasons_are_embedded() {
        let reason = TransferError::new("ERC20: transfer amount exceeds allowance");
        assert_eq!(
            StakingError::DepositTransfer(reason.clone()).to_string(),
            "ERC20: transfer amount exceeds allowance"
        );
        assert_eq!(
            StakingError::RewardTransfer(reason).to_string(),
            "[Withdraw] Something went wrong while transferring your reward: \
             ERC20: transfer amount exceeds allowance"
        );
    }

    #[test]
    fn stranded_reward_names_both_failures() {
        let err = StakingError::RewardStranded {
            payout: TransferError::new("recipient frozen"),
            rollback: TransferError::new("rewards account frozen"),
            reward: 15,
        };
        assert_eq!(
            err.to_string(),
            "[Withdraw] Something went wrong while transferring your initial deposit: \
             recipient frozen; returning the staged reward of 15 failed: rewards account frozen"
        );
        assert_eq!(err.kind(), ErrorKind::TransferFailure);
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(StakingError::NotOwner.kind(), ErrorKind::Authorization);
        assert_eq!(StakingError::Paused.kind(), ErrorKind::Lifecycle);
        assert_eq!(StakingError::LimitExceeded.kind(), ErrorKind::LimitExceeded);
        assert_eq!(StakingError::AlreadyInitiated.kind(), ErrorKind::StateConflict);
        assert_eq!(StakingError::UnstakingPeriodActive.kind(), ErrorKind::TemporalGuard);
        assert_eq!(StakingError::ZeroAccount("rewards account").to_string(),
            "[Validation] rewards account is the zero address");
    }
}
