//! Notifications emitted by successful operations.

use serde::{Deserialize, Serialize};
use staking_types::AccountId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakingEvent {
    StakeDeposited {
        account: AccountId,
        amount: u128,
    },
    WithdrawInitiated {
        account: AccountId,
        amount: u128,
    },
    WithdrawExecuted {
        account: AccountId,
        amount: u128,
        reward: u128,
    },
}

impl StakingEvent {
    pub fn account(&self) -> &AccountId {
        match self {
            Self::StakeDeposited { account, .. }
            | Self::WithdrawInitiated { account, .. }
            | Self::WithdrawExecuted { account, .. } => account,
        }
    }
}
