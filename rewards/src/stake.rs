//! Per-account stake deposits.

use serde::{Deserialize, Serialize};
use staking_types::{AccountId, Timestamp};

/// A live deposit. An account holds at most one at a time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeDeposit {
    pub owner: AccountId,
    pub amount: u128,
    /// When the deposit was made; accrual starts here.
    pub start_timestamp: Timestamp,
    /// Checkpoint in effect when the deposit was made (a back-reference into
    /// the global history, not ownership).
    pub start_checkpoint_index: u64,
    /// Set once a withdrawal is initiated; the reward is frozen at this time.
    pub withdrawal_initiated_at: Option<Timestamp>,
}

impl StakeDeposit {
    pub fn new(
        owner: AccountId,
        amount: u128,
        start_timestamp: Timestamp,
        start_checkpoint_index: u64,
    ) -> Self {
        Self {
            owner,
            amount,
            start_timestamp,
            start_checkpoint_index,
            withdrawal_initiated_at: None,
        }
    }

    pub fn is_withdrawal_initiated(&self) -> bool {
        self.withdrawal_initiated_at.is_some()
    }
}
