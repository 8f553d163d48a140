//! Serializable contract state and its bincode encoding.

use crate::config_store::ConfigurationStore;
use crate::error::StakingError;
use crate::lifecycle::LifecycleController;
use crate::registry::StakeRegistry;
use serde::{Deserialize, Serialize};
use staking_rewards::{BaseRewardHistory, StakeDeposit};
use staking_types::{AccountId, Timestamp};

/// Everything a [`StakingContract`](crate::StakingContract) owns apart from
/// its access policy and undrained events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingState {
    pub(crate) launch_timestamp: Timestamp,
    pub(crate) rewards_account: AccountId,
    pub(crate) custody_account: AccountId,
    pub(crate) config: ConfigurationStore,
    pub(crate) history: BaseRewardHistory,
    pub(crate) registry: StakeRegistry,
    pub(crate) lifecycle: LifecycleController,
}

impl StakingState {
    pub(crate) fn new(
        rewards_account: AccountId,
        custody_account: AccountId,
        launch_timestamp: Timestamp,
    ) -> Self {
        Self {
            launch_timestamp,
            rewards_account,
            custody_account,
            config: ConfigurationStore::default(),
            history: BaseRewardHistory::default(),
            registry: StakeRegistry::default(),
            lifecycle: LifecycleController::default(),
        }
    }

    pub fn config(&self) -> &ConfigurationStore {
        &self.config
    }

    pub fn history(&self) -> &BaseRewardHistory {
        &self.history
    }

    pub fn registry(&self) -> &StakeRegistry {
        &self.registry
    }

    pub fn lifecycle(&self) -> &LifecycleController {
        &self.lifecycle
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, StakingError> {
        bincode::serialize(self).map_err(|e| StakingError::Snapshot(e.to_string()))
    }

    /// Decode a snapshot and verify its cross-component invariants.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StakingError> {
        let state: Self =
            bincode::deserialize(bytes).map_err(|e| StakingError::Snapshot(e.to_string()))?;
        state.check_consistency()?;
        Ok(state)
    }

    fn check_consistency(&self) -> Result<(), StakingError> {
        let setup_done = self.lifecycle.is_setup_done();
        if setup_done != self.config.is_finalized() {
            return Err(StakingError::Snapshot(
                "status disagrees with configuration".to_string(),
            ));
        }
        if setup_done == self.history.is_empty() {
            return Err(StakingError::Snapshot(
                "checkpoint history disagrees with status".to_string(),
            ));
        }
        if !setup_done && !self.registry.is_empty() {
            return Err(StakingError::Snapshot(
                "deposits recorded before setup".to_string(),
            ));
        }
        for (key, deposit) in self.registry.entries() {
            self.check_deposit(key, deposit)?;
        }
        let sum = self
            .registry
            .iter()
            .try_fold(0u128, |acc, deposit| acc.checked_add(deposit.amount));
        if sum != Some(self.registry.total_staked()) {
            return Err(StakingError::Snapshot(
                "total stake disagrees with deposits".to_string(),
            ));
        }
        let ordered = self
            .history
            .iter()
            .zip(self.history.iter().skip(1))
            .all(|(a, b)| a.timestamp < b.timestamp);
        if !ordered {
            return Err(StakingError::Snapshot(
                "checkpoint timestamps are not increasing".to_string(),
            ));
        }
        Ok(())
    }

    fn check_deposit(&self, key: &AccountId, deposit: &StakeDeposit) -> Result<(), StakingError> {
        if *key != deposit.owner {
            return Err(StakingError::Snapshot(format!(
                "deposit of {} filed under {key}",
                deposit.owner
            )));
        }
        if self.history.get(deposit.start_checkpoint_index).is_none() {
            return Err(StakingError::Snapshot(format!(
                "deposit of {key} references missing checkpoint {}",
                deposit.start_checkpoint_index
            )));
        }
        if deposit
            .withdrawal_initiated_at
            .is_some_and(|at| at < deposit.start_timestamp)
        {
            return Err(StakingError::Snapshot(format!(
                "withdrawal of {key} initiated before its deposit"
            )));
        }
        Ok(())
    }
}
