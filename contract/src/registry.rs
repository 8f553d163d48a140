//! Live deposits, at most one per account, and the pool total.

use crate::error::StakingError;
use serde::{Deserialize, Serialize};
use staking_rewards::{RewardError, StakeDeposit};
use staking_types::{AccountId, Timestamp};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeRegistry {
    deposits: BTreeMap<AccountId, StakeDeposit>,
    total_staked: u128,
}

impl StakeRegistry {
    pub fn get(&self, owner: &AccountId) -> Option<&StakeDeposit> {
        self.deposits.get(owner)
    }

    pub fn contains(&self, owner: &AccountId) -> bool {
        self.deposits.contains_key(owner)
    }

    pub fn total_staked(&self) -> u128 {
        self.total_staked
    }

    pub fn len(&self) -> usize {
        self.deposits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deposits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StakeDeposit> {
        self.deposits.values()
    }

    /// Deposits with the account they are filed under.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&AccountId, &StakeDeposit)> {
        self.deposits.iter()
    }

    #[cfg(test)]
    pub(crate) fn insert_under(&mut self, key: AccountId, deposit: StakeDeposit) {
        self.total_staked += deposit.amount;
        self.deposits.insert(key, deposit);
    }

    /// Pool total after admitting `amount` for `owner`.
    pub fn projected_total(&self, owner: &AccountId, amount: u128) -> Result<u128, StakingError> {
        if self.contains(owner) {
            return Err(StakingError::AlreadyStaked);
        }
        self.total_staked
            .checked_add(amount)
            .ok_or(StakingError::Rewards(RewardError::Overflow))
    }

    /// Admit a deposit already checked with [`projected_total`](Self::projected_total).
    pub fn insert(&mut self, deposit: StakeDeposit) {
        self.total_staked = self.total_staked.saturating_add(deposit.amount);
        self.deposits.insert(deposit.owner.clone(), deposit);
    }

    pub fn remove(&mut self, owner: &AccountId) -> Option<StakeDeposit> {
        let deposit = self.deposits.remove(owner)?;
        self.total_staked = self.total_staked.saturating_sub(deposit.amount);
        Some(deposit)
    }

    /// Record the withdrawal initiation time. No-op for unknown accounts.
    pub fn mark_initiated(&mut self, owner: &AccountId, at: Timestamp) {
        if let Some(deposit) = self.deposits.get_mut(owner) {
            deposit.withdrawal_initiated_at = Some(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deposit(owner: &str, amount: u128) -> StakeDeposit {
        StakeDeposit::new(AccountId::new(owner), amount, Timestamp::new(10), 0)
    }

    #[test]
    fn total_tracks_live_deposits() {
        let mut registry = StakeRegistry::default();
        registry.insert(deposit("alice", 100));
        registry.insert(deposit("bob", 50));
        assert_eq!(registry.total_staked(), 150);
        assert_eq!(registry.len(), 2);

        let removed = registry.remove(&AccountId::new("alice")).unwrap();
        assert_eq!(removed.amount, 100);
        assert_eq!(registry.total_staked(), 50);
        assert!(registry.remove(&AccountId::new("alice")).is_none());
        assert_eq!(registry.iter().map(|d| d.amount).sum::<u128>(), registry.total_staked());
    }

    #[test]
    fn duplicate_owner_rejected() {
        let mut registry = StakeRegistry::default();
        registry.insert(deposit("alice", 100));
        assert!(matches!(
            registry.projected_total(&AccountId::new("alice"), 1),
            Err(StakingError::AlreadyStaked)
        ));
        assert_eq!(registry.projected_total(&AccountId::new("bob"), 1).unwrap(), 101);
    }

    #[test]
    fn projected_total_overflow() {
        let mut registry = StakeRegistry::default();
        registry.insert(deposit("alice", u128::MAX));
        assert!(matches!(
            registry.projected_total(&AccountId::new("bob"), 1),
            Err(StakingError::Rewards(RewardError::Overflow))
        ));
    }

    #[test]
    fn mark_initiated_sets_time() {
        let mut registry = StakeRegistry::default();
        registry.insert(deposit("alice", 100));
        registry.mark_initiated(&AccountId::new("alice"), Timestamp::new(99));
        registry.mark_initiated(&AccountId::new("bob"), Timestamp::new(99));
        let d = registry.get(&AccountId::new("alice")).unwrap();
        assert_eq!(d.withdrawal_initiated_at, Some(Timestamp::new(99)));
        assert!(!registry.contains(&AccountId::new("bob")));
    }
}
