//! Authorization and pause gating.
//!
//! The staking core only needs two predicates, "is this caller an
//! administrator" and "is the system paused", supplied through
//! [`AccessPolicy`]. The guard functions below are evaluated first in every
//! mutating operation. [`OwnerPausable`] is the default single-owner policy.

use crate::error::StakingError;
use serde::{Deserialize, Serialize};
use staking_types::AccountId;

pub trait AccessPolicy {
    fn is_admin(&self, caller: &AccountId) -> bool;
    fn is_paused(&self) -> bool;
}

pub fn require_admin<A: AccessPolicy>(policy: &A, caller: &AccountId) -> Result<(), StakingError> {
    if policy.is_admin(caller) {
        Ok(())
    } else {
        tracing::debug!(caller = %caller, "rejected non-admin caller");
        Err(StakingError::NotOwner)
    }
}

pub fn require_paused<A: AccessPolicy>(policy: &A) -> Result<(), StakingError> {
    if policy.is_paused() {
        Ok(())
    } else {
        Err(StakingError::NotPaused)
    }
}

pub fn require_not_paused<A: AccessPolicy>(policy: &A) -> Result<(), StakingError> {
    if policy.is_paused() {
        Err(StakingError::Paused)
    } else {
        Ok(())
    }
}

/// One owner, one pause flag. Starts paused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerPausable {
    owner: AccountId,
    paused: bool,
}

impl OwnerPausable {
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            paused: true,
        }
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    pub fn pause(&mut self, caller: &AccountId) -> Result<(), StakingError> {
        require_admin(self, caller)?;
        require_not_paused(self)?;
        self.paused = true;
        tracing::info!(by = %caller, "paused");
        Ok(())
    }

    pub fn unpause(&mut self, caller: &AccountId) -> Result<(), StakingError> {
        require_admin(self, caller)?;
        require_paused(self)?;
        self.paused = false;
        tracing::info!(by = %caller, "unpaused");
        Ok(())
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner: AccountId,
    ) -> Result<(), StakingError> {
        require_admin(self, caller)?;
        if new_owner.is_zero() {
            return Err(StakingError::ZeroAccount("new owner"));
        }
        tracing::info!(from = %self.owner, to = %new_owner, "ownership transferred");
        self.owner = new_owner;
        Ok(())
    }
}

impl AccessPolicy for OwnerPausable {
    fn is_admin(&self, caller: &AccountId) -> bool {
        *caller == self.owner
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
