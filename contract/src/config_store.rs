//! Two-phase configuration: staking limit first, then the reward schedule.
//! Finalizing the schedule freezes both.

use crate::error::StakingError;
use serde::{Deserialize, Serialize};
use staking_rewards::{StakingLimitConfig, TierSchedule};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationStore {
    staking_limit: Option<StakingLimitConfig>,
    schedule: Option<TierSchedule>,
}

impl ConfigurationStore {
    pub fn is_finalized(&self) -> bool {
        self.schedule.is_some()
    }

    pub fn staking_limit(&self) -> Option<&StakingLimitConfig> {
        self.staking_limit.as_ref()
    }

    pub fn schedule(&self) -> Option<&TierSchedule> {
        self.schedule.as_ref()
    }

    /// Both halves, once setup is finalized.
    pub fn finalized(&self) -> Result<(&StakingLimitConfig, &TierSchedule), StakingError> {
        match (&self.staking_limit, &self.schedule) {
            (Some(limit), Some(schedule)) => Ok((limit, schedule)),
            _ => Err(StakingError::SetupNotDone),
        }
    }

    /// Validate and store the staking limit. May be repeated until the
    /// schedule is finalized; the last call wins.
    pub fn set_staking_limit(
        &mut self,
        max_amount: u128,
        initial_amount: u128,
        days_interval: u64,
        unstaking_period: u64,
    ) -> Result<&StakingLimitConfig, StakingError> {
        if self.is_finalized() {
            return Err(StakingError::SetupAlreadyDone);
        }
        let config =
            StakingLimitConfig::new(max_amount, initial_amount, days_interval, unstaking_period)?;
        Ok(&*self.staking_limit.insert(config))
    }

    /// Validate the tier schedule against the stored limit and freeze the
    /// configuration.
    pub fn finalize_rewards(
        &mut self,
        multiplier: u32,
        annual_rates: &[u32],
        lower_bounds: &[u128],
        upper_bounds: &[u128],
    ) -> Result<&TierSchedule, StakingError> {
        if self.is_finalized() {
            return Err(StakingError::SetupAlreadyDone);
        }
        let max_amount = self
            .staking_limit
            .as_ref()
            .map(|limit| limit.max_amount)
            .ok_or(StakingError::StakingLimitNotSetup)?;
        let schedule = TierSchedule::new(
            multiplier,
            annual_rates,
            lower_bounds,
            upper_bounds,
            max_amount,
        )?;
        Ok(&*self.schedule.insert(schedule))
    }
}
