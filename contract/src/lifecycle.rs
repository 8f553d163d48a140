//! Deployment lifecycle: `Setup → Running ⇄ RewardsDisabled`.
//!
//! There is no transition back to `Setup`. Pause gating is orthogonal and
//! lives in [`crate::access`].

use crate::error::StakingError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Configuration not yet finalized.
    Setup,
    Running,
    /// Finalized, but rewards are switched off.
    RewardsDisabled,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Setup => write!(f, "setup"),
            Status::Running => write!(f, "running"),
            Status::RewardsDisabled => write!(f, "rewards-disabled"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleController {
    status: Status,
}

impl Default for LifecycleController {
    fn default() -> Self {
        Self {
            status: Status::Setup,
        }
    }
}

impl LifecycleController {
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_setup_done(&self) -> bool {
        self.status != Status::Setup
    }

    pub fn rewards_enabled(&self) -> bool {
        self.status == Status::Running
    }

    pub fn require_setup_phase(&self) -> Result<(), StakingError> {
        if self.is_setup_done() {
            Err(StakingError::SetupAlreadyDone)
        } else {
            Ok(())
        }
    }

    pub fn require_setup_done(&self) -> Result<(), StakingError> {
        if self.is_setup_done() {
            Ok(())
        } else {
            Err(StakingError::SetupNotDone)
        }
    }

    /// Finalized and accruing rewards.
    pub fn require_running(&self) -> Result<(), StakingError> {
        match self.status {
            Status::Setup => Err(StakingError::SetupNotDone),
            Status::RewardsDisabled => Err(StakingError::RewardsDisabled),
            Status::Running => Ok(()),
        }
    }

    pub fn finish_setup(&mut self) -> Result<(), StakingError> {
        self.require_setup_phase()?;
        self.status = Status::Running;
        Ok(())
    }

    /// Switch between `Running` and `RewardsDisabled`. Setting the current
    /// value again is allowed.
    pub fn set_rewards_enabled(&mut self, enabled: bool) -> Result<Status, StakingError> {
        self.require_setup_done()?;
        self.status = if enabled {
            Status::Running
        } else {
            Status::RewardsDisabled
        };
        Ok(self.status)
    }
}
