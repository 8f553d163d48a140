//! Deployment configuration with TOML file support.
//!
//! Amounts are written in whole tokens and scaled by `10^decimals` when the
//! contract is deployed. An empty document yields the reference deployment.

use serde::{Deserialize, Serialize};
use std::path::Path;

use staking_types::{AccountId, Timestamp, SECS_PER_DAY};
use staking_utils::{format_duration, init_logging, LogFormat};
use tracing::info;

use crate::contract::StakingContract;
use crate::error::StakingError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Whole percent per year.
    pub annual_rate: u32,
    pub lower_bound: u64,
    pub upper_bound: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Scale exponent applied to every amount below.
    pub decimals: u32,
    pub max_amount: u64,
    pub initial_amount: u64,
    /// Days between admission waves.
    pub days_interval: u64,
    /// Days between initiating and executing a withdrawal.
    pub unstaking_period: u64,
    pub multiplier: u32,
    /// Ownership is handed to this account once deployment completes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_after_deploy: Option<String>,
    pub log_format: String,
    pub log_level: String,
    pub tiers: Vec<TierConfig>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self::reference()
    }
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DeployConfig {
    /// 5e9 cap admitted in waves of 5e8 every 3 days, four tiers from 17% to 23%.
    pub fn reference() -> Self {
        let tier = |annual_rate, lower_bound, upper_bound| TierConfig {
            annual_rate,
            lower_bound,
            upper_bound,
        };
        Self {
            decimals: 18,
            max_amount: 5_000_000_000,
            initial_amount: 500_000_000,
            days_interval: 3,
            unstaking_period: 7,
            multiplier: 5,
            owner_after_deploy: None,
            log_format: "human".to_string(),
            log_level: "info".to_string(),
            tiers: vec![
                tier(17, 0, 1_250_000_000),
                tier(19, 1_250_000_000, 2_500_000_000),
                tier(21, 2_500_000_000, 3_750_000_000),
                tier(23, 3_750_000_000, 5_000_000_000),
            ],
        }
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, StakingError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| StakingError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, StakingError> {
        toml::from_str(s).map_err(|e| StakingError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, StakingError> {
        toml::to_string_pretty(self).map_err(|e| StakingError::Config(e.to_string()))
    }

    /// `whole` tokens in the smallest unit.
    pub fn scale(&self, whole: u64) -> Result<u128, StakingError> {
        10u128
            .checked_pow(self.decimals)
            .and_then(|unit| unit.checked_mul(u128::from(whole)))
            .ok_or_else(|| {
                StakingError::Config(format!(
                    "{whole} tokens at {} decimals overflows",
                    self.decimals
                ))
            })
    }

    pub fn log_format(&self) -> Result<LogFormat, StakingError> {
        self.log_format
            .parse::<LogFormat>()
            .map_err(|e| StakingError::Config(e.to_string()))
    }

    /// Install the global subscriber described by `log_format` / `log_level`.
    pub fn init_logging(&self) -> Result<(), StakingError> {
        init_logging(self.log_format()?, &self.log_level)
            .map_err(|e| StakingError::Config(e.to_string()))
    }

    /// Create, configure and unpause a contract owned by `owner`.
    pub fn deploy(
        &self,
        owner: &AccountId,
        rewards_account: AccountId,
        custody_account: AccountId,
        now: Timestamp,
    ) -> Result<StakingContract, StakingError> {
        let max_amount = self.scale(self.max_amount)?;
        let initial_amount = self.scale(self.initial_amount)?;
        let rates: Vec<u32> = self.tiers.iter().map(|t| t.annual_rate).collect();
        let lower_bounds = self
            .tiers
            .iter()
            .map(|t| self.scale(t.lower_bound))
            .collect::<Result<Vec<_>, _>>()?;
        let upper_bounds = self
            .tiers
            .iter()
            .map(|t| self.scale(t.upper_bound))
            .collect::<Result<Vec<_>, _>>()?;

        let mut contract =
            StakingContract::new(owner.clone(), rewards_account, custody_account, now)?;
        contract.setup_staking_limit(
            owner,
            max_amount,
            initial_amount,
            self.days_interval,
            self.unstaking_period,
        )?;
        contract.setup_rewards(
            owner,
            self.multiplier,
            &rates,
            &lower_bounds,
            &upper_bounds,
            now,
        )?;
        contract.unpause(owner)?;

        if let Some(next) = &self.owner_after_deploy {
            contract.transfer_ownership(owner, AccountId::new(next.as_str()))?;
        }

        let lock_days = contract
            .staking_limit_config()
            .map_or(0, |limit| limit.lock_period_days());
        info!(
            owner = %contract.owner(),
            tiers = contract.base_rewards_len(),
            lock_period = %format_duration(lock_days.saturating_mul(SECS_PER_DAY)),
            unstaking_period = %format_duration(self.unstaking_period.saturating_mul(SECS_PER_DAY)),
            "staking contract deployed"
        );
        Ok(contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Status;

    const E18: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn empty_toml_is_reference() {
        let config = DeployConfig::from_toml_str("").unwrap();
        assert_eq!(config, DeployConfig::reference());
        assert_eq!(config.tiers.len(), 4);
    }

    #[test]
    fn reference_round_trips_through_toml() {
        let config = DeployConfig::reference();
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("[[tiers]]"));
        assert_eq!(DeployConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn partial_toml_overrides() {
        let config = DeployConfig::from_toml_str(
            r#"
            decimals = 0
            max_amount = 1000
            initial_amount = 100
            multiplier = 10
            owner_after_deploy = "treasury"

            [[tiers]]
            annual_rate = 20
            lower_bound = 0
            upper_bound = 1000
            "#,
        )
        .unwrap();
        assert_eq!(config.decimals, 0);
        assert_eq!(config.days_interval, 3);
        assert_eq!(config.tiers.len(), 1);
        assert_eq!(config.owner_after_deploy.as_deref(), Some("treasury"));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = DeployConfig::from_toml_str("max_amount = \"lots\"").unwrap_err();
        assert!(matches!(err, StakingError::Config(_)));
        assert!(matches!(
            DeployConfig::from_toml_file("/nonexistent/staking.toml"),
            Err(StakingError::Config(_))
        ));
    }

    #[test]
    fn scale_applies_decimals() {
        let config = DeployConfig::reference();
        assert_eq!(config.scale(3).unwrap(), 3 * E18);
        let huge = DeployConfig {
            decimals: 40,
            ..DeployConfig::reference()
        };
        assert!(huge.scale(u64::MAX).is_err());
    }

    #[test]
    fn unknown_log_format_rejected() {
        let config = DeployConfig {
            log_format: "xml".to_string(),
            ..DeployConfig::reference()
        };
        assert!(matches!(config.log_format(), Err(StakingError::Config(_))));
        assert_eq!(DeployConfig::reference().log_format().unwrap(), LogFormat::Human);
    }

    #[test]
    fn deploy_reference_configuration() {
        let owner = AccountId::new("deployer");
        let contract = DeployConfig::reference()
            .deploy(
                &owner,
                AccountId::new("rewards"),
                AccountId::new("custody"),
                Timestamp::new(1_000),
            )
            .unwrap();
        assert_eq!(contract.status(), Status::Running);
        assert_eq!(contract.base_rewards_len(), 5);
        assert_eq!(contract.base_reward_history_len(), 1);
        assert_eq!(contract.multiplier(), Some(5));
        let limit = contract.staking_limit_config().unwrap();
        assert_eq!(limit.max_amount, 5_000_000_000 * E18);
        assert_eq!(limit.max_intervals, 10);
        assert_eq!(
            contract.current_staking_limit(Timestamp::new(1_000)).unwrap(),
            500_000_000 * E18
        );
        assert_eq!(contract.owner(), &owner);
    }

    #[test]
    fn deploy_hands_over_ownership() {
        let config = DeployConfig {
            owner_after_deploy: Some("treasury".to_string()),
            ..DeployConfig::reference()
        };
        let contract = config
            .deploy(
                &AccountId::new("deployer"),
                AccountId::new("rewards"),
                AccountId::new("custody"),
                Timestamp::new(0),
            )
            .unwrap();
        assert_eq!(contract.owner(), &AccountId::new("treasury"));
    }

    #[test]
    fn deploy_surfaces_validation_errors() {
        let config = DeployConfig {
            multiplier: 3,
            ..DeployConfig::reference()
        };
        let err = config
            .deploy(
                &AccountId::new("deployer"),
                AccountId::new("rewards"),
                AccountId::new("custody"),
                Timestamp::new(0),
            )
            .err()
            .unwrap();
        assert_eq!(
            err.to_string(),
            "[Validation] Multiplier should be smaller than 100 and divide it equally"
        );
    }
}
