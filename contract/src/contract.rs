//! The staking facade.
//!
//! Every mutating call runs its guards first and computes each value it will
//! commit. Then it performs the external value move, and only after that does
//! it apply the mutation. A failed guard or a declined transfer leaves the state
//! untouched.

use crate::access::{require_admin, require_not_paused, require_paused, AccessPolicy, OwnerPausable};
use crate::error::StakingError;
use crate::events::StakingEvent;
use crate::lifecycle::Status;
use crate::snapshot::StakingState;
use staking_rewards::{
    BaseRewardHistory, Checkpoint, RewardAccrualEngine, RewardError, RewardQuote, RewardTier,
    StakeDeposit, StakingLimitConfig,
};
use staking_types::{AccountId, Timestamp, ValueTransfer};
use tracing::{debug, error, info, warn};

pub struct StakingContract<A = OwnerPausable> {
    state: StakingState,
    access: A,
    events: Vec<StakingEvent>,
}

impl StakingContract<OwnerPausable> {
    /// Create a single-owner contract. It starts paused, in [`Status::Setup`].
    pub fn new(
        owner: AccountId,
        rewards_account: AccountId,
        custody_account: AccountId,
        now: Timestamp,
    ) -> Result<Self, StakingError> {
        Self::with_access(
            OwnerPausable::new(owner),
            rewards_account,
            custody_account,
            now,
        )
    }

    pub fn owner(&self) -> &AccountId {
        self.access.owner()
    }

    pub fn pause(&mut self, caller: &AccountId) -> Result<(), StakingError> {
        self.access.pause(caller)
    }

    pub fn unpause(&mut self, caller: &AccountId) -> Result<(), StakingError> {
        self.access.unpause(caller)
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner: AccountId,
    ) -> Result<(), StakingError> {
        self.access.transfer_ownership(caller, new_owner)
    }
}

impl<A: AccessPolicy> StakingContract<A> {
    pub fn with_access(
        access: A,
        rewards_account: AccountId,
        custody_account: AccountId,
        now: Timestamp,
    ) -> Result<Self, StakingError> {
        if rewards_account.is_zero() {
            return Err(StakingError::ZeroAccount("rewards account"));
        }
        if custody_account.is_zero() {
            return Err(StakingError::ZeroAccount("custody account"));
        }
        info!(
            launch = %now,
            rewards_account = %rewards_account,
            custody_account = %custody_account,
            "staking contract created"
        );
        Ok(Self {
            state: StakingState::new(rewards_account, custody_account, now),
            access,
            events: Vec::new(),
        })
    }

    /// Rebuild a contract from [`save_state`](Self::save_state) output.
    pub fn restore(bytes: &[u8], access: A) -> Result<Self, StakingError> {
        let state = StakingState::from_bytes(bytes)?;
        debug!(
            deposits = state.registry.len(),
            checkpoints = state.history.len(),
            status = %state.lifecycle.status(),
            "state restored"
        );
        Ok(Self {
            state,
            access,
            events: Vec::new(),
        })
    }

    pub fn save_state(&self) -> Result<Vec<u8>, StakingError> {
        self.state.to_bytes()
    }

    pub fn state(&self) -> &StakingState {
        &self.state
    }

    pub fn access(&self) -> &A {
        &self.access
    }

    pub fn access_mut(&mut self) -> &mut A {
        &mut self.access
    }

    /// Take every event emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<StakingEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Setup ───────────────────────────────────────────────────────────

    /// Store the admission-wave parameters. Repeatable until the reward
    /// schedule is finalized.
    pub fn setup_staking_limit(
        &mut self,
        caller: &AccountId,
        max_amount: u128,
        initial_amount: u128,
        days_interval: u64,
        unstaking_period: u64,
    ) -> Result<(), StakingError> {
        require_admin(&self.access, caller)?;
        require_paused(&self.access)?;
        self.state.lifecycle.require_setup_phase()?;

        let limit = self.state.config.set_staking_limit(
            max_amount,
            initial_amount,
            days_interval,
            unstaking_period,
        )?;
        info!(
            max_amount = %limit.max_amount,
            initial_amount = %limit.initial_amount,
            days_interval = limit.days_interval,
            unstaking_period = limit.unstaking_period,
            max_intervals = limit.max_intervals,
            "staking limit configured"
        );
        Ok(())
    }

    /// Finalize the tier schedule, record the first checkpoint and move to
    /// [`Status::Running`].
    pub fn setup_rewards(
        &mut self,
        caller: &AccountId,
        multiplier: u32,
        annual_rates: &[u32],
        lower_bounds: &[u128],
        upper_bounds: &[u128],
        now: Timestamp,
    ) -> Result<(), StakingError> {
        require_admin(&self.access, caller)?;
        require_paused(&self.access)?;
        self.state.lifecycle.require_setup_phase()?;

        let schedule =
            self.state
                .config
                .finalize_rewards(multiplier, annual_rates, lower_bounds, upper_bounds)?;
        let first_rate = schedule.lowest_rate();
        let tiers = schedule.len();
        let total = self.state.registry.total_staked();

        self.state.history = BaseRewardHistory::new(first_rate, total, now);
        self.state.lifecycle.finish_setup()?;
        info!(multiplier, tiers, first_rate, "reward schedule finalized");
        Ok(())
    }

    /// Enable or disable accrual. Always records a checkpoint: rate 0 when
    /// disabling, the rate implied by the current total when enabling.
    pub fn toggle_rewards(
        &mut self,
        caller: &AccountId,
        enabled: bool,
        now: Timestamp,
    ) -> Result<Status, StakingError> {
        require_admin(&self.access, caller)?;
        self.state.lifecycle.require_setup_done()?;

        let (_, schedule) = self.state.config.finalized()?;
        let total = self.state.registry.total_staked();
        let rate = if enabled { schedule.rate_for(total) } else { 0 };
        self.state.history.ensure_appendable(now)?;

        let status = self.state.lifecycle.set_rewards_enabled(enabled)?;
        let index = self.state.history.append_checkpoint(rate, total, now)?;
        info!(status = %status, checkpoint = index, rate, "rewards toggled");
        Ok(status)
    }

    // ── Stake lifecycle ─────────────────────────────────────────────────

    pub fn deposit(
        &mut self,
        ledger: &mut dyn ValueTransfer,
        caller: &AccountId,
        amount: u128,
        now: Timestamp,
    ) -> Result<StakingEvent, StakingError> {
        self.state.lifecycle.require_setup_done()?;
        require_not_paused(&self.access)?;
        self.state.lifecycle.require_running()?;
        if amount == 0 {
            return Err(StakingError::ZeroDeposit);
        }
        let new_total = self.state.registry.projected_total(caller, amount)?;

        let (limit, _) = self.state.config.finalized()?;
        let ceiling = limit.current_staking_limit(self.state.launch_timestamp, now);
        if new_total > ceiling {
            debug!(
                account = %caller,
                amount = %amount,
                ceiling = %ceiling,
                "deposit over staking limit"
            );
            return Err(StakingError::LimitExceeded);
        }
        self.state.history.ensure_appendable(now)?;
        let start_index = self
            .state
            .history
            .latest()
            .map(|checkpoint| checkpoint.index)
            .ok_or(StakingError::SetupNotDone)?;

        ledger
            .move_value(caller, &self.state.custody_account, amount)
            .map_err(|e| {
                warn!(account = %caller, amount = %amount, reason = %e, "deposit transfer declined");
                StakingError::DepositTransfer(e)
            })?;

        self.state
            .registry
            .insert(StakeDeposit::new(caller.clone(), amount, now, start_index));
        self.record_total_change(now)?;
        info!(account = %caller, amount = %amount, total_staked = %new_total, "stake deposited");
        Ok(self.emit(StakingEvent::StakeDeposited {
            account: caller.clone(),
            amount,
        }))
    }

    /// Start the unstaking period. The reward is frozen at `now`.
    pub fn initiate_withdrawal(
        &mut self,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<StakingEvent, StakingError> {
        self.state.lifecycle.require_setup_done()?;
        require_not_paused(&self.access)?;

        let (limit, _) = self.state.config.finalized()?;
        let lock_days = limit.lock_period_days();
        let deposit = self
            .state
            .registry
            .get(caller)
            .ok_or(StakingError::NoStakeToInitiate)?;
        if deposit.is_withdrawal_initiated() {
            return Err(StakingError::AlreadyInitiated);
        }
        if !deposit.start_timestamp.days_have_passed(lock_days, now) {
            let unlocks_at = deposit.start_timestamp.plus_days(lock_days);
            debug!(account = %caller, unlocks_at = %unlocks_at, "lock period active");
            return Err(StakingError::LockPeriodActive);
        }
        let amount = deposit.amount;

        self.state.registry.mark_initiated(caller, now);
        info!(account = %caller, amount = %amount, "withdrawal initiated");
        Ok(self.emit(StakingEvent::WithdrawInitiated {
            account: caller.clone(),
            amount,
        }))
    }

    /// Pay out principal plus the reward frozen at initiation and close the
    /// deposit.
    pub fn execute_withdrawal(
        &mut self,
        ledger: &mut dyn ValueTransfer,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<StakingEvent, StakingError> {
        self.state.lifecycle.require_setup_done()?;
        require_not_paused(&self.access)?;

        let (limit, schedule) = self.state.config.finalized()?;
        let deposit = self
            .state
            .registry
            .get(caller)
            .ok_or(StakingError::NoStakeToWithdraw)?;
        let initiated_at = deposit
            .withdrawal_initiated_at
            .ok_or(StakingError::WithdrawNotInitiated)?;
        if !initiated_at.days_have_passed(limit.unstaking_period, now) {
            let releases_at = initiated_at.plus_days(limit.unstaking_period);
            debug!(account = %caller, releases_at = %releases_at, "unstaking period active");
            return Err(StakingError::UnstakingPeriodActive);
        }
        let quote = RewardAccrualEngine::new(&self.state.history, schedule.multiplier())
            .reward(deposit, initiated_at)?;
        self.state.history.ensure_appendable(now)?;

        self.pay_out(ledger, caller, &quote)?;

        self.state.registry.remove(caller);
        self.record_total_change(now)?;
        info!(
            account = %caller,
            amount = %quote.amount,
            reward = %quote.reward,
            "withdrawal executed"
        );
        Ok(self.emit(StakingEvent::WithdrawExecuted {
            account: caller.clone(),
            amount: quote.amount,
            reward: quote.reward,
        }))
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn status(&self) -> Status {
        self.state.lifecycle.status()
    }

    pub fn launch_timestamp(&self) -> Timestamp {
        self.state.launch_timestamp
    }

    pub fn rewards_account(&self) -> &AccountId {
        &self.state.rewards_account
    }

    pub fn custody_account(&self) -> &AccountId {
        &self.state.custody_account
    }

    pub fn staking_limit_config(&self) -> Option<&StakingLimitConfig> {
        self.state.config.staking_limit()
    }

    pub fn multiplier(&self) -> Option<u32> {
        self.state.config.schedule().map(|s| s.multiplier())
    }

    /// Tier `index`, counting the terminal tier.
    pub fn base_reward(&self, index: usize) -> Option<&RewardTier> {
        self.state.config.schedule().and_then(|s| s.get(index))
    }

    pub fn base_rewards_len(&self) -> usize {
        self.state.config.schedule().map_or(0, |s| s.len())
    }

    pub fn base_reward_history(&self, index: u64) -> Option<&Checkpoint> {
        self.state.history.get(index)
    }

    pub fn base_reward_history_len(&self) -> usize {
        self.state.history.len()
    }

    pub fn current_staking_limit(&self, now: Timestamp) -> Result<u128, StakingError> {
        self.state.lifecycle.require_setup_done()?;
        let (limit, _) = self.state.config.finalized()?;
        Ok(limit.current_staking_limit(self.state.launch_timestamp, now))
    }

    pub fn current_total_stake(&self) -> u128 {
        self.state.registry.total_staked()
    }

    /// `(amount, reward)` for `account` as if it were paid at `now`.
    pub fn current_reward(
        &self,
        account: &AccountId,
        now: Timestamp,
    ) -> Result<RewardQuote, StakingError> {
        self.state.lifecycle.require_setup_done()?;
        let (_, schedule) = self.state.config.finalized()?;
        let deposit = self
            .state
            .registry
            .get(account)
            .ok_or(StakingError::NoStakeDeposit)?;
        Ok(RewardAccrualEngine::new(&self.state.history, schedule.multiplier())
            .reward(deposit, now)?)
    }

    pub fn stake_deposit(&self, account: &AccountId) -> Option<&StakeDeposit> {
        self.state.registry.get(account)
    }

    // ── Internals ───────────────────────────────────────────────────────

    /// Append a checkpoint when the pool total has moved into another tier.
    fn record_total_change(&mut self, now: Timestamp) -> Result<(), StakingError> {
        let total = self.state.registry.total_staked();
        let (Some(schedule), Some(last)) =
            (self.state.config.schedule(), self.state.history.latest())
        else {
            return Ok(());
        };
        if schedule.tier_index_for(last.total_staked) == schedule.tier_index_for(total) {
            return Ok(());
        }
        let rate = if self.state.lifecycle.rewards_enabled() {
            schedule.rate_for(total)
        } else {
            0
        };
        let index = self.state.history.append_checkpoint(rate, total, now)?;
        debug!(checkpoint = index, rate, total_staked = %total, "tier changed");
        Ok(())
    }

    /// Stage the reward in custody, then release principal plus reward in one
    /// move. A declined release returns the staged reward.
    fn pay_out(
        &self,
        ledger: &mut dyn ValueTransfer,
        account: &AccountId,
        quote: &RewardQuote,
    ) -> Result<(), StakingError> {
        let custody = &self.state.custody_account;
        let rewards = &self.state.rewards_account;
        let payout = quote
            .total()
            .ok_or(StakingError::Rewards(RewardError::Overflow))?;

        if quote.reward > 0 {
            ledger
                .move_value(rewards, custody, quote.reward)
                .map_err(|e| {
                    warn!(account = %account, reward = %quote.reward, reason = %e, "reward transfer declined");
                    StakingError::RewardTransfer(e)
                })?;
        }

        if let Err(e) = ledger.move_value(custody, account, payout) {
            warn!(account = %account, payout = %payout, reason = %e, "payout declined");
            if quote.reward > 0 {
                if let Err(undo) = ledger.move_value(custody, rewards, quote.reward) {
                    error!(
                        reward = %quote.reward,
                        reason = %undo,
                        "staged reward stuck in custody"
                    );
                    return Err(StakingError::RewardStranded {
                        payout: e,
                        rollback: undo,
                        reward: quote.reward,
                    });
                }
                warn!(reward = %quote.reward, "staged reward returned to rewards account");
            }
            return Err(StakingError::PrincipalTransfer(e));
        }
        Ok(())
    }

    fn emit(&mut self, event: StakingEvent) -> StakingEvent {
        self.events.push(event.clone());
        event
    }
}
