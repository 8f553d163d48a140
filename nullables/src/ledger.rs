//! Nullable value ledger: an in-memory token with balances and allowances.
//!
//! Mirrors the semantics of a standard fungible token as seen by a custodial
//! operator: the operator moves its own balance freely, and moves another
//! account's balance only within the allowance that account granted it.
//! Balance is checked before allowance, and a declined move changes nothing.

use staking_types::{AccountId, TransferError, ValueTransfer};
use std::collections::HashMap;

pub const EXCEEDS_BALANCE: &str = "ERC20: transfer amount exceeds balance";
pub const EXCEEDS_ALLOWANCE: &str = "ERC20: transfer amount exceeds allowance";

pub struct NullLedger {
    operator: AccountId,
    balances: HashMap<AccountId, u128>,
    /// (owner, spender) → remaining allowance.
    allowances: HashMap<(AccountId, AccountId), u128>,
    /// Every applied move, in order.
    moves: Vec<(AccountId, AccountId, u128)>,
    /// When set, every move is declined with this reason.
    fail_all: Option<String>,
    /// Moves credited to these accounts are declined with the given reason.
    declined_recipients: HashMap<AccountId, String>,
}

impl NullLedger {
    /// Create a ledger whose moves are performed by `operator` (the custody account).
    pub fn new(operator: AccountId) -> Self {
        Self {
            operator,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            moves: Vec::new(),
            fail_all: None,
            declined_recipients: HashMap::new(),
        }
    }

    pub fn operator(&self) -> &AccountId {
        &self.operator
    }

    /// Credit `amount` to `account` out of thin air.
    pub fn mint(&mut self, account: &AccountId, amount: u128) {
        *self.balances.entry(account.clone()).or_insert(0) += amount;
    }

    /// Allow the operator to move up to `amount` of `owner`'s balance.
    pub fn approve(&mut self, owner: &AccountId, amount: u128) {
        self.allowances
            .insert((owner.clone(), self.operator.clone()), amount);
    }

    /// Reduce the operator's allowance over `owner`'s balance.
    pub fn decrease_allowance(&mut self, owner: &AccountId, amount: u128) {
        let key = (owner.clone(), self.operator.clone());
        let current = self.allowances.get(&key).copied().unwrap_or(0);
        self.allowances.insert(key, current.saturating_sub(amount));
    }

    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn allowance(&self, owner: &AccountId) -> u128 {
        self.allowances
            .get(&(owner.clone(), self.operator.clone()))
            .copied()
            .unwrap_or(0)
    }

    pub fn moves(&self) -> &[(AccountId, AccountId, u128)] {
        &self.moves
    }

    /// Decline every subsequent move with `reason` (or stop doing so with `None`).
    pub fn set_failure(&mut self, reason: Option<&str>) {
        self.fail_all = reason.map(str::to_string);
    }

    /// Decline moves credited to `recipient` with `reason` (or stop doing so
    /// with `None`).
    pub fn decline_moves_to(&mut self, recipient: &AccountId, reason: Option<&str>) {
        match reason {
            Some(reason) => {
                self.declined_recipients
                    .insert(recipient.clone(), reason.to_string());
            }
            None => {
                self.declined_recipients.remove(recipient);
            }
        }
    }
}

impl ValueTransfer for NullLedger {
    fn move_value(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), TransferError> {
        if let Some(reason) = &self.fail_all {
            return Err(TransferError::new(reason.clone()));
        }
        if let Some(reason) = self.declined_recipients.get(to) {
            return Err(TransferError::new(reason.clone()));
        }
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(TransferError::new(EXCEEDS_BALANCE));
        }
        if *from != self.operator && self.allowance(from) < amount {
            return Err(TransferError::new(EXCEEDS_ALLOWANCE));
        }

        if *from != self.operator {
            let remaining = self.allowance(from) - amount;
            self.allowances
                .insert((from.clone(), self.operator.clone()), remaining);
        }
        self.balances.insert(from.clone(), from_balance - amount);
        *self.balances.entry(to.clone()).or_insert(0) += amount;
        self.moves.push((from.clone(), to.clone(), amount));
        Ok(())
    }
}
