//! Boundary with the external value-transfer collaborator.
//!
//! The staking core never holds balances itself. Every movement of value
//! (deposits into custody, principal and reward payouts) goes through a
//! [`ValueTransfer`] implementation, which either applies the move in full or
//! declines it.

use crate::account::AccountId;
use thiserror::Error;

/// A declined value movement.
///
/// The reason is reported verbatim to the caller of the failing operation, so
/// implementations should keep it stable.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct TransferError {
    pub reason: String,
}

impl TransferError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Moves custodial value between accounts.
///
/// A call either moves exactly `amount` from `from` to `to` or returns an
/// error and leaves every balance untouched.
pub trait ValueTransfer {
    fn move_value(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), TransferError>;
}
