//! Fundamental types for the tiered staking core.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account identifiers, timestamps and the value-transfer collaborator boundary.

pub mod account;
pub mod time;
pub mod transfer;

pub use account::AccountId;
pub use time::{Timestamp, SECS_PER_DAY};
pub use transfer::{TransferError, ValueTransfer};
