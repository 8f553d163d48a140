//! Nullable infrastructure for deterministic testing.
//!
//! All external collaborators of the staking core (clock, value ledger) are
//! abstracted at the boundary. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod ledger;

pub use clock::NullClock;
pub use ledger::NullLedger;
