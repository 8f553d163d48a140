//! Shared utilities for the tiered staking core.

pub mod logging;
pub mod time;

pub use logging::{init_logging, init_test_logging, LogFormat, LoggingError};
pub use time::format_duration;
