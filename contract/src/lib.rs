//! Stateful staking core.
//!
//! [`StakingContract`] owns the configuration, the checkpoint history, the
//! deposit registry and the lifecycle status, and exposes every mutating
//! operation behind explicit access and lifecycle guards. Value movement is
//! delegated to a [`ValueTransfer`](staking_types::ValueTransfer)
//! collaborator supplied per call.

pub mod access;
pub mod config_store;
pub mod contract;
pub mod deploy;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod registry;
pub mod snapshot;

pub use access::{AccessPolicy, OwnerPausable};
pub use config_store::ConfigurationStore;
pub use contract::StakingContract;
pub use deploy::{DeployConfig, TierConfig};
pub use error::{ErrorKind, StakingError};
pub use events::StakingEvent;
pub use lifecycle::{LifecycleController, Status};
pub use registry::StakeRegistry;
pub use snapshot::StakingState;
