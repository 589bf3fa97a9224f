//! Error types for deployment runs.

use crate::dns::DnsError;
use crate::model::{StoreId, StoreStatus};
use crate::store_actor::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    /// No store with this id exists; nothing was mutated.
    #[error("Store {0} not found")]
    StoreNotFound(StoreId),

    /// The store already left `creating`; another run owns it.
    #[error("Deployment already started for store {id} (status: {status})")]
    AlreadyStarted { id: StoreId, status: StoreStatus },

    #[error("DNS creation failed: {0}")]
    Dns(#[source] DnsError),

    #[error(transparent)]
    Registry(#[from] StoreError),
}
