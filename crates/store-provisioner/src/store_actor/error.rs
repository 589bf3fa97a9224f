//! Error types for the Store actor.

use crate::model::StoreStatus;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The requested store was not found.
    #[error("Store not found: {0}")]
    NotFound(String),

    /// Another live store already holds this subdomain.
    #[error("Subdomain already taken: {0}")]
    SubdomainTaken(String),

    /// The lifecycle action is not allowed from the store's current state.
    #[error("Cannot apply {action} to a store in state {from}")]
    InvalidTransition {
        from: StoreStatus,
        action: &'static str,
    },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for StoreError {
    fn from(msg: String) -> Self {
        StoreError::ActorCommunicationError(msg)
    }
}
