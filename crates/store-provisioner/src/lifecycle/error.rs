use crate::store_actor::StoreError;
use crate::subdomain::SubdomainError;
use thiserror::Error;

/// Why a store could not be registered. Nothing is stored on any of these.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistrationError {
    #[error("Store name is required")]
    NameRequired,

    #[error("Invalid subdomain format: {reason}")]
    InvalidSubdomain {
        subdomain: String,
        reason: SubdomainError,
    },

    #[error("Subdomain already taken: {subdomain} (try {suggestion})")]
    Conflict {
        subdomain: String,
        suggestion: String,
    },

    #[error(transparent)]
    Registry(#[from] StoreError),
}
