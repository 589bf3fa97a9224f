//! Error types for DNS provisioning.

use serde_json::Value;
use thiserror::Error;

/// Why a DNS provider call failed. The adapter returns these and never panics.
#[derive(Debug, Error)]
pub enum DnsError {
    /// The request never produced a response (connect, TLS, timeout, body read).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    Provider {
        status: u16,
        /// Parsed response body, when the provider sent JSON.
        details: Option<Value>,
    },

    /// A 2xx envelope with `success: false`. `message` is the provider's first error.
    #[error("Provider rejected the request: {message}")]
    Rejected {
        status: u16,
        message: String,
        /// The full response body.
        details: Option<Value>,
    },

    /// A 2xx response whose body did not have the expected shape.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl DnsError {
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Structured provider error details, when available.
    pub fn details(&self) -> Option<&Value> {
        match self {
            DnsError::Provider { details, .. } | DnsError::Rejected { details, .. } => {
                details.as_ref()
            }
            _ => None,
        }
    }
}
