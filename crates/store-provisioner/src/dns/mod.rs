//! # DNS Provisioning Adapter
//!
//! Ensures an A record exists for a store's subdomain.
//!
//! | Backend | When | Network I/O |
//! |---------|------|-------------|
//! | [`CloudflareDns`] | zone id and API token configured | list, then create if missing |
//! | [`SimulatedDns`] | credentials absent | none |
//!
//! [`DnsProvider::ensure_record`] is idempotent: a record that already exists is returned
//! with `existing: true` instead of being created again.

pub mod cloudflare;
pub mod error;
pub mod simulated;

pub use cloudflare::CloudflareDns;
pub use error::DnsError;
pub use simulated::SimulatedDns;

use crate::config::AppConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Record id reported when no provider was contacted.
pub const SIMULATED_RECORD_ID: &str = "simulated";

/// Which backend produced a [`DnsRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DnsBackend {
    Cloudflare,
    Simulation,
}

/// A successfully ensured A record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    pub record_id: String,
    pub provider: DnsBackend,
    /// The record was already present and nothing was created.
    pub existing: bool,
    pub message: Option<String>,
}

#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Ensures `{subdomain}.{main_domain}` resolves to the configured server address.
    async fn ensure_record(&self, subdomain: &str) -> Result<DnsRecord, DnsError>;
}

/// Picks the backend for `config`: Cloudflare when credentials are present, simulation
/// otherwise, whatever the configured provider mode.
pub fn provider_from_config(config: &AppConfig) -> Result<Arc<dyn DnsProvider>, DnsError> {
    match &config.cloudflare {
        Some(credentials) => {
            info!(api_base = %config.cloudflare_api_base, "Using Cloudflare DNS provider");
            Ok(Arc::new(CloudflareDns::new(
                config.cloudflare_api_base.clone(),
                credentials.clone(),
                config.main_domain.clone(),
                config.server_address,
            )?))
        }
        None => {
            warn!("Cloudflare credentials not configured, DNS records will be simulated");
            Ok(Arc::new(SimulatedDns::new(
                config.main_domain.clone(),
                config.server_address,
            )))
        }
    }
}
