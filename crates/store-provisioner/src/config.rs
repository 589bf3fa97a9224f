//! # Configuration
//!
//! Everything the provisioner reads from its environment:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `MAIN_DOMAIN` | `myoutlet.app` |
//! | `SERVER_IP` | `1.2.3.4` |
//! | `DNS_PROVIDER` | `manual` (`cloudflare` enables the DNS step) |
//! | `CLOUDFLARE_ZONE_ID`, `CLOUDFLARE_API_TOKEN` | unset (DNS step is simulated) |
//! | `CLOUDFLARE_API_BASE` | `https://api.cloudflare.com/client/v4` |
//!
//! Empty values are treated as unset. [`AppConfig::from_lookup`] takes any key lookup so
//! tests can pass a map instead of touching the process environment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_MAIN_DOMAIN: &str = "myoutlet.app";
pub const DEFAULT_SERVER_ADDRESS: Ipv4Addr = Ipv4Addr::new(1, 2, 3, 4);
pub const DEFAULT_CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SERVER_IP is not a valid IPv4 address: {0}")]
    InvalidServerAddress(String),
    #[error("DNS_PROVIDER must be 'cloudflare' or 'manual', got '{0}'")]
    UnknownDnsProvider(String),
    #[error("MAIN_DOMAIN must not be empty")]
    EmptyMainDomain,
}

/// Whether deployments call the DNS adapter or only log manual instructions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DnsProviderMode {
    Cloudflare,
    #[default]
    Manual,
}

impl FromStr for DnsProviderMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cloudflare" => Ok(DnsProviderMode::Cloudflare),
            "manual" => Ok(DnsProviderMode::Manual),
            _ => Err(ConfigError::UnknownDnsProvider(s.to_string())),
        }
    }
}

impl fmt::Display for DnsProviderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DnsProviderMode::Cloudflare => "cloudflare",
            DnsProviderMode::Manual => "manual",
        })
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct CloudflareCredentials {
    pub zone_id: String,
    pub api_token: String,
}

impl fmt::Debug for CloudflareCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareCredentials")
            .field("zone_id", &self.zone_id)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub main_domain: String,
    pub server_address: Ipv4Addr,
    pub dns_provider: DnsProviderMode,
    /// Present only when both the zone id and the token are set.
    pub cloudflare: Option<CloudflareCredentials>,
    pub cloudflare_api_base: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            main_domain: DEFAULT_MAIN_DOMAIN.to_string(),
            server_address: DEFAULT_SERVER_ADDRESS,
            dns_provider: DnsProviderMode::default(),
            cloudflare: None,
            cloudflare_api_base: DEFAULT_CLOUDFLARE_API_BASE.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let main_domain = get("MAIN_DOMAIN")
            .unwrap_or_else(|| DEFAULT_MAIN_DOMAIN.to_string())
            .trim_matches('.')
            .to_string();
        if main_domain.is_empty() {
            return Err(ConfigError::EmptyMainDomain);
        }

        let server_address = match get("SERVER_IP") {
            Some(raw) => raw
                .parse::<Ipv4Addr>()
                .map_err(|_| ConfigError::InvalidServerAddress(raw))?,
            None => DEFAULT_SERVER_ADDRESS,
        };

        let dns_provider = match get("DNS_PROVIDER") {
            Some(raw) => raw.parse()?,
            None => DnsProviderMode::default(),
        };

        let cloudflare = match (get("CLOUDFLARE_ZONE_ID"), get("CLOUDFLARE_API_TOKEN")) {
            (Some(zone_id), Some(api_token)) => Some(CloudflareCredentials { zone_id, api_token }),
            _ => None,
        };

        Ok(Self {
            main_domain,
            server_address,
            dns_provider,
            cloudflare,
            cloudflare_api_base: get("CLOUDFLARE_API_BASE")
                .unwrap_or_else(|| DEFAULT_CLOUDFLARE_API_BASE.to_string()),
        })
    }

    /// Whether deployments run the DNS step at all.
    pub fn dns_enabled(&self) -> bool {
        self.dns_provider == DnsProviderMode::Cloudflare
    }

    /// One-line summary for the startup log. The API token is never included.
    pub fn describe(&self) -> String {
        let (zone, token) = match &self.cloudflare {
            Some(c) => (c.zone_id.as_str(), "set"),
            None => ("not set", "not set"),
        };
        format!(
            "MAIN_DOMAIN={} SERVER_IP={} DNS_PROVIDER={} CLOUDFLARE_ZONE_ID={} CLOUDFLARE_API_TOKEN={}",
            self.main_domain, self.server_address, self.dns_provider, zone, token
        )
    }
}
