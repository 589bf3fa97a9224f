//! Read-only views handed to the routing layer.

use super::store::{Store, StoreId, StoreStatus};
use crate::config::DnsProviderMode;
use serde::Serialize;
use std::net::Ipv4Addr;
use time::OffsetDateTime;

/// A store snapshot plus its elapsed deployment time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreReport {
    #[serde(flatten)]
    pub store: Store,
    pub deployment_time_seconds: Option<i64>,
}

impl StoreReport {
    pub fn new(store: Store, now: OffsetDateTime) -> Self {
        let deployment_time_seconds = store.deployment_time_seconds(now);
        Self {
            store,
            deployment_time_seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub id: StoreId,
    pub name: String,
    pub subdomain: String,
    pub status: StoreStatus,
    pub full_domain: String,
    pub public_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub deployment_time_seconds: Option<i64>,
}

impl StoreSummary {
    pub fn new(store: &Store, now: OffsetDateTime) -> Self {
        Self {
            id: store.id.clone(),
            name: store.name.clone(),
            subdomain: store.subdomain.clone(),
            status: store.status,
            full_domain: store.full_domain.clone(),
            public_url: store.public_url.clone(),
            created_at: store.created_at,
            deployment_time_seconds: store.deployment_time_seconds(now),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub active: usize,
    pub configuring: usize,
    pub failed: usize,
}

impl StatusCounts {
    pub fn tally(statuses: impl IntoIterator<Item = StoreStatus>) -> Self {
        statuses
            .into_iter()
            .fold(Self::default(), |mut counts, status| {
                counts.total += 1;
                match status {
                    StoreStatus::Active => counts.active += 1,
                    StoreStatus::Configuring => counts.configuring += 1,
                    StoreStatus::Failed => counts.failed += 1,
                    StoreStatus::Creating => {}
                }
                counts
            })
    }
}

/// Stores newest first, with per-status counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreListing {
    pub stores: Vec<StoreSummary>,
    pub summary: StatusCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentLogs {
    pub id: StoreId,
    pub subdomain: String,
    pub status: StoreStatus,
    pub logs: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub deployment_started: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub deployment_completed: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub deployment_failed: Option<OffsetDateTime>,
}

impl From<Store> for DeploymentLogs {
    fn from(store: Store) -> Self {
        Self {
            id: store.id,
            subdomain: store.subdomain,
            status: store.status,
            logs: store.deployment_logs,
            created: store.created_at,
            deployment_started: store.deployment_started,
            deployment_completed: store.deployment_completed,
            deployment_failed: store.deployment_failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub subdomain: String,
    pub valid: bool,
    pub available: bool,
    /// A fresh allocation based on the candidate, offered when it cannot be used.
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedStore {
    pub id: StoreId,
    pub subdomain: String,
    /// Reminder that provider records are not removed with the store.
    pub note: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub main_domain: String,
    pub server_address: Ipv4Addr,
    pub dns_provider: DnsProviderMode,
    pub cloudflare_configured: bool,
    pub stores: StatusCounts,
}

/// What an incoming `Host` header refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum HostResolution {
    /// Not a store host: bare domain, localhost, or a platform label (`www`, `api`, `admin`).
    Platform,
    /// First label is not a well-formed subdomain.
    InvalidSubdomain(String),
    /// Well-formed label with no store behind it.
    UnknownStore(String),
    Store(Box<Store>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_counts_tally() {
        let counts = StatusCounts::tally([
            StoreStatus::Creating,
            StoreStatus::Active,
            StoreStatus::Active,
            StoreStatus::Configuring,
            StoreStatus::Failed,
        ]);
        assert_eq!(
            counts,
            StatusCounts {
                total: 5,
                active: 2,
                configuring: 1,
                failed: 1,
            }
        );
    }
}
