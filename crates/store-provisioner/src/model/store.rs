//! Store entity, its lifecycle status and the sample product catalog.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use time::OffsetDateTime;

/// Type-safe identifier for Stores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(pub String);

impl From<String> for StoreId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for StoreId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provisioning state. `Active` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    Creating,
    Configuring,
    Active,
    Failed,
}

impl StoreStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, StoreStatus::Active | StoreStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StoreStatus::Creating => "creating",
            StoreStatus::Configuring => "configuring",
            StoreStatus::Active => "active",
            StoreStatus::Failed => "failed",
        }
    }
}

impl Display for StoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An item in a store's illustrative catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}

/// The fixed catalog every new store starts with.
pub fn sample_catalog() -> Vec<Product> {
    vec![
        Product::new("Sample Product 1", "Amazing product for your needs", 29.99),
        Product::new("Sample Product 2", "Another great product", 39.99),
        Product::new("Sample Product 3", "Premium quality item", 49.99),
    ]
}

/// Represents a tenant store and its provisioning state.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
///
/// See [`impl ActorEntity for Store`](#impl-ActorEntity-for-Store) for details on:
/// - Creation parameters ([`StoreCreate`])
/// - Lifecycle actions ([`StoreAction`](crate::store_actor::StoreAction))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub subdomain: String,
    pub full_domain: String,
    pub status: StoreStatus,
    pub dns_record_id: Option<String>,
    /// Set once the manual A-record instruction has been logged.
    #[serde(default)]
    pub manual_dns: bool,
    pub public_url: Option<String>,
    pub error_message: Option<String>,
    pub deployment_logs: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub deployment_started: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub deployment_completed: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub deployment_failed: Option<OffsetDateTime>,
    pub products: Vec<Product>,
}

/// Payload for registering a new store.
#[derive(Debug, Clone)]
pub struct StoreCreate {
    pub name: String,
    pub subdomain: String,
    /// Zone the subdomain is placed under, e.g. `myoutlet.app`.
    pub main_domain: String,
}

impl Store {
    /// Whole seconds between `deployment_started` and the end of the deployment.
    ///
    /// The end is `deployment_completed`, else `deployment_failed`, else `now` for a
    /// deployment still in flight. `None` if the deployment never started.
    pub fn deployment_time_seconds(&self, now: OffsetDateTime) -> Option<i64> {
        let started = self.deployment_started?;
        let end = self
            .deployment_completed
            .or(self.deployment_failed)
            .unwrap_or(now);
        Some(elapsed_seconds(started, end))
    }

    /// `http://` URL the store is served from once active.
    pub fn url_for(full_domain: &str) -> String {
        format!("http://{full_domain}")
    }
}

/// Milliseconds between the two instants, divided by 1000 and rounded to the nearest second.
pub(crate) fn elapsed_seconds(from: OffsetDateTime, to: OffsetDateTime) -> i64 {
    let millis = (to - from).whole_milliseconds() as f64;
    (millis / 1000.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn store_at(created_at: OffsetDateTime) -> Store {
        Store {
            id: StoreId::from("01HSTORE"),
            name: "Corner Shop".into(),
            subdomain: "corner-shop-abc123".into(),
            full_domain: "corner-shop-abc123.myoutlet.app".into(),
            status: StoreStatus::Creating,
            dns_record_id: None,
            manual_dns: false,
            public_url: None,
            error_message: None,
            deployment_logs: vec![],
            created_at,
            deployment_started: None,
            deployment_completed: None,
            deployment_failed: None,
            products: sample_catalog(),
        }
    }

    #[test]
    fn test_deployment_time_absent_before_start() {
        let now = OffsetDateTime::now_utc();
        assert_eq!(store_at(now).deployment_time_seconds(now), None);
    }

    #[test]
    fn test_deployment_time_prefers_completed_then_failed_then_now() {
        let t0 = OffsetDateTime::now_utc();
        let mut store = store_at(t0);
        store.deployment_started = Some(t0);

        assert_eq!(
            store.deployment_time_seconds(t0 + Duration::milliseconds(2_400)),
            Some(2)
        );

        store.deployment_failed = Some(t0 + Duration::milliseconds(3_500));
        assert_eq!(
            store.deployment_time_seconds(t0 + Duration::seconds(60)),
            Some(4)
        );

        store.deployment_completed = Some(t0 + Duration::milliseconds(1_499));
        assert_eq!(
            store.deployment_time_seconds(t0 + Duration::seconds(60)),
            Some(1)
        );
    }

    #[test]
    fn test_store_serializes_with_camel_case_and_lowercase_status() {
        let created = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let mut store = store_at(created);
        store.status = StoreStatus::Configuring;
        store.deployment_started = Some(created);

        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["status"], "configuring");
        assert_eq!(json["fullDomain"], "corner-shop-abc123.myoutlet.app");
        assert_eq!(json["createdAt"], "2023-11-14T22:13:20Z");
        assert_eq!(json["deploymentStarted"], "2023-11-14T22:13:20Z");
        assert!(json["deploymentCompleted"].is_null());
        assert_eq!(json["products"].as_array().map(Vec::len), Some(3));

        let back: Store = serde_json::from_value(json).unwrap();
        assert_eq!(back, store);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!StoreStatus::Creating.is_terminal());
        assert!(!StoreStatus::Configuring.is_terminal());
        assert!(StoreStatus::Active.is_terminal());
        assert!(StoreStatus::Failed.is_terminal());
    }
}
