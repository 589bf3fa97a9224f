//! [`ActorEntity`] implementation for [`Store`].
//!
//! The actor owning these stores is the registry: subdomain uniqueness is enforced by
//! [`ActorEntity::conflicts_with`] inside the create handler, and every lifecycle step is a
//! guarded [`StoreAction`].

use super::actions::StoreAction;
use super::error::StoreError;
use crate::dns::SIMULATED_RECORD_ID;
use crate::model::{sample_catalog, Store, StoreCreate, StoreId, StoreStatus};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use time::OffsetDateTime;
use tracing::warn;

#[async_trait]
impl ActorEntity for Store {
    type Id = StoreId;
    type Create = StoreCreate;
    type Action = StoreAction;
    type ActionResult = Store;
    type Context = ();
    type Error = StoreError;

    /// Builds a store in `creating` with the sample catalog attached.
    fn from_create_params(id: StoreId, params: StoreCreate) -> Result<Self, StoreError> {
        let full_domain = format!("{}.{}", params.subdomain, params.main_domain);
        Ok(Self {
            id,
            name: params.name,
            subdomain: params.subdomain,
            full_domain,
            status: StoreStatus::Creating,
            dns_record_id: None,
            manual_dns: false,
            public_url: None,
            error_message: None,
            deployment_logs: Vec::new(),
            created_at: OffsetDateTime::now_utc(),
            deployment_started: None,
            deployment_completed: None,
            deployment_failed: None,
            products: sample_catalog(),
        })
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.subdomain == other.subdomain
    }

    /// Deleting never touches DNS; a live record is left for the operator.
    async fn on_delete(&self, _ctx: &()) -> Result<(), StoreError> {
        if let Some(record_id) = self
            .dns_record_id
            .as_deref()
            .filter(|id| *id != SIMULATED_RECORD_ID)
        {
            warn!(
                store_id = %self.id,
                full_domain = %self.full_domain,
                record_id,
                "Store deleted; DNS record must be removed manually"
            );
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: StoreAction, _ctx: &()) -> Result<Store, StoreError> {
        let allowed = match &action {
            StoreAction::BeginDeployment => self.status == StoreStatus::Creating,
            StoreAction::RecordDnsRecord { .. } | StoreAction::RecordManualDns { .. } => {
                self.status == StoreStatus::Configuring && !self.dns_step_recorded()
            }
            StoreAction::Activate => {
                self.status == StoreStatus::Configuring && self.dns_step_recorded()
            }
            StoreAction::Fail { .. } => self.status == StoreStatus::Configuring,
        };
        if !allowed {
            return Err(StoreError::InvalidTransition {
                from: self.status,
                action: action.name(),
            });
        }

        match action {
            StoreAction::BeginDeployment => {
                self.status = StoreStatus::Configuring;
                self.deployment_started = Some(now_not_before(self.created_at));
                self.deployment_logs.clear();
                self.deployment_logs.push("Creating DNS record...".to_string());
            }
            StoreAction::RecordDnsRecord { record_id } => {
                self.deployment_logs
                    .push(format!("DNS record created: {record_id}"));
                self.dns_record_id = Some(record_id);
            }
            StoreAction::RecordManualDns { server_address } => {
                self.manual_dns = true;
                self.deployment_logs.push(format!(
                    "Manual DNS setup required: {} → {}",
                    self.full_domain, server_address
                ));
            }
            StoreAction::Activate => {
                self.status = StoreStatus::Active;
                self.deployment_completed = Some(now_not_before(self.started_or_created()));
                self.public_url = Some(Store::url_for(&self.full_domain));
            }
            StoreAction::Fail { message } => {
                self.status = StoreStatus::Failed;
                self.deployment_failed = Some(now_not_before(self.started_or_created()));
                self.deployment_logs
                    .push(format!("Deployment failed: {message}"));
                self.error_message = Some(message);
            }
        }
        Ok(self.clone())
    }
}

impl Store {
    /// Exactly one of a record id or the manual-setup entry is recorded per deployment.
    fn dns_step_recorded(&self) -> bool {
        self.dns_record_id.is_some() || self.manual_dns
    }

    fn started_or_created(&self) -> OffsetDateTime {
        self.deployment_started.unwrap_or(self.created_at)
    }
}

/// Wall-clock now, clamped so lifecycle timestamps never run backwards.
fn now_not_before(earlier: OffsetDateTime) -> OffsetDateTime {
    OffsetDateTime::now_utc().max(earlier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn new_store(subdomain: &str) -> Store {
        Store::from_create_params(
            StoreId::from("store-1"),
            StoreCreate {
                name: "Corner Shop".into(),
                subdomain: subdomain.into(),
                main_domain: "myoutlet.app".into(),
            },
        )
        .unwrap()
    }

    async fn apply(store: &mut Store, action: StoreAction) -> Result<Store, StoreError> {
        store.handle_action(action, &()).await
    }

    #[test]
    fn test_new_store_starts_creating_with_catalog() {
        let store = new_store("corner-abc123");
        assert_eq!(store.status, StoreStatus::Creating);
        assert_eq!(store.full_domain, "corner-abc123.myoutlet.app");
        assert_eq!(store.products.len(), 3);
        assert!(store.deployment_logs.is_empty());
        assert!(store.public_url.is_none());
    }

    #[test]
    fn test_conflict_on_same_subdomain_only() {
        let a = new_store("corner-abc123");
        let b = new_store("corner-abc123");
        let c = new_store("corner-def456");
        assert!(a.conflicts_with(&b));
        assert!(!a.conflicts_with(&c));
    }

    #[tokio::test]
    async fn test_manual_deployment_path() {
        let mut store = new_store("corner-abc123");

        let started = apply(&mut store, StoreAction::BeginDeployment).await.unwrap();
        assert_eq!(started.status, StoreStatus::Configuring);
        assert_eq!(started.deployment_logs, vec!["Creating DNS record..."]);
        assert!(started.deployment_started.is_some());

        apply(
            &mut store,
            StoreAction::RecordManualDns {
                server_address: Ipv4Addr::new(1, 2, 3, 4),
            },
        )
        .await
        .unwrap();

        let active = apply(&mut store, StoreAction::Activate).await.unwrap();
        assert_eq!(active.status, StoreStatus::Active);
        assert_eq!(
            active.public_url.as_deref(),
            Some("http://corner-abc123.myoutlet.app")
        );
        assert_eq!(
            active.deployment_logs[1],
            "Manual DNS setup required: corner-abc123.myoutlet.app → 1.2.3.4"
        );
        assert!(active.dns_record_id.is_none());
        assert!(active.deployment_completed >= active.deployment_started);
        assert!(active.deployment_failed.is_none());
    }

    #[tokio::test]
    async fn test_dns_record_path() {
        let mut store = new_store("corner-abc123");
        apply(&mut store, StoreAction::BeginDeployment).await.unwrap();
        apply(
            &mut store,
            StoreAction::RecordDnsRecord {
                record_id: "rec-9".into(),
            },
        )
        .await
        .unwrap();
        let active = apply(&mut store, StoreAction::Activate).await.unwrap();

        assert_eq!(active.dns_record_id.as_deref(), Some("rec-9"));
        assert_eq!(active.deployment_logs[1], "DNS record created: rec-9");
    }

    #[tokio::test]
    async fn test_fail_records_message_and_timestamp() {
        let mut store = new_store("corner-abc123");
        apply(&mut store, StoreAction::BeginDeployment).await.unwrap();
        let failed = apply(
            &mut store,
            StoreAction::Fail {
                message: "DNS creation failed: boom".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(failed.status, StoreStatus::Failed);
        assert_eq!(
            failed.error_message.as_deref(),
            Some("DNS creation failed: boom")
        );
        assert_eq!(
            failed.deployment_logs.last().map(String::as_str),
            Some("Deployment failed: DNS creation failed: boom")
        );
        assert!(failed.deployment_failed.is_some());
        assert!(failed.deployment_completed.is_none());
    }

    #[tokio::test]
    async fn test_terminal_states_reject_every_action() {
        let mut store = new_store("corner-abc123");
        apply(&mut store, StoreAction::BeginDeployment).await.unwrap();
        apply(&mut store, StoreAction::Fail { message: "x".into() })
            .await
            .unwrap();

        for action in [
            StoreAction::BeginDeployment,
            StoreAction::RecordDnsRecord {
                record_id: "r".into(),
            },
            StoreAction::Activate,
            StoreAction::Fail { message: "y".into() },
        ] {
            let err = apply(&mut store, action).await.unwrap_err();
            assert!(matches!(
                err,
                StoreError::InvalidTransition {
                    from: StoreStatus::Failed,
                    ..
                }
            ));
        }
        assert_eq!(store.error_message.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_second_begin_is_rejected_without_side_effects() {
        let mut store = new_store("corner-abc123");
        apply(&mut store, StoreAction::BeginDeployment).await.unwrap();
        let before = store.clone();

        let err = apply(&mut store, StoreAction::BeginDeployment)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidTransition {
                from: StoreStatus::Configuring,
                action: "BeginDeployment",
            }
        );
        assert_eq!(store, before);
    }

    #[tokio::test]
    async fn test_activate_requires_dns_step_and_dns_step_is_single() {
        let mut store = new_store("corner-abc123");
        assert!(apply(&mut store, StoreAction::Activate).await.is_err());

        apply(&mut store, StoreAction::BeginDeployment).await.unwrap();
        assert!(apply(&mut store, StoreAction::Activate).await.is_err());

        apply(
            &mut store,
            StoreAction::RecordDnsRecord {
                record_id: "rec-1".into(),
            },
        )
        .await
        .unwrap();
        let err = apply(
            &mut store,
            StoreAction::RecordManualDns {
                server_address: Ipv4Addr::LOCALHOST,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::InvalidTransition { .. }));
        assert!(!store.manual_dns);
    }
}
