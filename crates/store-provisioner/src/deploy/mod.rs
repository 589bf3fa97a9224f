//! # Deployment Orchestrator
//!
//! Drives one store from `creating` to `active` or `failed`.
//!
//! ## Flow
//!
//! ```text
//! BeginDeployment          (actor message: creating -> configuring)
//!   |
//!   +-- cloudflare mode --> DnsProvider::ensure_record   (outside the actor)
//!   |                         +-- ok  --> RecordDnsRecord
//!   |                         +-- err --> Fail, return DeployError::Dns
//!   +-- manual mode ------> RecordManualDns
//!   |
//! Activate                 (configuring -> active)
//! ```
//!
//! The network call happens between two actor messages, so the registry keeps answering
//! `get`/`list` while a provider call is in flight. There is no timeout on that call; a
//! hung provider leaves the store in `configuring`.
//!
//! [`Deployer::spawn`] runs the whole flow on a detached task. Its outcome is recorded on
//! the store and logged; the caller that registered the store never waits on it.

pub mod error;

pub use error::DeployError;

use crate::clients::StoreClient;
use crate::config::DnsProviderMode;
use crate::dns::DnsProvider;
use crate::model::{Store, StoreId};
use crate::store_actor::StoreError;
use std::net::Ipv4Addr;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    pub public_url: String,
    pub deployment_time_seconds: i64,
}

#[derive(Clone)]
pub struct Deployer {
    stores: StoreClient,
    dns: Arc<dyn DnsProvider>,
    mode: DnsProviderMode,
    server_address: Ipv4Addr,
}

impl Deployer {
    pub fn new(
        stores: StoreClient,
        dns: Arc<dyn DnsProvider>,
        mode: DnsProviderMode,
        server_address: Ipv4Addr,
    ) -> Self {
        Self {
            stores,
            dns,
            mode,
            server_address,
        }
    }

    /// Runs the deployment on its own task and returns immediately.
    pub fn spawn(
        &self,
        store_id: StoreId,
        subdomain: impl Into<String>,
    ) -> JoinHandle<Result<DeployOutcome, DeployError>> {
        let deployer = self.clone();
        let subdomain = subdomain.into();
        tokio::spawn(async move {
            let result = deployer.run(store_id, &subdomain).await;
            if let Err(e) = &result {
                error!(%subdomain, error = %e, "Deployment failed");
            }
            result
        })
    }

    /// Drives the store through the state machine and returns once it is terminal.
    ///
    /// `subdomain` is what the caller registered; the store's own recorded subdomain is
    /// what gets provisioned.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub async fn run(
        &self,
        store_id: StoreId,
        subdomain: &str,
    ) -> Result<DeployOutcome, DeployError> {
        info!("Starting deployment");

        let store = match self.stores.begin_deployment(store_id.clone()).await {
            Ok(store) => store,
            Err(StoreError::NotFound(_)) => return Err(DeployError::StoreNotFound(store_id)),
            Err(StoreError::InvalidTransition { from, .. }) => {
                warn!(status = %from, "Store is not waiting for deployment");
                return Err(DeployError::AlreadyStarted {
                    id: store_id,
                    status: from,
                });
            }
            Err(e) => return Err(DeployError::Registry(e)),
        };
        if store.subdomain != subdomain {
            warn!(recorded = %store.subdomain, "Subdomain differs from the registered store");
        }

        match self.provision(&store).await {
            Ok(outcome) => {
                info!(
                    public_url = %outcome.public_url,
                    seconds = outcome.deployment_time_seconds,
                    "Deployment completed"
                );
                Ok(outcome)
            }
            Err(e) => {
                self.record_failure(&store_id, &e).await;
                Err(e)
            }
        }
    }

    async fn provision(&self, store: &Store) -> Result<DeployOutcome, DeployError> {
        info!(full_domain = %store.full_domain, "Creating DNS record...");
        match self.mode {
            DnsProviderMode::Cloudflare => {
                let record = self
                    .dns
                    .ensure_record(&store.subdomain)
                    .await
                    .map_err(DeployError::Dns)?;
                info!(
                    record_id = %record.record_id,
                    existing = record.existing,
                    "DNS record created"
                );
                self.stores
                    .record_dns_record(store.id.clone(), record.record_id)
                    .await?;
            }
            DnsProviderMode::Manual => {
                info!(
                    full_domain = %store.full_domain,
                    server = %self.server_address,
                    "Manual DNS setup required: add an A record"
                );
                self.stores
                    .record_manual_dns(store.id.clone(), self.server_address)
                    .await?;
            }
        }

        let active = self.stores.activate(store.id.clone()).await?;
        Ok(DeployOutcome {
            public_url: Store::url_for(&active.full_domain),
            deployment_time_seconds: active
                .deployment_time_seconds(OffsetDateTime::now_utc())
                .unwrap_or_default(),
        })
    }

    /// Marks the store failed. A store deleted mid-run is left alone.
    async fn record_failure(&self, store_id: &StoreId, cause: &DeployError) {
        if matches!(cause, DeployError::Registry(StoreError::NotFound(_))) {
            warn!("Store disappeared during deployment");
            return;
        }
        if let Err(e) = self.stores.fail(store_id.clone(), cause.to_string()).await {
            warn!(error = %e, "Could not mark store as failed");
        }
    }
}
