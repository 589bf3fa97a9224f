use super::error::RegistrationError;
use crate::clients::StoreClient;
use crate::config::AppConfig;
use crate::deploy::{DeployError, DeployOutcome, Deployer};
use crate::dns::{self, DnsError, DnsProvider};
use crate::model::{
    Availability, DeletedStore, DeploymentLogs, HostResolution, StatusCounts, Store, StoreCreate,
    StoreId, StoreListing, StoreReport, StoreSummary, SystemStatus,
};
use crate::store_actor::{self, StoreError};
use crate::subdomain;
use actor_framework::ActorClient;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

/// Returned with every delete; DNS records are never removed with the store.
pub const DNS_CLEANUP_NOTE: &str =
    "Manual cleanup of DNS records may be required if using Cloudflare";

/// Labels that address the platform rather than a store.
const PLATFORM_LABELS: [&str; 3] = ["www", "api", "admin"];

/// The runtime container for the provisioning system.
///
/// `StoreSystem` is responsible for:
/// - **Lifecycle Management**: starting the Store actor and shutting it down
/// - **Dependency Wiring**: handing the store client and DNS provider to the [`Deployer`]
/// - **Operations**: the calls the routing layer makes (register, deploy, status, list,
///   delete, availability, host resolution)
///
/// # Example
///
/// ```ignore
/// let system = StoreSystem::new(AppConfig::from_env()?)?;
///
/// let store = system.register_store("Jane's Bakery", None).await?;
/// system.begin_deployment(store.id.clone(), &store.subdomain);
///
/// // later, from a status poll
/// let report = system.get_status(store.id).await?;
///
/// system.shutdown().await?;
/// ```
pub struct StoreSystem {
    /// Client for interacting with the Store actor
    pub store_client: StoreClient,

    deployer: Deployer,
    config: AppConfig,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl StoreSystem {
    /// Starts the system with the DNS backend chosen from `config`.
    pub fn new(config: AppConfig) -> Result<Self, DnsError> {
        let dns = dns::provider_from_config(&config)?;
        Ok(Self::with_dns_provider(config, dns))
    }

    /// Starts the system with an explicit DNS backend.
    pub fn with_dns_provider(config: AppConfig, dns: Arc<dyn DnsProvider>) -> Self {
        let (store_actor, store_client) = store_actor::new();
        let store_handle = tokio::spawn(store_actor.run(()));

        let deployer = Deployer::new(
            store_client.clone(),
            dns,
            config.dns_provider,
            config.server_address,
        );

        Self {
            store_client,
            deployer,
            config,
            handles: vec![store_handle],
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Registers a store in `creating`. Deployment is started separately with
    /// [`StoreSystem::begin_deployment`].
    ///
    /// Without a custom subdomain one is allocated from `name`. A custom subdomain must
    /// pass [`subdomain::validate_format`]. A taken subdomain yields
    /// [`RegistrationError::Conflict`] with a freshly allocated suggestion.
    #[instrument(skip(self))]
    pub async fn register_store(
        &self,
        name: &str,
        custom_subdomain: Option<&str>,
    ) -> Result<Store, RegistrationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistrationError::NameRequired);
        }

        let subdomain = match custom_subdomain.filter(|s| !s.is_empty()) {
            Some(custom) => {
                subdomain::validate_format(custom).map_err(|reason| {
                    RegistrationError::InvalidSubdomain {
                        subdomain: custom.to_string(),
                        reason,
                    }
                })?;
                custom.to_string()
            }
            None => subdomain::allocate(name),
        };

        let params = StoreCreate {
            name: name.to_string(),
            subdomain,
            main_domain: self.config.main_domain.clone(),
        };
        let id = match self.store_client.register(params).await {
            Ok(id) => id,
            Err(StoreError::SubdomainTaken(subdomain)) => {
                return Err(RegistrationError::Conflict {
                    subdomain,
                    suggestion: subdomain::allocate(name),
                })
            }
            Err(e) => return Err(e.into()),
        };

        let store = self
            .store_client
            .get(id.clone())
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        info!(store_id = %store.id, full_domain = %store.full_domain, "Store registered");
        Ok(store)
    }

    /// Launches the deployment on a detached task and returns immediately.
    ///
    /// The handle may be dropped; the outcome is recorded on the store either way.
    pub fn begin_deployment(
        &self,
        store_id: StoreId,
        subdomain: &str,
    ) -> JoinHandle<Result<DeployOutcome, DeployError>> {
        self.deployer.spawn(store_id, subdomain)
    }

    pub async fn get_status(&self, store_id: StoreId) -> Result<Option<StoreReport>, StoreError> {
        let now = OffsetDateTime::now_utc();
        Ok(self
            .store_client
            .get(store_id)
            .await?
            .map(|store| StoreReport::new(store, now)))
    }

    pub async fn deployment_logs(
        &self,
        store_id: StoreId,
    ) -> Result<Option<DeploymentLogs>, StoreError> {
        Ok(self
            .store_client
            .get(store_id)
            .await?
            .map(DeploymentLogs::from))
    }

    /// Every store, newest first.
    pub async fn list_stores(&self) -> Result<StoreListing, StoreError> {
        let now = OffsetDateTime::now_utc();
        let mut stores = self.store_client.list().await?;
        stores.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let summary = StatusCounts::tally(stores.iter().map(|s| s.status));
        Ok(StoreListing {
            stores: stores
                .iter()
                .map(|store| StoreSummary::new(store, now))
                .collect(),
            summary,
        })
    }

    /// Removes the store. DNS records are never touched; `None` if the id is unknown.
    #[instrument(skip(self))]
    pub async fn delete_store(
        &self,
        store_id: StoreId,
    ) -> Result<Option<DeletedStore>, StoreError> {
        match self.store_client.delete(store_id).await {
            Ok(store) => {
                info!(subdomain = %store.subdomain, "Store deleted");
                Ok(Some(DeletedStore {
                    id: store.id,
                    subdomain: store.subdomain,
                    note: DNS_CLEANUP_NOTE,
                }))
            }
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn check_subdomain_availability(
        &self,
        candidate: &str,
    ) -> Result<Availability, StoreError> {
        if !subdomain::is_valid(candidate) {
            return Ok(Availability {
                subdomain: candidate.to_string(),
                valid: false,
                available: false,
                suggestion: Some(subdomain::allocate(candidate)),
            });
        }

        let taken = self
            .store_client
            .find_by_subdomain(candidate)
            .await?
            .is_some();
        Ok(Availability {
            subdomain: candidate.to_string(),
            valid: true,
            available: !taken,
            suggestion: taken.then(|| subdomain::allocate(candidate)),
        })
    }

    pub async fn system_status(&self) -> Result<SystemStatus, StoreError> {
        let stores = self.store_client.list().await?;
        Ok(SystemStatus {
            main_domain: self.config.main_domain.clone(),
            server_address: self.config.server_address,
            dns_provider: self.config.dns_provider,
            cloudflare_configured: self.config.cloudflare.is_some(),
            stores: StatusCounts::tally(stores.iter().map(|s| s.status)),
        })
    }

    /// Maps an HTTP `Host` header (port allowed) to the store it addresses.
    ///
    /// Only hosts with at least three labels that are not `localhost` are store hosts;
    /// the first label is the subdomain.
    pub async fn resolve_host(&self, host: &str) -> Result<HostResolution, StoreError> {
        let hostname = host.split(':').next().unwrap_or_default();
        let labels: Vec<&str> = hostname.split('.').collect();
        if labels.len() < 3 || hostname.contains("localhost") {
            return Ok(HostResolution::Platform);
        }

        let label = labels[0];
        if PLATFORM_LABELS.contains(&label) {
            return Ok(HostResolution::Platform);
        }
        if !subdomain::is_valid(label) {
            return Ok(HostResolution::InvalidSubdomain(label.to_string()));
        }

        Ok(match self.store_client.find_by_subdomain(label).await? {
            Some(store) => HostResolution::Store(Box::new(store)),
            None => HostResolution::UnknownStore(label.to_string()),
        })
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the clients closes the actor's channel once every in-flight deployment
    /// task (each holds its own clone) has finished.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.store_client);
        drop(self.deployer);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
