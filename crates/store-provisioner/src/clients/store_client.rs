//! # Store Client
//!
//! Provides a high‑level API for interacting with the `Store` actor.
//! It wraps a `ResourceClient<Store>` and turns framework errors into [`StoreError`].
use crate::model::{Store, StoreCreate, StoreId};
use crate::store_actor::{StoreAction, StoreError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::net::Ipv4Addr;
use tracing::{debug, instrument};

/// Client for interacting with the Store actor.
#[derive(Clone)]
pub struct StoreClient {
    inner: ResourceClient<Store>,
}

impl StoreClient {
    pub fn new(inner: ResourceClient<Store>) -> Self {
        Self { inner }
    }

    /// Inserts a store in `creating`. Fails with [`StoreError::SubdomainTaken`] if a live
    /// store already uses the subdomain; check and insert are one actor message.
    #[instrument(skip(self, params), fields(subdomain = %params.subdomain))]
    pub async fn register(&self, params: StoreCreate) -> Result<StoreId, StoreError> {
        debug!(?params, "register called");
        let subdomain = params.subdomain.clone();
        self.inner.create(params).await.map_err(|e| match e {
            FrameworkError::Conflict(_) => StoreError::SubdomainTaken(subdomain),
            other => Self::map_error(other),
        })
    }

    #[instrument(skip(self))]
    pub async fn find_by_subdomain(&self, subdomain: &str) -> Result<Option<Store>, StoreError> {
        let wanted = subdomain.to_string();
        self.inner
            .find(move |store: &Store| store.subdomain == wanted)
            .await
            .map_err(Self::map_error)
    }

    pub async fn begin_deployment(&self, id: StoreId) -> Result<Store, StoreError> {
        self.apply(id, StoreAction::BeginDeployment).await
    }

    pub async fn record_dns_record(
        &self,
        id: StoreId,
        record_id: impl Into<String>,
    ) -> Result<Store, StoreError> {
        self.apply(
            id,
            StoreAction::RecordDnsRecord {
                record_id: record_id.into(),
            },
        )
        .await
    }

    pub async fn record_manual_dns(
        &self,
        id: StoreId,
        server_address: Ipv4Addr,
    ) -> Result<Store, StoreError> {
        self.apply(id, StoreAction::RecordManualDns { server_address })
            .await
    }

    pub async fn activate(&self, id: StoreId) -> Result<Store, StoreError> {
        self.apply(id, StoreAction::Activate).await
    }

    pub async fn fail(&self, id: StoreId, message: impl Into<String>) -> Result<Store, StoreError> {
        self.apply(
            id,
            StoreAction::Fail {
                message: message.into(),
            },
        )
        .await
    }

    #[instrument(skip(self, action), fields(store_id = %id, action = action.name()))]
    async fn apply(&self, id: StoreId, action: StoreAction) -> Result<Store, StoreError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Store> for StoreClient {
    type Error = StoreError;

    fn inner(&self) -> &ResourceClient<Store> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(store_error) = e.entity_error::<StoreError>() {
            return store_error.clone();
        }
        match e {
            FrameworkError::NotFound(id) => StoreError::NotFound(id),
            other => StoreError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StoreStatus;
    use actor_framework::mock::{create_mock_client, expect_action, expect_find, MockClient};
    use actor_framework::ActorEntity;

    fn sample_store(id: &str, subdomain: &str) -> Store {
        Store::from_create_params(
            StoreId::from(id),
            StoreCreate {
                name: "Corner Shop".into(),
                subdomain: subdomain.into(),
                main_domain: "myoutlet.app".into(),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_register_maps_conflict_to_subdomain_taken() {
        let mut mock = MockClient::<Store>::new();
        mock.expect_create()
            .return_err(FrameworkError::Conflict("01OTHER".into()));
        let client = StoreClient::new(mock.client());

        let err = client
            .register(StoreCreate {
                name: "Corner Shop".into(),
                subdomain: "corner-abc123".into(),
                main_domain: "myoutlet.app".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, StoreError::SubdomainTaken("corner-abc123".into()));
        mock.verify();
    }

    #[tokio::test]
    async fn test_action_errors_keep_their_store_error() {
        let mut mock = MockClient::<Store>::new();
        mock.expect_action(StoreId::from("s1"))
            .return_err(FrameworkError::EntityError(Box::new(
                StoreError::InvalidTransition {
                    from: StoreStatus::Active,
                    action: "BeginDeployment",
                },
            )));
        mock.expect_action(StoreId::from("s2"))
            .return_err(FrameworkError::NotFound("s2".into()));
        mock.expect_get(StoreId::from("s3"))
            .return_err(FrameworkError::ActorClosed);
        let client = StoreClient::new(mock.client());

        assert_eq!(
            client.begin_deployment(StoreId::from("s1")).await,
            Err(StoreError::InvalidTransition {
                from: StoreStatus::Active,
                action: "BeginDeployment",
            })
        );
        assert_eq!(
            client.activate(StoreId::from("s2")).await,
            Err(StoreError::NotFound("s2".into()))
        );
        assert!(matches!(
            client.get(StoreId::from("s3")).await,
            Err(StoreError::ActorCommunicationError(_))
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn test_find_by_subdomain_sends_matching_filter() {
        let (client, mut receiver) = create_mock_client::<Store>(4);
        let client = StoreClient::new(client);

        let lookup = tokio::spawn(async move { client.find_by_subdomain("corner-abc123").await });

        let (filter, respond_to) = expect_find(&mut receiver).await.unwrap();
        let hit = sample_store("s1", "corner-abc123");
        assert!(filter(&hit));
        assert!(!filter(&sample_store("s2", "other-def456")));
        respond_to.send(Ok(Some(hit.clone()))).unwrap();

        assert_eq!(lookup.await.unwrap(), Ok(Some(hit)));
    }

    #[tokio::test]
    async fn test_fail_sends_message_payload() {
        let (client, mut receiver) = create_mock_client::<Store>(4);
        let client = StoreClient::new(client);

        let call = tokio::spawn(async move {
            client
                .fail(StoreId::from("s1"), "DNS creation failed: boom")
                .await
        });

        let (id, action, respond_to) = expect_action(&mut receiver).await.unwrap();
        assert_eq!(id, StoreId::from("s1"));
        assert_eq!(
            action,
            StoreAction::Fail {
                message: "DNS creation failed: boom".into()
            }
        );
        let mut failed = sample_store("s1", "corner-abc123");
        failed.status = StoreStatus::Failed;
        respond_to.send(Ok(failed)).unwrap();

        assert_eq!(call.await.unwrap().unwrap().status, StoreStatus::Failed);
    }
}
