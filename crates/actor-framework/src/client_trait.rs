//! # ActorClient Trait
//!
//! Common interface for resource-specific clients: the read and delete operations every
//! wrapper needs, built once on top of the generic `ResourceClient`.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard read/delete operations.
///
/// Implementors supply the inner client and a mapping into their own error type; `get`,
/// `list` and `delete` come for free.
///
/// # Example
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Tenant { id: u32 }
/// #[derive(Debug)] struct TenantCreate;
/// #[derive(Debug)] enum TenantAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct TenantError(String);
///
/// impl From<String> for TenantError {
///     fn from(s: String) -> Self { TenantError(s) }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Tenant {
///     type Id = u32;
///     type Create = TenantCreate;
///     type Action = TenantAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = TenantError;
///
///     fn from_create_params(id: u32, _: TenantCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id })
///     }
///     async fn handle_action(&mut self, _: TenantAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct TenantClient {
///     inner: ResourceClient<Tenant>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Tenant> for TenantClient {
///     type Error = TenantError;
///
///     fn inner(&self) -> &ResourceClient<Tenant> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         TenantError(e.to_string())
///     }
/// }
///
/// async fn usage(client: TenantClient) {
///     let _ = client.get(1).await;
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a snapshot of an entity by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Snapshot of every entity, unordered.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete an entity by id, returning its final state.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
