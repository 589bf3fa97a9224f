//! # Store Actor
//!
//! The Store actor is the registry: the single owner of every [`Store`] and the only place
//! lifecycle fields are mutated.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Store`]
//! - [`actions`] - [`StoreAction`], one variant per state-machine step
//! - [`error`] - [`StoreError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use store_provisioner::store_actor;
//! use store_provisioner::model::StoreCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = store_actor::new();
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .register(StoreCreate {
//!             name: "Corner Shop".to_string(),
//!             subdomain: "corner-shop-0a1b2c".to_string(),
//!             main_domain: "myoutlet.app".to_string(),
//!         })
//!         .await?;
//!     let store = client.begin_deployment(id).await?;
//!     assert_eq!(store.status.as_str(), "configuring");
//!     Ok(())
//! }
//! ```
//!
//! ## Key Features
//!
//! - **No dependencies**: the actor needs no context (Context = ())
//! - **ULID ids**: unique, lexicographically sortable by creation time
//! - **Atomic registration**: the subdomain check and the insert happen in one message

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::StoreClient;
use crate::model::{Store, StoreId};
use actor_framework::ResourceActor;
use ulid::Ulid;

/// Creates a new Store actor and its client.
pub fn new() -> (ResourceActor<Store>, StoreClient) {
    let next_store_id = || StoreId(Ulid::new().to_string());

    let (actor, generic_client) = ResourceActor::new(32, next_store_id);
    let client = StoreClient::new(generic_client);

    (actor, client)
}
