//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a resource type implements to be owned by a
//! [`ResourceActor`](crate::ResourceActor). It names the associated types for ids, creation
//! payloads, actions, context and errors, and provides the hooks the actor calls while it
//! processes messages.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::conflicts_with`]: uniqueness rule checked against every live entity on create.
//! - [`ActorEntity::on_delete`]: called right before an entity is removed.
//!
//! Neither needs to be implemented unless the resource has a uniqueness constraint or
//! delete-time side effects.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Action handling is async so entities can await collaborators reachable through
/// `Context`. The context is injected into `run()`, not `new()`, so actors can be wired
/// after they are constructed.
///
/// # Mutation Model
/// The actor owns every entity. Mutations happen in place, inside `handle_action`, while
/// the actor holds exclusive access to its map; callers only ever see cloned snapshots.
/// Long-running work (network calls) must therefore stay *outside* `handle_action`, or the
/// whole actor stalls behind it.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity. Ids are produced by the actor's id generator.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Enum of resource-specific operations (state transitions, log appends, ...).
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum for the whole entity, shared by every hook and action.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from its freshly generated id and the creation payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Returns `true` when `self` may not coexist with `other` in the same actor.
    ///
    /// The actor evaluates this against every stored entity inside the same message
    /// handler that performs the insert, so check and insert form one critical section.
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }

    /// Called immediately before the entity is removed from the actor.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a resource-specific action against the stored entity.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
