//! # Generic Messages
//!
//! Message types exchanged between a `ResourceClient` and its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Predicate evaluated inside the actor against each stored entity.
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send>;

/// Request sent to the actor.
///
/// The variants cover the lifecycle of a resource (create, read, list, find, delete)
/// plus `Action` for entity-specific mutations. Every variant is generic over
/// `T: ActorEntity`, so a payload for one resource type cannot reach another's actor.
///
/// - **Create**: builds the entity from [`ActorEntity::Create`] and inserts it unless it
///   conflicts with a stored entity.
/// - **Get**: snapshot of one entity by id.
/// - **List**: snapshot of every stored entity, in no particular order.
/// - **Find**: first stored entity matching a predicate.
/// - **Delete**: removes the entity after its `on_delete` hook.
/// - **Action**: applies an [`ActorEntity::Action`] in place.
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Find {
        filter: Filter<T>,
        respond_to: Response<Option<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
