//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself, as opposed to the entity's own error type
//! which travels inside [`FrameworkError::EntityError`].

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// A create was rejected by [`ActorEntity::conflicts_with`](crate::ActorEntity::conflicts_with).
    /// Carries the id of the entity already holding the contested value.
    #[error("Conflicts with existing item: {0}")]
    Conflict(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's own error type, if this error carries one.
    pub fn entity_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            FrameworkError::EntityError(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}
