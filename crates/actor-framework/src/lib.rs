//! # Actor Framework
//!
//! Building blocks for type-safe resource actors on Tokio: one task owns a collection of
//! entities, and every read or mutation reaches it as a message.
//!
//! ## Why an actor for a registry?
//!
//! A registry shared by request handlers and background jobs needs a locking discipline.
//! Here that discipline is the message loop itself:
//!
//! - the map is owned by exactly one task, so there is no shared mutable state;
//! - requests are processed sequentially, so a check-then-insert inside one handler is
//!   atomic and two mutations of the same entity never interleave;
//! - readers get cloned snapshots and never hold anything that a writer waits on.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the resource type, its uniqueness rule and its actions
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing and id generation
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed async calls
//!
//! ## Request Set
//!
//! | Request | Result |
//! |---------|--------|
//! | `create` | new id, or [`FrameworkError::Conflict`] if [`ActorEntity::conflicts_with`] matches a stored entity |
//! | `get` | snapshot or `None` |
//! | `list` | snapshots of every entity, unordered |
//! | `find` | first snapshot matching a predicate |
//! | `delete` | the removed entity, after [`ActorEntity::on_delete`] |
//! | `perform_action` | the entity's [`ActorEntity::ActionResult`] |
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task.
//! - An action that awaits inside `handle_action` blocks the whole actor until it
//!   finishes. Slow I/O belongs in the caller, between two short actions.
//!
//! ## Testing
//!
//! The [`mock`] module answers client requests without a real actor, either from a
//! scripted queue or by letting the test inspect each request.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
