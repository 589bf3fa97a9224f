//! Plain data types for the provisioner. The `ActorEntity` impls live next to each actor.

pub mod report;
pub mod store;

pub use report::*;
pub use store::*;
