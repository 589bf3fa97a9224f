//! # System Lifecycle & Orchestration
//!
//! This module manages the runtime lifecycle of the provisioning system: starting the Store
//! actor, wiring the deployment orchestrator to it, exposing the operations the routing
//! layer calls, and shutting everything down.
//!
//! ## The StoreSystem Pattern
//!
//! [`StoreSystem`] is the one object a server holds:
//!
//! ```rust,ignore
//! impl StoreSystem {
//!     pub fn with_dns_provider(config: AppConfig, dns: Arc<dyn DnsProvider>) -> Self {
//!         // 1. Create the actor (no dependencies)
//!         let (store_actor, store_client) = store_actor::new();
//!
//!         // 2. Start it
//!         let store_handle = tokio::spawn(store_actor.run(()));
//!
//!         // 3. Wire the orchestrator to a clone of the client
//!         let deployer = Deployer::new(store_client.clone(), dns, config.dns_provider, config.server_address);
//!
//!         Self { store_client, deployer, config, handles: vec![store_handle] }
//!     }
//! }
//! ```
//!
//! ## Request Path vs. Background Path
//!
//! Registration runs on the request path and returns as soon as the store is inserted in
//! `creating`. [`StoreSystem::begin_deployment`] spawns the orchestrator and returns its
//! `JoinHandle` without awaiting it; the result becomes visible through
//! [`StoreSystem::get_status`] and [`StoreSystem::deployment_logs`].
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the clients** held by the system and its deployer
//! 2. **In-flight deployments finish** - each task owns a client clone
//! 3. **The actor sees its channel close** and logs its final size
//! 4. **Await the actor task**
//!
//! ## Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging; see the [`tracing`] module.

pub mod error;
pub mod store_system;
pub mod tracing;

pub use error::RegistrationError;
pub use store_system::*;
pub use self::tracing::setup_tracing;
