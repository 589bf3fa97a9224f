//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a `tracing-subscriber` fmt subscriber for the whole process.
//!
//! - **Levels** come from `RUST_LOG` (`EnvFilter::from_default_env()`).
//! - **Compact format** shows spans inline, e.g. `run:register: ...`.
//! - **Targets are hidden** (`with_target(false)`); actor logs carry `entity_type` instead.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup, shutdown and final size
//! - **Store Operations**: create, get, find, delete and each lifecycle action
//! - **Deployments**: one `run` span per store with the DNS step inside it
//! - **Provider Calls**: Cloudflare responses at `debug`, failures at `warn`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Deployment progress only
//! RUST_LOG=info cargo run
//!
//! # Full payloads, provider responses included
//! RUST_LOG=debug cargo run
//!
//! # Orchestrator at debug, everything else at info
//! RUST_LOG=info,store_provisioner::deploy=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a manual-mode deployment reads:
//!
//! ```text
//! INFO Actor started entity_type="Store"
//! INFO register_store: Created entity_type="Store" id=01J... size=1
//! INFO register_store: Store registered store_id=01J... full_domain=corner-shop-4f2a9c.myoutlet.app
//! INFO run: Starting deployment store_id=StoreId("01J...") mode=manual
//! INFO run: Creating DNS record... full_domain=corner-shop-4f2a9c.myoutlet.app
//! INFO run: Manual DNS setup required: add an A record server=1.2.3.4
//! INFO run: Deployment completed public_url=http://corner-shop-4f2a9c.myoutlet.app seconds=0
//! ```
//!
//! API tokens never appear in logs; configuration is logged through
//! [`AppConfig::describe`](crate::config::AppConfig::describe).
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type fields identify the actor instead
        .compact()
        .init();
}
