//! # Store Provisioner
//!
//! Provisions per-tenant stores, each addressed by a generated subdomain, and deploys them
//! by ensuring a DNS A record points the subdomain at the server.
//!
//! ## Components (leaves first)
//!
//! - [`subdomain`] - slug + random suffix allocation, and format validation
//! - [`dns`] - the DNS provisioning adapter (Cloudflare or simulation)
//! - [`store_actor`] - the registry: a `ResourceActor<Store>` with guarded lifecycle actions
//! - [`deploy`] - the orchestrator driving `creating -> configuring -> active | failed`
//! - [`lifecycle`] - [`StoreSystem`](lifecycle::StoreSystem), the container the routing layer talks to
//!
//! Supporting modules: [`model`] (data and view types), [`clients`] (typed actor client),
//! [`config`] (environment configuration).

pub mod clients;
pub mod config;
pub mod deploy;
pub mod dns;
pub mod lifecycle;
pub mod model;
pub mod store_actor;
pub mod subdomain;
