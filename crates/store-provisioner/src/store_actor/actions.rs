//! Lifecycle actions for the Store actor.
//!
//! Each variant is one step of the deployment state machine. They are applied by
//! [`ActorEntity::handle_action`](actor_framework::ActorEntity::handle_action) while the
//! actor holds the store exclusively, so the steps of two runs never interleave.
//!
//! ```text
//! creating --BeginDeployment--> configuring --RecordDnsRecord | RecordManualDns--> configuring --Activate--> active
//!                                          \--Fail--> failed
//! ```

use std::net::Ipv4Addr;

/// Custom actions for Store entities. Every action returns the store's new snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    /// `creating -> configuring`. Stamps `deployment_started` and resets the logs.
    BeginDeployment,
    /// Records the provider's record id (or the simulation sentinel).
    RecordDnsRecord { record_id: String },
    /// Logs the A record an operator has to add by hand.
    RecordManualDns { server_address: Ipv4Addr },
    /// `configuring -> active`. Requires the DNS step to have been recorded.
    Activate,
    /// `configuring -> failed`.
    Fail { message: String },
}

impl StoreAction {
    pub fn name(&self) -> &'static str {
        match self {
            StoreAction::BeginDeployment => "BeginDeployment",
            StoreAction::RecordDnsRecord { .. } => "RecordDnsRecord",
            StoreAction::RecordManualDns { .. } => "RecordManualDns",
            StoreAction::Activate => "Activate",
            StoreAction::Fail { .. } => "Fail",
        }
    }
}
