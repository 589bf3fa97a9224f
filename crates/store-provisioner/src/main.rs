//! # Store Provisioner
//!
//! Demo entry point. Reads configuration from the environment, registers one store,
//! deploys it in the background, and polls its status the way a client of the HTTP API
//! would.
//!
//! ```bash
//! RUST_LOG=info cargo run -p store-provisioner -- "Jane's Bakery"
//! DNS_PROVIDER=cloudflare RUST_LOG=debug cargo run -p store-provisioner
//! ```

use std::time::Duration;
use store_provisioner::config::AppConfig;
use store_provisioner::lifecycle::{setup_tracing, StoreSystem};
use tracing::{error, info, Instrument};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const MAX_POLLS: usize = 200;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = AppConfig::from_env().map_err(|e| e.to_string())?;
    info!(
        config = %config.describe(),
        dns_step = config.dns_enabled(),
        "Starting store provisioner"
    );

    let system = StoreSystem::new(config).map_err(|e| e.to_string())?;

    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Jane's Bakery".to_string());

    let span = tracing::info_span!("store_registration");
    let store = async {
        info!(%name, "Registering store");
        system
            .register_store(&name, None)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(store_id = %store.id, subdomain = %store.subdomain, "Store creation initiated");

    // Fire and forget: the outcome is read back from the registry below.
    drop(system.begin_deployment(store.id.clone(), &store.subdomain));

    let span = tracing::info_span!("status_polling");
    async {
        for _ in 0..MAX_POLLS {
            match system.get_status(store.id.clone()).await {
                Ok(Some(report)) if report.store.status.is_terminal() => {
                    match report.store.public_url {
                        Some(url) => info!(
                            %url,
                            seconds = ?report.deployment_time_seconds,
                            "Store is live"
                        ),
                        None => error!(
                            error = ?report.store.error_message,
                            "Store deployment failed"
                        ),
                    }
                    for line in &report.store.deployment_logs {
                        info!(log = %line, "Deployment log");
                    }
                    return;
                }
                Ok(Some(_)) => tokio::time::sleep(POLL_INTERVAL).await,
                Ok(None) => {
                    error!("Store disappeared");
                    return;
                }
                Err(e) => {
                    error!(error = %e, "Status poll failed");
                    return;
                }
            }
        }
        error!("Deployment did not finish in time");
    }
    .instrument(span)
    .await;

    match system.system_status().await {
        Ok(status) => info!(?status, "System status"),
        Err(e) => error!(error = %e, "System status unavailable"),
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
