use super::{DnsBackend, DnsError, DnsProvider, DnsRecord, SIMULATED_RECORD_ID};
use async_trait::async_trait;
use std::net::Ipv4Addr;
use tracing::info;

/// Stand-in used when no provider credentials are configured. Always succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedDns {
    main_domain: String,
    server_address: Ipv4Addr,
}

impl SimulatedDns {
    pub fn new(main_domain: impl Into<String>, server_address: Ipv4Addr) -> Self {
        Self {
            main_domain: main_domain.into(),
            server_address,
        }
    }
}

#[async_trait]
impl DnsProvider for SimulatedDns {
    async fn ensure_record(&self, subdomain: &str) -> Result<DnsRecord, DnsError> {
        let full_domain = format!("{subdomain}.{}", self.main_domain);
        info!(%full_domain, "Simulating DNS record creation");
        Ok(DnsRecord {
            record_id: SIMULATED_RECORD_ID.to_string(),
            provider: DnsBackend::Simulation,
            existing: false,
            message: Some(format!(
                "Simulated DNS record for {full_domain} → {}",
                self.server_address
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulation_always_succeeds_with_sentinel() {
        let dns = SimulatedDns::new("myoutlet.app", Ipv4Addr::new(1, 2, 3, 4));

        for _ in 0..2 {
            let record = dns.ensure_record("corner-abc123").await.unwrap();
            assert_eq!(record.record_id, "simulated");
            assert_eq!(record.record_id, SIMULATED_RECORD_ID);
            assert_eq!(record.provider, DnsBackend::Simulation);
            assert!(!record.existing);
            assert_eq!(
                record.message.as_deref(),
                Some("Simulated DNS record for corner-abc123.myoutlet.app → 1.2.3.4")
            );
        }
    }
}
