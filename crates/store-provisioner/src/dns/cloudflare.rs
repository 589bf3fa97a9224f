//! Cloudflare DNS backend.
//!
//! Two calls against `{api_base}/zones/{zone_id}/dns_records`, both with bearer auth:
//! - `GET ?name={full_domain}` to find an existing record;
//! - `POST {type: "A", name, content, ttl: 300, proxied: false}` when there is none.

use super::{DnsBackend, DnsError, DnsProvider, DnsRecord};
use crate::config::CloudflareCredentials;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::Ipv4Addr;
use tracing::{debug, info, instrument, warn};

pub const RECORD_TTL_SECONDS: u32 = 300;

#[derive(Debug, Clone)]
pub struct CloudflareDns {
    http: reqwest::Client,
    api_base: String,
    credentials: CloudflareCredentials,
    main_domain: String,
    server_address: Ipv4Addr,
}

/// Envelope every Cloudflare v4 response is wrapped in.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct RecordBody {
    id: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct CreateRecord<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'a str,
    content: String,
    ttl: u32,
    proxied: bool,
}

impl CloudflareDns {
    pub fn new(
        api_base: impl Into<String>,
        credentials: CloudflareCredentials,
        main_domain: impl Into<String>,
        server_address: Ipv4Addr,
    ) -> Result<Self, DnsError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            credentials,
            main_domain: main_domain.into(),
            server_address,
        })
    }

    fn records_url(&self) -> String {
        format!(
            "{}/zones/{}/dns_records",
            self.api_base, self.credentials.zone_id
        )
    }

    async fn find_record(&self, full_domain: &str) -> Result<Option<RecordBody>, DnsError> {
        let response = self
            .http
            .get(self.records_url())
            .query(&[("name", full_domain)])
            .bearer_auth(&self.credentials.api_token)
            .send()
            .await?;
        let records: Vec<RecordBody> = read_result(response).await?;
        Ok(records.into_iter().next())
    }

    async fn create_record(&self, full_domain: &str) -> Result<RecordBody, DnsError> {
        let body = CreateRecord {
            kind: "A",
            name: full_domain,
            content: self.server_address.to_string(),
            ttl: RECORD_TTL_SECONDS,
            proxied: false,
        };
        let response = self
            .http
            .post(self.records_url())
            .bearer_auth(&self.credentials.api_token)
            .json(&body)
            .send()
            .await?;
        read_result(response).await
    }

    async fn ensure(&self, full_domain: &str) -> Result<DnsRecord, DnsError> {
        if let Some(existing) = self.find_record(full_domain).await? {
            info!(full_domain, content = %existing.content, "DNS record already exists");
            return Ok(DnsRecord {
                record_id: existing.id,
                provider: DnsBackend::Cloudflare,
                existing: true,
                message: None,
            });
        }

        let created = self.create_record(full_domain).await?;
        info!(
            full_domain,
            server = %self.server_address,
            record_id = %created.id,
            "Cloudflare DNS record created"
        );
        Ok(DnsRecord {
            record_id: created.id,
            provider: DnsBackend::Cloudflare,
            existing: false,
            message: None,
        })
    }
}

/// Unwraps the `result` of a Cloudflare envelope, turning every failure shape into a
/// [`DnsError`].
async fn read_result<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, DnsError> {
    let status = response.status();
    if !status.is_success() {
        let details = response.json::<Value>().await.ok();
        return Err(DnsError::Provider {
            status: status.as_u16(),
            details,
        });
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| DnsError::MalformedResponse(e.to_string()))?;
    if body.get("success") == Some(&Value::Bool(false)) {
        let message = body["errors"]
            .as_array()
            .and_then(|errors| errors.iter().find_map(|e| e["message"].as_str()))
            .unwrap_or("no error message")
            .to_string();
        return Err(DnsError::Rejected {
            status: status.as_u16(),
            message,
            details: Some(body),
        });
    }

    let envelope: Envelope<T> = serde_json::from_value(body)
        .map_err(|e| DnsError::MalformedResponse(e.to_string()))?;
    envelope
        .result
        .ok_or_else(|| DnsError::MalformedResponse("missing result".to_string()))
}

#[async_trait]
impl DnsProvider for CloudflareDns {
    #[instrument(skip(self))]
    async fn ensure_record(&self, subdomain: &str) -> Result<DnsRecord, DnsError> {
        let full_domain = format!("{subdomain}.{}", self.main_domain);
        let outcome = self.ensure(&full_domain).await;
        match &outcome {
            Ok(record) => debug!(?record, "Cloudflare DNS step finished"),
            Err(e) => warn!(error = %e, details = ?e.details(), "Cloudflare DNS creation failed"),
        }
        outcome
    }
}
