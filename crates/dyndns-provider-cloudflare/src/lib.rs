// # Cloudflare Provider Client
//
// Executes the three remote calls of an update against the Cloudflare
// API v4: zone lookup, record lookup, record update. The client is
// stateless between calls — credentials arrive with every request, and
// the engine owns every decision about whether a call is needed.
//
// ## API Reference
//
// - List Zones: GET `/zones?name=...`
// - List DNS Records: GET `/zones/:zone_id/dns_records?type=...&name=...`
// - Update DNS Record: PUT `/zones/:zone_id/dns_records/:record_id`
//
// All calls carry the key-based credential headers (`X-Auth-Email`,
// `X-Auth-Key`) and exchange JSON bodies. Lookups treat a malformed or
// empty response the same as "no match"; the update call reports the
// provider's rejection message instead of inventing one.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use dyndns_core::error::{Error, Result};
use dyndns_core::family::AddressFamily;
use dyndns_core::request::DnsName;
use dyndns_core::traits::{ProviderClient, ProviderCredentials, RecordId, ZoneId};

/// Cloudflare API base URL
const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Request timeout for API calls. A hung provider fails the attempt
/// instead of stalling the trigger request; the next trigger retries.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Cloudflare client for the three update calls.
#[derive(Debug, Clone)]
pub struct CloudflareClient {
    client: reqwest::Client,
    base_url: String,
}

impl CloudflareClient {
    /// Create a client against the public Cloudflare API.
    pub fn new() -> Self {
        Self::with_base_url(CLOUDFLARE_API_BASE)
    }

    /// Point the client at a different API base (integration tests,
    /// API-compatible proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn with_auth(
        &self,
        request: reqwest::RequestBuilder,
        credentials: &ProviderCredentials,
    ) -> reqwest::RequestBuilder {
        request
            .header("X-Auth-Email", &credentials.email)
            .header("X-Auth-Key", &credentials.api_key)
            .header("Content-Type", "application/json")
    }

    /// Run one of the two lookup GETs and pull `result[0].id` out.
    ///
    /// Transport failures, non-2xx statuses, unparseable bodies, and
    /// empty result sets all collapse into the same lookup error: the
    /// attempt is over either way, and none of them is worth guessing
    /// around.
    async fn lookup_id(&self, request: reqwest::RequestBuilder, what: &str) -> Result<String> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::lookup(format!("{} request failed: {}", what, e)))?;

        if !response.status().is_success() {
            return Err(Error::lookup(format!(
                "{} request returned {}",
                what,
                response.status()
            )));
        }

        let body: ListResponse = response
            .json()
            .await
            .map_err(|e| Error::lookup(format!("{} response was not valid JSON: {}", what, e)))?;

        // Exact-match queries return at most one entry; first result wins.
        let first = body
            .result
            .into_iter()
            .next()
            .ok_or_else(|| Error::lookup(format!("no {} found", what)))?;

        Ok(first.id)
    }
}

impl Default for CloudflareClient {
    fn default() -> Self {
        Self::new()
    }
}

/// `result` entry of the two lookup calls; only the id is used.
#[derive(Debug, Deserialize)]
struct ApiObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    result: Vec<ApiObject>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct WriteResponse {
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

/// PUT body for the record update.
#[derive(Debug, Serialize)]
struct UpdateRecordBody<'a> {
    #[serde(rename = "type")]
    record_type: &'a str,
    name: String,
    content: &'a str,
}

#[async_trait]
impl ProviderClient for CloudflareClient {
    async fn resolve_zone(
        &self,
        zone_domain: &str,
        credentials: &ProviderCredentials,
    ) -> Result<ZoneId> {
        tracing::debug!("resolving zone id for {}", zone_domain);

        let request = self.with_auth(
            self.client
                .get(format!("{}/zones", self.base_url))
                .query(&[("name", zone_domain)]),
            credentials,
        );

        let id = self
            .lookup_id(request, &format!("zone matching {}", zone_domain))
            .await?;
        Ok(ZoneId::new(id))
    }

    async fn resolve_record(
        &self,
        zone: &ZoneId,
        name: &DnsName,
        family: AddressFamily,
        credentials: &ProviderCredentials,
    ) -> Result<RecordId> {
        let fqdn = name.fqdn();
        tracing::debug!("resolving {} record id for {}", family.record_type(), fqdn);

        let request = self.with_auth(
            self.client
                .get(format!("{}/zones/{}/dns_records", self.base_url, zone))
                .query(&[("type", family.record_type()), ("name", fqdn.as_str())]),
            credentials,
        );

        let id = self
            .lookup_id(
                request,
                &format!("record matching {} ({})", fqdn, family.record_type()),
            )
            .await?;
        Ok(RecordId::new(id))
    }

    async fn update_record(
        &self,
        zone: &ZoneId,
        record: &RecordId,
        name: &DnsName,
        family: AddressFamily,
        address: &str,
        credentials: &ProviderCredentials,
    ) -> Result<()> {
        let url = format!("{}/zones/{}/dns_records/{}", self.base_url, zone, record);
        let body = UpdateRecordBody {
            record_type: family.record_type(),
            name: name.fqdn(),
            content: address,
        };

        let response = self
            .with_auth(self.client.put(&url), credentials)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::update(format!("update request failed: {}", e)))?;

        // Rejections come back as `success: false` with an error list,
        // usually alongside a 4xx status; the body is authoritative.
        let outcome: WriteResponse = response
            .json()
            .await
            .map_err(|e| Error::update(format!("update response was not valid JSON: {}", e)))?;

        if outcome.success {
            tracing::debug!(
                "updated {} record for {} to {}",
                family.record_type(),
                name.fqdn(),
                address
            );
            Ok(())
        } else {
            let message = outcome
                .errors
                .into_iter()
                .next()
                .map(|e| e.message)
                .unwrap_or_else(|| "update rejected without an error message".to_string());
            Err(Error::update(message))
        }
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = CloudflareClient::with_base_url("http://127.0.0.1:9000/");
        assert_eq!(client.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn list_response_tolerates_extra_fields() {
        let body = r#"{
            "success": true,
            "errors": [],
            "result": [{"id": "zone-1", "name": "example.com", "status": "active"}]
        }"#;

        let parsed: ListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.result.len(), 1);
        assert_eq!(parsed.result[0].id, "zone-1");
    }

    #[test]
    fn write_response_surfaces_the_first_error_message() {
        let body = r#"{
            "success": false,
            "errors": [{"code": 1004, "message": "invalid content"}]
        }"#;

        let parsed: WriteResponse = serde_json::from_str(body).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.errors[0].message, "invalid content");
    }

    #[test]
    fn update_body_uses_the_wire_field_names() {
        let body = UpdateRecordBody {
            record_type: "A",
            name: "home.example.com".to_string(),
            content: "203.0.113.7",
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "A",
                "name": "home.example.com",
                "content": "203.0.113.7",
            })
        );
    }
}
