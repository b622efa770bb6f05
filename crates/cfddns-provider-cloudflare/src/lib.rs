// # Cloudflare DNS Provider
//
// This crate provides the Cloudflare implementation of `DnsProvider` for the
// cfddns updater.
//
// ## Behavior
//
// - Authenticates with the legacy global API key (`X-Auth-Email` + `X-Auth-Key`)
// - Zone lookup by name, record lookup by (type, name), record overwrite by ID
// - Every response body is decoded as the Cloudflare envelope, regardless of
//   HTTP status, so API-level errors surface with their code and message
// - HTTP timeout configured (30 seconds)
// - Dry-run mode for safe testing
// - ❌ NO retry logic (a failed call aborts the run)
// - ❌ NO caching (each call performs its own lookup)
// - ❌ NO record creation (a missing record is an error)
//
// ## Security Requirements
//
// - The API key is sent only in the `X-Auth-Key` header
// - The API key never appears in logs, errors or Debug output
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List Zones: GET `/zones?name=...`
// - List DNS Records: GET `/zones/:zone_id/dns_records?type=...&name=...`
// - Update DNS Record: PUT `/zones/:zone_id/dns_records/:record_id`

pub mod schema;

use async_trait::async_trait;
use cfddns_core::config::Credentials;
use cfddns_core::traits::{DnsProvider, RecordMetadata, RecordType, UpdateResult};
use cfddns_core::{Error, Result};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use schema::{ApiEnvelope, DnsRecordSummary, UpdateRecordRequest, ZoneSummary};

/// Cloudflare API base URL
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) const PROVIDER_NAME: &str = "cloudflare";

/// Cloudflare DNS provider
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, `update_record` will:
/// - Perform the record re-fetch
/// - Log the intended PUT payload
/// - **NOT** actually modify the record
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API key.
pub struct CloudflareProvider {
    /// Account credentials
    /// ⚠️ NEVER log the key
    credentials: Credentials,

    /// API base URL (no trailing slash)
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Dry-run mode: if true, perform GET requests but skip PUT updates
    dry_run: bool,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_key", &"<REDACTED>")
            .field("email", &self.credentials.email)
            .field("base_url", &self.base_url)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider against the public API
    ///
    /// # Parameters
    ///
    /// - `credentials`: Account email and global API key
    /// - `dry_run`: If true, perform GET requests but skip PUT updates
    pub fn new(credentials: Credentials, dry_run: bool) -> Result<Self> {
        Self::with_base_url(credentials, CLOUDFLARE_API_BASE, dry_run)
    }

    /// Create a provider with a custom API base URL (e.g. a mock server)
    pub fn with_base_url(
        credentials: Credentials,
        base_url: impl Into<String>,
        dry_run: bool,
    ) -> Result<Self> {
        credentials.validate()?;

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            credentials,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            dry_run,
        })
    }

    /// Attach the authentication headers
    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Content-Type", "application/json")
            .header("X-Auth-Email", &self.credentials.email)
            .header("X-Auth-Key", &self.credentials.api_key)
    }

    /// Send a request and decode the envelope
    ///
    /// The body is decoded whatever the status, since Cloudflare reports API
    /// errors inside the envelope. A body that cannot be decoded becomes
    /// `Error::Http` on a non-2xx status and `Error::Decode` otherwise.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> Result<ApiEnvelope<T>> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(format!("{}: HTTP request failed: {}", operation, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("{}: failed to read response: {}", operation, e)))?;

        tracing::debug!("{} returned HTTP {}", operation, status);

        match serde_json::from_str::<ApiEnvelope<T>>(&body) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => Err(Error::http(status.as_u16(), body)),
            Err(e) => Err(Error::Decode(e)),
        }
    }

    /// Unwrap a list lookup, treating an explicit failure as a provider error
    fn list_result<T>(envelope: ApiEnvelope<Vec<T>>) -> Result<Vec<T>> {
        if envelope.reports_failure() {
            return Err(envelope.into_error());
        }
        Ok(envelope.result.unwrap_or_default())
    }

    /// Look up the records matching (type, name) in a zone
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones/:zone_id/dns_records?type=A&name=host.example.com
    /// X-Auth-Email: <email>
    /// X-Auth-Key: <key>
    /// ```
    async fn list_records(
        &self,
        zone_id: &str,
        record_name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecordSummary>> {
        tracing::debug!(
            "Looking up record: {} (type: {}) in zone {}",
            record_name,
            record_type,
            zone_id
        );

        let url = format!("{}/zones/{}/dns_records", self.base_url, zone_id);
        let request = self
            .authed(self.client.get(&url))
            .query(&[("type", record_type.as_str()), ("name", record_name)]);

        let envelope: ApiEnvelope<Vec<DnsRecordSummary>> =
            self.send(request, "Record lookup").await?;
        Self::list_result(envelope)
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    /// Resolve a zone name to its ID
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones?name=example.com
    /// X-Auth-Email: <email>
    /// X-Auth-Key: <key>
    /// ```
    async fn resolve_zone(&self, zone_name: &str) -> Result<String> {
        tracing::debug!("Looking up zone ID for: {}", zone_name);

        let url = format!("{}/zones", self.base_url);
        let request = self
            .authed(self.client.get(&url))
            .query(&[("name", zone_name)]);

        let envelope: ApiEnvelope<Vec<ZoneSummary>> = self.send(request, "Zone lookup").await?;
        let zone = Self::list_result(envelope)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("Zone not found: {}", zone_name)))?;

        tracing::debug!("Found zone ID: {}", zone.id);
        Ok(zone.id)
    }

    async fn get_record(
        &self,
        zone_id: &str,
        record_name: &str,
        record_type: RecordType,
    ) -> Result<RecordMetadata> {
        let record = self
            .list_records(zone_id, record_name, record_type)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                Error::not_found(format!(
                    "DNS record not found: {} (type: {})",
                    record_name, record_type
                ))
            })?;

        tracing::debug!("Found record ID: {} (content: {})", record.id, record.content);

        Ok(RecordMetadata {
            id: record.id,
            name: record.name.unwrap_or_else(|| record_name.to_string()),
            record_type,
            content: record.content,
        })
    }

    /// Overwrite a record's content
    ///
    /// Re-fetches the record to obtain its ID, then issues the PUT. The
    /// re-fetch is independent of any earlier read by the caller.
    ///
    /// # API Calls
    ///
    /// ```http
    /// # Get record ID
    /// GET /zones/:zone_id/dns_records?type=A&name=host.example.com
    ///
    /// # Overwrite (skipped in dry-run mode)
    /// PUT /zones/:zone_id/dns_records/:record_id
    /// {
    ///   "type": "A",
    ///   "name": "host.example.com",
    ///   "content": "1.2.3.4"
    /// }
    /// ```
    async fn update_record(
        &self,
        zone_id: &str,
        record_name: &str,
        record_type: RecordType,
        content: &str,
    ) -> Result<UpdateResult> {
        tracing::info!(
            "Updating Cloudflare DNS record: {} -> {} ({}) [mode: {}]",
            record_name,
            content,
            record_type,
            if self.dry_run { "DRY-RUN" } else { "LIVE" }
        );

        let record = self.get_record(zone_id, record_name, record_type).await?;

        let url = format!("{}/zones/{}/dns_records/{}", self.base_url, zone_id, record.id);
        let payload = UpdateRecordRequest {
            record_type,
            name: record_name,
            content,
        };

        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would send PUT request to {} with payload: {}",
                url,
                serde_json::to_string(&payload)?
            );
            return Ok(UpdateResult::DryRun {
                record_id: record.id,
                new_content: content.to_string(),
            });
        }

        let request = self.authed(self.client.put(&url)).json(&payload);
        let envelope: ApiEnvelope<serde_json::Value> = self.send(request, "Record update").await?;

        if envelope.success != Some(true) {
            let err = envelope.into_error();
            tracing::warn!("Cloudflare rejected update of {}: {}", record_name, err);
            return Err(err);
        }

        tracing::info!("DNS record updated successfully: {} -> {}", record_name, content);
        Ok(UpdateResult::Updated {
            record_id: record.id,
            previous_content: record.content,
            new_content: content.to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}
