//! Typed request/response schemas for the Cloudflare v4 endpoints we call
//!
//! Every Cloudflare response is wrapped in the same envelope:
//!
//! ```json
//! { "success": true, "errors": [], "messages": [], "result": ... }
//! ```
//!
//! Only the fields the updater reads are modelled; unknown fields are ignored.

use cfddns_core::Error;
use cfddns_core::traits::RecordType;
use serde::{Deserialize, Serialize};

/// Response envelope shared by all endpoints
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Outcome flag. Absent in some error bodies, treated as "not reported".
    #[serde(default)]
    pub success: Option<bool>,

    /// Ordered error entries; only the first is surfaced
    #[serde(default)]
    pub errors: Vec<ApiMessage>,

    /// Endpoint payload. `null` or absent on failures.
    pub result: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Whether the envelope explicitly reports failure
    pub fn reports_failure(&self) -> bool {
        self.success == Some(false)
    }

    /// Build the provider error from the first error entry
    pub fn into_error(self) -> Error {
        match self.errors.into_iter().next() {
            Some(first) => Error::provider(super::PROVIDER_NAME, Some(first.code), first.message),
            None => Error::provider(super::PROVIDER_NAME, None, "Unknown error"),
        }
    }
}

/// A `(code, message)` entry from the envelope's `errors` list
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    pub code: i64,
    pub message: String,
}

/// One entry of `GET /zones?name=...`
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneSummary {
    pub id: String,
}

/// One entry of `GET /zones/:zone_id/dns_records?type=...&name=...`
#[derive(Debug, Clone, Deserialize)]
pub struct DnsRecordSummary {
    /// Record ID, used to address the update
    pub id: String,

    /// Record content (the IP address string for A/AAAA)
    pub content: String,

    /// Fully-qualified record name
    #[serde(default)]
    pub name: Option<String>,
}

/// Body of `PUT /zones/:zone_id/dns_records/:record_id`
#[derive(Debug, Serialize)]
pub struct UpdateRecordRequest<'a> {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: &'a str,
    pub content: &'a str,
}
