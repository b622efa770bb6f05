// # DNS Provider Trait
//
// Defines the interface for reading and overwriting DNS records via a
// provider's REST API.
//
// ## Implementations
//
// - Cloudflare: `cfddns-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use cfddns_core::DnsProvider;
// use cfddns_core::traits::RecordType;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     let zone_id = provider.resolve_zone("example.com").await?;
//     let record = provider
//         .get_record(&zone_id, "host.example.com", RecordType::A)
//         .await?;
//     println!("current content: {}", record.content);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ip_source::AddressFamily;

/// DNS record type managed by the updater
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// A record (IPv4)
    #[serde(rename = "A")]
    A,
    /// AAAA record (IPv6)
    #[serde(rename = "AAAA")]
    Aaaa,
}

impl RecordType {
    /// Wire representation used in API queries and payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
        }
    }

    /// Address family served by this record type
    pub fn family(&self) -> AddressFamily {
        match self {
            RecordType::A => AddressFamily::Ipv4,
            RecordType::Aaaa => AddressFamily::Ipv6,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a DNS update operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResult {
    /// Record content was overwritten
    Updated {
        /// Provider-specific record ID that was written
        record_id: String,
        /// Content observed on the re-fetch before the write
        previous_content: String,
        /// The new content
        new_content: String,
    },
    /// Dry-run mode: the write was logged but not sent
    DryRun {
        /// Provider-specific record ID that would have been written
        record_id: String,
        /// The content that would have been written
        new_content: String,
    },
}

/// Metadata about a DNS record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMetadata {
    /// The record ID (provider-specific)
    pub id: String,
    /// The record name
    pub name: String,
    /// The record type
    pub record_type: RecordType,
    /// The current content (an IP address string)
    pub content: String,
}

/// Trait for DNS provider implementations
///
/// Providers are stateless: every method performs its own HTTP exchanges and
/// keeps nothing between calls. They never retry; the first failure is
/// returned to the engine, which aborts the run.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so they can be boxed as trait
/// objects, even though the engine drives them from a single task.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Resolve a zone name (e.g. "example.com") to its provider ID
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The first matching zone ID
    /// - `Err(Error::NotFound)`: If no zone matches
    /// - `Err(Error)`: Transport, decode or provider failures
    async fn resolve_zone(&self, zone_name: &str) -> Result<String, crate::Error>;

    /// Look up a DNS record by name and type within a zone
    ///
    /// Returns the first match. Absence is an error, never an empty result.
    ///
    /// # Returns
    ///
    /// - `Ok(RecordMetadata)`: The record's current metadata
    /// - `Err(Error::NotFound)`: If no record matches
    /// - `Err(Error)`: Transport, decode or provider failures
    async fn get_record(
        &self,
        zone_id: &str,
        record_name: &str,
        record_type: RecordType,
    ) -> Result<RecordMetadata, crate::Error>;

    /// Overwrite a record's content
    ///
    /// Implementations re-fetch the record to obtain its ID and then write it,
    /// which is exactly two API calls per invocation. The re-fetch is an
    /// independent lookup, so a concurrent change between the engine's read
    /// and this write is not detected.
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateResult)`: The record was written (or logged in dry-run)
    /// - `Err(Error::Provider)`: The provider rejected the write
    /// - `Err(Error)`: Any other failure
    async fn update_record(
        &self,
        zone_id: &str,
        record_name: &str,
        record_type: RecordType,
        content: &str,
    ) -> Result<UpdateResult, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;

    /// Whether `update_record` skips the write and returns `UpdateResult::DryRun`
    fn is_dry_run(&self) -> bool {
        false
    }
}
