// # HTTP IP Source
//
// This crate provides the address-echo implementation of `IpSource` for the
// cfddns updater.
//
// ## Architecture
//
// Fetches the caller's public address from a plain-text echo service, one
// endpoint per address family (icanhazip.com by default). Each call is a
// single unauthenticated GET; nothing is cached or polled.
//
// ## Leniency
//
// The trimmed response body is returned as-is. A body that is not an IP
// literal of the requested family is logged as a warning but still returned,
// so the engine compares exactly what the echo service reported.

use async_trait::async_trait;
use cfddns_core::traits::{AddressFamily, IpSource};
use cfddns_core::{Error, Result};
use std::net::IpAddr;
use std::time::Duration;

/// Default IPv4 echo endpoint
pub const DEFAULT_IPV4_URL: &str = "http://ipv4.icanhazip.com";

/// Default IPv6 echo endpoint
pub const DEFAULT_IPV6_URL: &str = "http://ipv6.icanhazip.com";

/// Default HTTP timeout for echo requests (10 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP address-echo IP source
#[derive(Debug)]
pub struct HttpIpSource {
    /// Echo URL for IPv4
    ipv4_url: String,

    /// Echo URL for IPv6
    ipv6_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a source using the default icanhazip.com endpoints
    pub fn new() -> Result<Self> {
        Self::with_endpoints(DEFAULT_IPV4_URL, DEFAULT_IPV6_URL)
    }

    /// Create a source with custom per-family endpoints
    pub fn with_endpoints(ipv4_url: impl Into<String>, ipv6_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            ipv4_url: ipv4_url.into(),
            ipv6_url: ipv6_url.into(),
            client,
        })
    }

    /// Echo endpoint for a family
    pub fn endpoint(&self, family: AddressFamily) -> &str {
        match family {
            AddressFamily::Ipv4 => &self.ipv4_url,
            AddressFamily::Ipv6 => &self.ipv6_url,
        }
    }
}

/// Whether `text` is an IP literal of `family`
fn matches_family(text: &str, family: AddressFamily) -> bool {
    match text.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => family == AddressFamily::Ipv4,
        Ok(IpAddr::V6(_)) => family == AddressFamily::Ipv6,
        Err(_) => false,
    }
}

#[async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self, family: AddressFamily) -> Result<String> {
        let url = self.endpoint(family);
        tracing::debug!("Fetching WAN {} from {}", family.label(), url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response from {}: {}", url, e)))?;

        if !status.is_success() {
            return Err(Error::http(status.as_u16(), text));
        }

        let address = text.trim().to_string();

        if !matches_family(&address, family) {
            tracing::warn!(
                "Echo service {} returned '{}', which is not an {} address",
                url,
                address,
                family.label()
            );
        }

        tracing::debug!("WAN {}: {}", family.label(), address);
        Ok(address)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
