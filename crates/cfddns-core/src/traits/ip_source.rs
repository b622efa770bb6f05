// # IP Source Trait
//
// Defines the interface for discovering the caller's current WAN address.
//
// ## Implementations
//
// - Address-echo over HTTP: `cfddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use cfddns_core::IpSource;
// use cfddns_core::traits::AddressFamily;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpSource implementation */;
//
//     let wan = source.current(AddressFamily::Ipv4).await?;
//     println!("WAN IPv4: {}", wan);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::fmt;

use super::dns_provider::RecordType;

/// Address family (v4 or v6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    /// DNS record type that carries addresses of this family
    pub fn record_type(&self) -> RecordType {
        match self {
            AddressFamily::Ipv4 => RecordType::A,
            AddressFamily::Ipv6 => RecordType::Aaaa,
        }
    }

    /// Label used in user-facing messages ("IPv4", "IPv6")
    pub fn label(&self) -> &'static str {
        match self {
            AddressFamily::Ipv4 => "IPv4",
            AddressFamily::Ipv6 => "IPv6",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::Ipv4 => f.write_str("ipv4"),
            AddressFamily::Ipv6 => f.write_str("ipv6"),
        }
    }
}

/// Trait for IP source implementations
///
/// A source answers one question: what is the caller's address for a given
/// family right now. It holds no cache; each call performs a fresh lookup.
///
/// The returned value is the trimmed string reported by the source. Sources
/// do not reject values that fail to parse as an IP literal, so the engine
/// compares raw strings against the record content.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the current WAN address for `family`
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The address, surrounding whitespace removed
    /// - `Err(Error)`: If the source could not be reached
    async fn current(&self, family: AddressFamily) -> Result<String, crate::Error>;

    /// Get the source name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}
