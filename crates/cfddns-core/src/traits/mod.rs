//! Core traits for the DDNS updater
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`IpSource`]: Discover the caller's current WAN address
//! - [`DnsProvider`]: Resolve zones, read and overwrite DNS records

pub mod ip_source;
pub mod dns_provider;

pub use ip_source::{IpSource, AddressFamily};
pub use dns_provider::{DnsProvider, UpdateResult, RecordMetadata, RecordType};
