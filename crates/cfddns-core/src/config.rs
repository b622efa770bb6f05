//! Configuration types for the DDNS updater
//!
//! A run is fully described by a [`DdnsConfig`]: who to authenticate as,
//! which zone and record to manage, and which address families to check.

use crate::traits::AddressFamily;
use std::fmt;
use std::str::FromStr;

/// Main DDNS configuration
#[derive(Debug, Clone)]
pub struct DdnsConfig {
    /// Provider credentials
    pub credentials: Credentials,

    /// Zone name (e.g., "example.com")
    pub zone_name: String,

    /// DNS record name (e.g., "host.example.com")
    pub record_name: String,

    /// Which record types to manage
    pub record_type: RecordSelection,

    /// Optional engine settings
    pub engine: EngineConfig,
}

impl DdnsConfig {
    /// Create a new configuration with default engine settings
    pub fn new(
        credentials: Credentials,
        zone_name: impl Into<String>,
        record_name: impl Into<String>,
        record_type: RecordSelection,
    ) -> Self {
        Self {
            credentials,
            zone_name: zone_name.into(),
            record_name: record_name.into(),
            record_type,
            engine: EngineConfig::default(),
        }
    }

    /// Replace the engine settings
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.credentials.validate()?;

        if self.zone_name.trim().is_empty() {
            return Err(crate::Error::config("Zone name cannot be empty"));
        }
        if self.record_name.trim().is_empty() {
            return Err(crate::Error::config("Record name cannot be empty"));
        }
        if self.engine.event_channel_capacity == 0 {
            return Err(crate::Error::config("Event channel capacity must be > 0"));
        }

        Ok(())
    }
}

/// Provider credentials (API key + account email)
///
/// The Debug implementation does NOT expose the API key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Global API key
    /// ⚠️ NEVER log this value
    pub api_key: String,

    /// Account email the key belongs to
    pub email: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            email: email.into(),
        }
    }

    /// Validate that both parts are present
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.api_key.is_empty() {
            return Err(crate::Error::config("API key cannot be empty"));
        }
        if self.email.is_empty() {
            return Err(crate::Error::config("Account email cannot be empty"));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<REDACTED>")
            .field("email", &self.email)
            .finish()
    }
}

/// Record types requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSelection {
    /// A record only
    A,
    /// AAAA record only
    Aaaa,
    /// A then AAAA
    Both,
}

impl RecordSelection {
    /// Address families to evaluate, always IPv4 before IPv6
    pub fn families(&self) -> Vec<AddressFamily> {
        match self {
            RecordSelection::A => vec![AddressFamily::Ipv4],
            RecordSelection::Aaaa => vec![AddressFamily::Ipv6],
            RecordSelection::Both => vec![AddressFamily::Ipv4, AddressFamily::Ipv6],
        }
    }
}

impl FromStr for RecordSelection {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(RecordSelection::A),
            "AAAA" => Ok(RecordSelection::Aaaa),
            "Both" => Ok(RecordSelection::Both),
            other => Err(crate::Error::config(format!(
                "Unsupported record type '{}'. Expected A, AAAA or Both",
                other
            ))),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Capacity of the engine event channel
    ///
    /// When full, new events are dropped (with a warning log).
    ///
    /// Default: 16 events
    pub event_channel_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: default_event_channel_capacity(),
        }
    }
}

fn default_event_channel_capacity() -> usize {
    16
}
