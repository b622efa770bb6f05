//! Command-line and environment parsing
//!
//! The command line is a fixed sequence of flag/value pairs:
//!
//! ```text
//! cfddns CFKEY <key> CFUSER <email> CFZONE_NAME <zone> CFRECORD_NAME <record> CFRECORD_TYPE <A|AAAA|Both>
//! ```
//!
//! Logging and dry-run are controlled by optional environment variables:
//! - `DDNS_LOG_LEVEL`: trace, debug, info, warn (default), error
//! - `DDNS_MODE`: set to `dry-run` to skip writes
//!
//! Neither can fail a run: an unknown log level falls back to `warn`.

use anyhow::{Result, bail};
use cfddns_core::config::{Credentials, DdnsConfig, RecordSelection};
use tracing::Level;

pub const USAGE: &str = "Usage: cfddns CFKEY 1234567890 CFUSER user@example.com \
CFZONE_NAME example.com CFRECORD_NAME host.example.com CFRECORD_TYPE A|AAAA|Both";

/// Flags in the order they must appear
const FLAGS: [&str; 5] = [
    "CFKEY",
    "CFUSER",
    "CFZONE_NAME",
    "CFRECORD_NAME",
    "CFRECORD_TYPE",
];

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub credentials: Credentials,
    pub zone_name: String,
    pub record_name: String,
    pub record_type: RecordSelection,
}

impl CliArgs {
    /// Parse the arguments that follow the program name
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        if args.len() != FLAGS.len() * 2 {
            bail!(
                "Expected {} arguments, got {}",
                FLAGS.len() * 2,
                args.len()
            );
        }

        let mut values = Vec::with_capacity(FLAGS.len());
        for (i, flag) in FLAGS.iter().enumerate() {
            let name = args[2 * i].as_ref();
            let value = args[2 * i + 1].as_ref();

            if name != *flag {
                bail!("Expected {} at position {}, got '{}'", flag, 2 * i + 1, name);
            }
            if value.trim().is_empty() {
                bail!("{} requires a non-empty value", flag);
            }
            values.push(value.to_string());
        }

        let record_type: RecordSelection = values[4].parse()?;

        Ok(Self {
            credentials: Credentials::new(values[0].clone(), values[1].clone()),
            zone_name: values[2].clone(),
            record_name: values[3].clone(),
            record_type,
        })
    }

    /// Build the run configuration
    pub fn into_config(self) -> DdnsConfig {
        DdnsConfig::new(
            self.credentials,
            self.zone_name,
            self.record_name,
            self.record_type,
        )
    }
}

/// Settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSettings {
    pub log_level: Level,
    pub dry_run: bool,

    /// Unrecognised `DDNS_LOG_LEVEL` value that was replaced by the default
    pub rejected_log_level: Option<String>,
}

impl EnvSettings {
    /// Load settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut rejected_log_level = None;
        let log_level = match lookup("DDNS_LOG_LEVEL") {
            None => Level::WARN,
            Some(value) => match value.to_lowercase().as_str() {
                "trace" => Level::TRACE,
                "debug" => Level::DEBUG,
                "info" => Level::INFO,
                "warn" => Level::WARN,
                "error" => Level::ERROR,
                _ => {
                    rejected_log_level = Some(value);
                    Level::WARN
                }
            },
        };

        let dry_run = lookup("DDNS_MODE")
            .unwrap_or_default()
            .to_lowercase()
            == "dry-run";

        Self {
            log_level,
            dry_run,
            rejected_log_level,
        }
    }
}
