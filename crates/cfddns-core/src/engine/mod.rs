//! Core DDNS engine
//!
//! The DdnsEngine is responsible for:
//! - Resolving the configured zone once
//! - Comparing each requested record against the current WAN address
//! - Overwriting records whose content differs
//!
//! ## Architecture
//!
//! ```text
//!                    ┌──────────────┐
//!                    │  DdnsEngine  │
//!                    └──────────────┘
//!                            │
//!         ┌──────────────────┼──────────────────┐
//!         │                  │                  │
//!         ▼                  ▼                  ▼
//! ┌─────────────┐    ┌──────────────┐    ┌─────────────┐
//! │  IpSource   │    │ DnsProvider  │    │   Events    │
//! │ (WAN addr)  │    │ (read/write) │    │  (notify)   │
//! └─────────────┘    └──────────────┘    └─────────────┘
//! ```
//!
//! ## Run Flow
//!
//! 1. Resolve zone name to zone ID
//! 2. For each family (IPv4, then IPv6): read record, fetch WAN address, compare
//! 3. For each family that differs (IPv4, then IPv6): update the record
//! 4. Any error aborts the run; nothing is retried or rolled back

use crate::config::DdnsConfig;
use crate::error::Result;
use crate::traits::{AddressFamily, DnsProvider, IpSource, UpdateResult};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Events emitted by the DdnsEngine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Run started; `dry_run` mirrors the provider's write mode
    Started {
        zone_name: String,
        families: Vec<AddressFamily>,
        dry_run: bool,
    },

    /// Zone name resolved to an ID
    ZoneResolved { zone_name: String, zone_id: String },

    /// Record already matches the WAN address (no change needed)
    UpdateSkipped {
        family: AddressFamily,
        record_name: String,
        address: String,
    },

    /// Record differs from the WAN address and will be updated
    UpdateRequired {
        family: AddressFamily,
        record_name: String,
        current: String,
        wan: String,
    },

    /// DNS update succeeded
    UpdateSucceeded {
        family: AddressFamily,
        record_name: String,
        address: String,
    },

    /// Dry-run: update was logged but not sent
    DryRunCompleted {
        family: AddressFamily,
        record_name: String,
        address: String,
    },

    /// DNS update failed
    UpdateFailed { family: AddressFamily, error: String },

    /// Run finished (successfully or not)
    Stopped { reason: String },
}

/// What happened to one address family during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyOutcome {
    /// Record content already equal to the WAN address
    Unchanged {
        family: AddressFamily,
        address: String,
    },
    /// Record overwritten with the WAN address
    Updated {
        family: AddressFamily,
        address: String,
    },
    /// Dry-run: record would have been overwritten
    DryRun {
        family: AddressFamily,
        address: String,
    },
}

impl FamilyOutcome {
    pub fn family(&self) -> AddressFamily {
        match self {
            FamilyOutcome::Unchanged { family, .. }
            | FamilyOutcome::Updated { family, .. }
            | FamilyOutcome::DryRun { family, .. } => *family,
        }
    }
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Resolved zone ID
    pub zone_id: String,
    /// Per-family outcomes, unchanged families first, then updates in order
    pub outcomes: Vec<FamilyOutcome>,
}

impl RunSummary {
    /// Number of records actually written
    pub fn updated_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FamilyOutcome::Updated { .. }))
            .count()
    }
}

/// Core DDNS engine
///
/// The engine runs a single comparison-and-update pass and returns. It holds
/// no state between runs: a fresh engine is built for each invocation.
///
/// ## Lifecycle
///
/// 1. Create with [`DdnsEngine::new()`]
/// 2. Execute with [`DdnsEngine::run()`]
/// 3. Drain the event receiver for reporting
///
/// ## Threading
///
/// Every provider and source call is awaited before the next one starts.
/// IPv4 and IPv6 are never processed in parallel.
pub struct DdnsEngine {
    /// IP source for WAN address lookups
    ip_source: Box<dyn IpSource>,

    /// DNS provider for zone and record operations
    provider: Box<dyn DnsProvider>,

    /// Zone to resolve
    zone_name: String,

    /// Record to manage
    record_name: String,

    /// Families to evaluate, IPv4 first
    families: Vec<AddressFamily>,

    /// Event sender for external reporting
    event_tx: mpsc::Sender<EngineEvent>,
}

impl DdnsEngine {
    /// Create a new DDNS engine
    ///
    /// # Parameters
    ///
    /// - `ip_source`: IP source implementation
    /// - `provider`: DNS provider implementation
    /// - `config`: DDNS configuration
    ///
    /// # Returns
    ///
    /// A tuple of (engine, event_receiver) where event_receiver yields engine events
    pub fn new(
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        config: DdnsConfig,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>)> {
        config.validate()?;

        let (tx, rx) = mpsc::channel(config.engine.event_channel_capacity);

        let engine = Self {
            ip_source,
            provider,
            zone_name: config.zone_name,
            record_name: config.record_name,
            families: config.record_type.families(),
            event_tx: tx,
        };

        Ok((engine, rx))
    }

    /// Run one comparison-and-update pass
    ///
    /// # Returns
    ///
    /// - `Ok(RunSummary)`: Every requested family is now up to date
    /// - `Err(Error)`: The first failure; later steps were not attempted
    pub async fn run(&self) -> Result<RunSummary> {
        let dry_run = self.provider.is_dry_run();
        info!(
            "Checking {} in zone {} via {} (WAN from {}){}",
            self.record_name,
            self.zone_name,
            self.provider.provider_name(),
            self.ip_source.source_name(),
            if dry_run { " [dry-run]" } else { "" }
        );
        self.emit_event(EngineEvent::Started {
            zone_name: self.zone_name.clone(),
            families: self.families.clone(),
            dry_run,
        });

        match self.run_internal().await {
            Ok(summary) => {
                info!(
                    "Run complete: {} record(s) updated, zone {}",
                    summary.updated_count(),
                    summary.zone_id
                );
                self.emit_event(EngineEvent::Stopped {
                    reason: "Completed".to_string(),
                });
                Ok(summary)
            }
            Err(e) => {
                error!("Run aborted: {}", e);
                self.emit_event(EngineEvent::Stopped {
                    reason: format!("Aborted: {}", e),
                });
                Err(e)
            }
        }
    }

    async fn run_internal(&self) -> Result<RunSummary> {
        let zone_id = self.provider.resolve_zone(&self.zone_name).await?;
        debug!("Zone {} resolved to {}", self.zone_name, zone_id);
        self.emit_event(EngineEvent::ZoneResolved {
            zone_name: self.zone_name.clone(),
            zone_id: zone_id.clone(),
        });

        let mut outcomes = Vec::with_capacity(self.families.len());
        let mut pending = Vec::new();

        // Evaluate every family before writing anything
        for &family in &self.families {
            match self.check_family(&zone_id, family).await? {
                FamilyCheck::Matches(address) => {
                    outcomes.push(FamilyOutcome::Unchanged { family, address });
                }
                FamilyCheck::Differs(wan) => pending.push((family, wan)),
            }
        }

        for (family, wan) in pending {
            let outcome = self.apply_update(&zone_id, family, &wan).await?;
            outcomes.push(outcome);
        }

        Ok(RunSummary { zone_id, outcomes })
    }

    /// Compare one family's record against its WAN address
    async fn check_family(&self, zone_id: &str, family: AddressFamily) -> Result<FamilyCheck> {
        let record_type = family.record_type();

        let record = self
            .provider
            .get_record(zone_id, &self.record_name, record_type)
            .await?;
        let wan = self.ip_source.current(family).await?;

        if record.content == wan {
            info!(
                "DNS record {} ({}) matches the WAN {}, no update needed",
                self.record_name,
                record_type,
                family.label()
            );
            self.emit_event(EngineEvent::UpdateSkipped {
                family,
                record_name: self.record_name.clone(),
                address: record.content.clone(),
            });
            return Ok(FamilyCheck::Matches(record.content));
        }

        info!(
            "DNS record {} ({}) is {}, WAN {} is {}",
            self.record_name,
            record_type,
            record.content,
            family.label(),
            wan
        );
        self.emit_event(EngineEvent::UpdateRequired {
            family,
            record_name: self.record_name.clone(),
            current: record.content,
            wan: wan.clone(),
        });

        Ok(FamilyCheck::Differs(wan))
    }

    /// Overwrite one family's record with the WAN address
    async fn apply_update(
        &self,
        zone_id: &str,
        family: AddressFamily,
        wan: &str,
    ) -> Result<FamilyOutcome> {
        let record_type = family.record_type();

        let result = self
            .provider
            .update_record(zone_id, &self.record_name, record_type, wan)
            .await;

        match result {
            Ok(UpdateResult::Updated {
                previous_content, ..
            }) => {
                info!(
                    "Updated {} ({}) -> {} (was: {})",
                    self.record_name, record_type, wan, previous_content
                );
                self.emit_event(EngineEvent::UpdateSucceeded {
                    family,
                    record_name: self.record_name.clone(),
                    address: wan.to_string(),
                });
                Ok(FamilyOutcome::Updated {
                    family,
                    address: wan.to_string(),
                })
            }
            Ok(UpdateResult::DryRun { .. }) => {
                self.emit_event(EngineEvent::DryRunCompleted {
                    family,
                    record_name: self.record_name.clone(),
                    address: wan.to_string(),
                });
                Ok(FamilyOutcome::DryRun {
                    family,
                    address: wan.to_string(),
                })
            }
            Err(error) => {
                warn!(
                    "Update of {} via {} failed: {}",
                    self.record_name,
                    self.provider.provider_name(),
                    error
                );
                self.emit_event(EngineEvent::UpdateFailed {
                    family,
                    error: error.to_string(),
                });
                Err(error)
            }
        }
    }

    /// Emit an engine event
    fn emit_event(&self, event: EngineEvent) {
        // A full channel means nobody is draining events; drop rather than block
        if self.event_tx.try_send(event).is_err() {
            warn!("Event channel full, dropping event. Consider increasing event_channel_capacity.");
        }
    }
}

/// Comparison result for one family
enum FamilyCheck {
    /// Record content equals the WAN address
    Matches(String),
    /// Record content differs; carries the WAN address
    Differs(String),
}
