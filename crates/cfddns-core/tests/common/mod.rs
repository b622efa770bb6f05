//! Test doubles and common utilities for engine contract tests
//!
//! This module provides minimal test doubles that record every call the
//! engine makes, so tests can assert on call counts and ordering.

#![allow(dead_code)]

use cfddns_core::config::{Credentials, DdnsConfig, RecordSelection};
use cfddns_core::error::{Error, Result};
use cfddns_core::traits::{
    AddressFamily, DnsProvider, IpSource, RecordMetadata, RecordType, UpdateResult,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Shared, ordered log of calls across all doubles
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn new_call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// A mock DnsProvider backed by in-memory zones and records
pub struct MockDnsProvider {
    /// Zone name -> zone ID
    zones: HashMap<String, String>,
    /// (record name, type) -> content
    records: Arc<Mutex<HashMap<(String, RecordType), String>>>,
    /// Record type whose update is rejected with (code, message)
    reject_update: Option<(RecordType, i64, String)>,
    /// Dry-run mode
    dry_run: bool,
    /// Call counter for update_record()
    update_call_count: Arc<AtomicUsize>,
    /// Call counter for get_record()
    get_call_count: Arc<AtomicUsize>,
    /// Updates issued, as (type, content)
    updates: Arc<Mutex<Vec<(RecordType, String)>>>,
    /// Shared call log
    log: CallLog,
}

impl MockDnsProvider {
    pub fn new(log: CallLog) -> Self {
        Self {
            zones: HashMap::new(),
            records: Arc::new(Mutex::new(HashMap::new())),
            reject_update: None,
            dry_run: false,
            update_call_count: Arc::new(AtomicUsize::new(0)),
            get_call_count: Arc::new(AtomicUsize::new(0)),
            updates: Arc::new(Mutex::new(Vec::new())),
            log,
        }
    }

    pub fn with_zone(mut self, name: &str, id: &str) -> Self {
        self.zones.insert(name.to_string(), id.to_string());
        self
    }

    pub fn with_record(self, name: &str, record_type: RecordType, content: &str) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert((name.to_string(), record_type), content.to_string());
        self
    }

    pub fn rejecting_update(mut self, record_type: RecordType, code: i64, message: &str) -> Self {
        self.reject_update = Some((record_type, code, message.to_string()));
        self
    }

    pub fn in_dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Create a new MockDnsProvider that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            zones: other.zones.clone(),
            records: Arc::clone(&other.records),
            reject_update: other.reject_update.clone(),
            dry_run: other.dry_run,
            update_call_count: Arc::clone(&other.update_call_count),
            get_call_count: Arc::clone(&other.get_call_count),
            updates: Arc::clone(&other.updates),
            log: Arc::clone(&other.log),
        }
    }

    /// Get the number of times update_record() was called
    pub fn update_call_count(&self) -> usize {
        self.update_call_count.load(Ordering::SeqCst)
    }

    /// Get the number of times get_record() was called
    pub fn get_call_count(&self) -> usize {
        self.get_call_count.load(Ordering::SeqCst)
    }

    /// Get the list of updates that were issued
    pub fn updates(&self) -> Vec<(RecordType, String)> {
        self.updates.lock().unwrap().clone()
    }

    /// Current content of a record
    pub fn content(&self, name: &str, record_type: RecordType) -> Option<String> {
        self.records
            .lock()
            .unwrap()
            .get(&(name.to_string(), record_type))
            .cloned()
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn resolve_zone(&self, zone_name: &str) -> Result<String> {
        self.log
            .lock()
            .unwrap()
            .push(format!("resolve_zone {}", zone_name));

        self.zones
            .get(zone_name)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("zone not found: {}", zone_name)))
    }

    async fn get_record(
        &self,
        zone_id: &str,
        record_name: &str,
        record_type: RecordType,
    ) -> Result<RecordMetadata> {
        self.get_call_count.fetch_add(1, Ordering::SeqCst);
        self.log
            .lock()
            .unwrap()
            .push(format!("get_record {} {}", zone_id, record_type));

        let content = self
            .content(record_name, record_type)
            .ok_or_else(|| Error::not_found(format!("DNS record not found: {}", record_name)))?;

        Ok(RecordMetadata {
            id: format!("rec-{}", record_type),
            name: record_name.to_string(),
            record_type,
            content,
        })
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_name: &str,
        record_type: RecordType,
        content: &str,
    ) -> Result<UpdateResult> {
        self.update_call_count.fetch_add(1, Ordering::SeqCst);
        self.log
            .lock()
            .unwrap()
            .push(format!("update_record {} {} {}", zone_id, record_type, content));

        if let Some((rejected, code, message)) = &self.reject_update {
            if *rejected == record_type {
                return Err(Error::provider("mock", Some(*code), message.clone()));
            }
        }

        let previous_content = self
            .content(record_name, record_type)
            .ok_or_else(|| Error::not_found(format!("DNS record not found: {}", record_name)))?;
        let record_id = format!("rec-{}", record_type);

        if self.dry_run {
            return Ok(UpdateResult::DryRun {
                record_id,
                new_content: content.to_string(),
            });
        }

        self.records
            .lock()
            .unwrap()
            .insert((record_name.to_string(), record_type), content.to_string());
        self.updates
            .lock()
            .unwrap()
            .push((record_type, content.to_string()));

        Ok(UpdateResult::Updated {
            record_id,
            previous_content,
            new_content: content.to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

/// A fixed IpSource returning canned addresses per family
pub struct FixedIpSource {
    addresses: HashMap<AddressFamily, String>,
    current_call_count: Arc<AtomicUsize>,
    log: CallLog,
}

impl FixedIpSource {
    pub fn new(log: CallLog) -> Self {
        Self {
            addresses: HashMap::new(),
            current_call_count: Arc::new(AtomicUsize::new(0)),
            log,
        }
    }

    pub fn with_address(mut self, family: AddressFamily, address: &str) -> Self {
        self.addresses.insert(family, address.to_string());
        self
    }

    /// Get the number of times current() was called
    pub fn current_call_count(&self) -> usize {
        self.current_call_count.load(Ordering::SeqCst)
    }

    /// Create a new FixedIpSource that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            addresses: other.addresses.clone(),
            current_call_count: Arc::clone(&other.current_call_count),
            log: Arc::clone(&other.log),
        }
    }
}

#[async_trait::async_trait]
impl IpSource for FixedIpSource {
    async fn current(&self, family: AddressFamily) -> Result<String> {
        self.current_call_count.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(format!("current {}", family));

        self.addresses
            .get(&family)
            .cloned()
            .ok_or_else(|| Error::transport(format!("{} echo unreachable", family)))
    }

    fn source_name(&self) -> &'static str {
        "fixed"
    }
}

/// Helper to create a minimal DdnsConfig for testing
pub fn minimal_config(record_type: RecordSelection) -> DdnsConfig {
    DdnsConfig::new(
        Credentials::new("test-key", "user@example.com"),
        "example.com",
        "host.example.com",
        record_type,
    )
}

/// Drain all currently buffered engine events
pub fn drain_events(
    rx: &mut tokio::sync::mpsc::Receiver<cfddns_core::EngineEvent>,
) -> Vec<cfddns_core::EngineEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
