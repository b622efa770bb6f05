// # cfddns-core
//
// Core library for the one-shot Cloudflare DDNS updater.
//
// ## Architecture Overview
//
// This library provides the provider-independent part of a DDNS run:
// - **IpSource**: Trait for discovering the caller's current WAN address
// - **DnsProvider**: Trait for resolving zones, reading and overwriting records
// - **DdnsEngine**: Orchestrates zone lookup → compare → update for each family
// - **DdnsConfig**: Everything a run needs, validated up front
//
// ## Design Principles
//
// 1. **Separation of Concerns**: HTTP lives in plugin crates, not here
// 2. **Stateless**: Nothing survives a run; no cache, no state file
// 3. **Sequential**: One call at a time, IPv4 before IPv6
// 4. **Fail-fast**: The first error aborts the run, no retries
// 5. **Idempotency**: A record already equal to the WAN address is never written

pub mod traits;
pub mod engine;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{IpSource, DnsProvider};
pub use engine::{DdnsEngine, EngineEvent, FamilyOutcome, RunSummary};
pub use config::{Credentials, DdnsConfig, EngineConfig, RecordSelection};
pub use error::{Error, Result};
