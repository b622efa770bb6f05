// # cfddns
//
// Integration layer for the cfddns binary: argument parsing, output
// rendering, and a single entry point that drives one engine run.
//
// All DNS logic lives in cfddns-core and the component crates. This crate
// only wires them together and turns engine events into user-facing lines.

pub mod cli;
pub mod report;

use anyhow::Result;
use cfddns_core::traits::{DnsProvider, IpSource};
use cfddns_core::{DdnsConfig, DdnsEngine, RunSummary};
use std::io::Write;

/// Run one update pass and write the report lines to `out`
///
/// Report lines for everything that happened before a failure are still
/// written; the failure itself is returned to the caller.
pub async fn execute<W: Write>(
    config: DdnsConfig,
    provider: Box<dyn DnsProvider>,
    ip_source: Box<dyn IpSource>,
    out: &mut W,
) -> Result<RunSummary> {
    let (engine, mut events) = DdnsEngine::new(ip_source, provider, config)?;

    let result = engine.run().await;

    while let Ok(event) = events.try_recv() {
        if let Some(text) = report::render_event(&event) {
            writeln!(out, "{}", text)?;
        }
    }
    out.flush()?;

    Ok(result?)
}
