// # cfddns - Cloudflare DDNS updater
//
// One-shot command: resolve the zone, compare the selected record(s) with
// the current WAN address, and update what differs. Then exit.
//
// This is a thin integration layer. All DDNS logic lives in cfddns-core.
//
// ## Usage
//
// ```bash
// cfddns CFKEY 1234567890 CFUSER user@example.com \
//     CFZONE_NAME example.com CFRECORD_NAME host.example.com CFRECORD_TYPE Both
// ```
//
// ## Environment
//
// Both variables are optional and never fail a run.
//
// - `DDNS_LOG_LEVEL`: trace, debug, info, warn (default), error
// - `DDNS_MODE`: `dry-run` to report updates without sending them

use anyhow::Result;
use cfddns::cli::{CliArgs, EnvSettings, USAGE};
use cfddns_ip_http::HttpIpSource;
use cfddns_provider_cloudflare::CloudflareProvider;
use std::env;
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes
///
/// - 0: Every selected record is up to date
/// - 1: Any failure (arguments, configuration, network, API)
#[derive(Debug, Clone, Copy)]
enum UpdaterExitCode {
    Success = 0,
    Failure = 1,
}

impl From<UpdaterExitCode> for ExitCode {
    fn from(code: UpdaterExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let cli = match CliArgs::parse(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            return UpdaterExitCode::Failure.into();
        }
    };

    let settings = EnvSettings::from_env();

    // Logs go to stderr; stdout carries the report
    let subscriber = FmtSubscriber::builder()
        .with_max_level(settings.log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error: Failed to set tracing subscriber: {}", e);
        return UpdaterExitCode::Failure.into();
    }

    if let Some(level) = &settings.rejected_log_level {
        warn!(
            "DDNS_LOG_LEVEL '{}' is not valid, using warn. \
            Valid levels: trace, debug, info, warn, error",
            level
        );
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: Failed to create tokio runtime: {}", e);
            return UpdaterExitCode::Failure.into();
        }
    };

    let code = rt.block_on(async {
        match run(cli, settings).await {
            Ok(()) => UpdaterExitCode::Success,
            Err(e) => {
                eprintln!("Error: {}", e);
                UpdaterExitCode::Failure
            }
        }
    });

    code.into()
}

async fn run(cli: CliArgs, settings: EnvSettings) -> Result<()> {
    let config = cli.into_config();
    config.validate()?;

    if settings.dry_run {
        info!("Dry-run mode: no records will be modified");
    }

    let provider = CloudflareProvider::new(config.credentials.clone(), settings.dry_run)?;
    let ip_source = HttpIpSource::new()?;

    let mut stdout = std::io::stdout();
    let summary =
        cfddns::execute(config, Box::new(provider), Box::new(ip_source), &mut stdout).await?;

    debug!(
        "Run finished for zone {}: {} update(s)",
        summary.zone_id,
        summary.updated_count()
    );

    Ok(())
}
