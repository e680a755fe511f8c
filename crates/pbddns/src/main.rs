// # pbddns
//
// Keeps a Porkbun DNS name pointed at this host's public IP. Meant to run
// from a timer; each invocation is one independent pass.
//
// This binary is a thin layer: it parses arguments, sets up logging, builds
// the runtime and maps the outcome to an exit code. The update logic lives
// in pbddns-core.
//
// ## Example
//
// ```bash
// cat > /etc/pbddns.json <<'EOF'
// {
//   "endpoint": "https://api.porkbun.com/api/json/v3",
//   "apikey": "pk1_...",
//   "secretapikey": "sk1_..."
// }
// EOF
//
// PBDDNS_LOG_LEVEL=debug pbddns -c /etc/pbddns.json home.example.com
// ```

mod cli;
mod report;

use anyhow::{Context, Result};
use cli::{Args, Command, Settings, USAGE};
use pbddns_core::{DdnsConfig, DdnsEngine, DomainName, RunSummary};
use pbddns_provider_porkbun::PorkbunProvider;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: The pass completed
/// - 1: Usage, environment or configuration error
/// - 2: The pass failed (domain rejected, transport or response error)
#[derive(Debug, Clone, Copy)]
enum PbddnsExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<PbddnsExitCode> for ExitCode {
    fn from(code: PbddnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let args = match cli::parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return PbddnsExitCode::Success.into();
        }
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            return PbddnsExitCode::ConfigError.into();
        }
    };

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return PbddnsExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(settings.log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return PbddnsExitCode::ConfigError.into();
    }

    let (config, target) = match load(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("{:#}", e);
            return PbddnsExitCode::ConfigError.into();
        }
    };

    // One logical thread of control: every provider call is awaited in turn
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return PbddnsExitCode::RuntimeError.into();
        }
    };

    match rt.block_on(run(config, target, settings.dry_run)) {
        Ok(_) => PbddnsExitCode::Success.into(),
        Err(e) => {
            error!("{:#}", e);
            let usage_error = e
                .downcast_ref::<pbddns_core::Error>()
                .is_some_and(pbddns_core::Error::is_usage_error);
            if usage_error {
                PbddnsExitCode::ConfigError.into()
            } else {
                PbddnsExitCode::RuntimeError.into()
            }
        }
    }
}

/// Read the config file and parse the target domain
fn load(args: &Args) -> Result<(DdnsConfig, DomainName)> {
    let config = DdnsConfig::from_file(&args.config_path)?;
    let target = DomainName::parse(&args.domain)?;
    Ok((config, target))
}

/// Run one pass against the provider
async fn run(config: DdnsConfig, target: DomainName, dry_run: bool) -> Result<RunSummary> {
    if dry_run {
        warn!("Running in DRY-RUN mode - no records will be changed");
    }
    info!("Updating {}", target);

    let provider = PorkbunProvider::new(&config, dry_run)?;
    let (engine, events) = DdnsEngine::new(Box::new(provider), &config)?;
    let reporter = tokio::spawn(report::report_events(events));

    let result = engine.run_once(&target).await;

    // Closing the channel lets the reporter finish
    drop(engine);
    if let Err(e) = reporter.await {
        warn!("Event reporter stopped early: {}", e);
    }

    result.with_context(|| format!("Failed to update {}", target))
}
