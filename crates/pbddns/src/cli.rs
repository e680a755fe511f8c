//! Command-line arguments and environment settings

use anyhow::{Result, bail};
use std::path::PathBuf;
use tracing::Level;

pub const USAGE: &str = "\
Update a Porkbun DNS entry to point at this host's public IP

Usage: pbddns --config <PATH> <DOMAIN>

Arguments:
  <DOMAIN>               Domain to update (e.g. www.example.com)

Options:
  -c, --config <PATH>    Path to configuration file
  -h, --help             Print help

Environment:
  PBDDNS_LOG_LEVEL       trace, debug, info, warn or error (default: info)
  PBDDNS_MODE            live or dry-run (default: live)";

/// What the command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Args),
    Help,
}

/// Arguments of a normal run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub config_path: PathBuf,
    pub domain: String,
}

/// Parse arguments (without the program name)
pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut config_path: Option<PathBuf> = None;
    let mut positionals: Vec<String> = Vec::new();
    let mut args = args.into_iter();
    let mut only_positionals = false;

    while let Some(arg) = args.next() {
        if only_positionals {
            positionals.push(arg);
            continue;
        }

        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--" => only_positionals = true,
            "-c" | "--config" => {
                let Some(path) = args.next() else {
                    bail!("{} requires a path", arg);
                };
                set_config(&mut config_path, path)?;
            }
            _ if arg.starts_with("--config=") => {
                set_config(&mut config_path, arg["--config=".len()..].to_string())?;
            }
            _ if arg.starts_with('-') && arg.len() > 1 => bail!("Unknown option: {}", arg),
            _ => positionals.push(arg),
        }
    }

    let Some(config_path) = config_path else {
        bail!("--config is required");
    };

    let mut positionals = positionals.into_iter();
    let Some(domain) = positionals.next() else {
        bail!("Missing domain to update");
    };
    if let Some(extra) = positionals.next() {
        bail!("Unexpected argument: {}", extra);
    }

    Ok(Command::Run(Args {
        config_path,
        domain,
    }))
}

fn set_config(slot: &mut Option<PathBuf>, path: String) -> Result<()> {
    if slot.is_some() {
        bail!("--config given more than once");
    }
    if path.is_empty() {
        bail!("--config path cannot be empty");
    }
    *slot = Some(PathBuf::from(path));
    Ok(())
}

/// Ambient settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_level: Level,
    pub dry_run: bool,
}

impl Settings {
    /// Load settings from `PBDDNS_LOG_LEVEL` and `PBDDNS_MODE`
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            std::env::var("PBDDNS_LOG_LEVEL").ok().as_deref(),
            std::env::var("PBDDNS_MODE").ok().as_deref(),
        )
    }

    fn from_values(log_level: Option<&str>, mode: Option<&str>) -> Result<Self> {
        let log_level = match log_level.unwrap_or("info").to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            other => bail!(
                "PBDDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                other
            ),
        };

        let dry_run = match mode.unwrap_or("live").to_lowercase().as_str() {
            "live" | "" => false,
            "dry-run" => true,
            other => bail!(
                "PBDDNS_MODE '{}' is not valid. Valid modes: live, dry-run",
                other
            ),
        };

        Ok(Self { log_level, dry_run })
    }
}
