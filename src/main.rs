//! yadmin-probe command line entry point
//!
//! Usage: `yadmin-probe [CONFIG_PATH]`
//!
//! Without a path the configuration comes from `YADMIN_*` environment variables
//! only. The probe result is printed to stdout as JSON.

use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::process::ExitCode;
use tracing::error;

use yadmin_probe::infrastructure::{init_logging_with_config, ProbeConfig};
use yadmin_probe::ProbeClient;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let Some(config) = load_config(std::env::args_os().nth(1))? else {
        println!("Still works");
        return Ok(());
    };

    init_logging_with_config(&config.logging)?;

    let client = ProbeClient::new(config)?;
    client.config().log_config();
    tracing::info!("Testing: {}", client);

    let status = client.status().await?;
    println!("{}", serde_json::to_string(&status)?);
    Ok(())
}

/// Load the probe configuration.
///
/// `None` means nothing was configured at all (no path and no `base_url` in the
/// environment). A configuration file without a `base_url` is an error.
fn load_config(path: Option<OsString>) -> Result<Option<ProbeConfig>> {
    match path {
        Some(path) => {
            let shown = path.to_string_lossy().into_owned();
            let config = ProbeConfig::from_file(&path)
                .with_context(|| format!("Failed to load configuration from {shown}"))?;
            if !config.has_target() {
                bail!("No base_url configured in {shown}");
            }
            Ok(Some(config))
        }
        None => {
            let config = ProbeConfig::from_env().context("Failed to load configuration from environment")?;
            Ok(config.has_target().then_some(config))
        }
    }
}
