use std::io;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use victron_core::scan::{ScanOptions, scan_with_options};
use victron_core::AdvertisementKey;

mod cli;
mod format;

use cli::{Cli, Commands, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "victron", &mut io::stdout());
        return Ok(());
    }

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Scan {
            timeout,
            supported_only,
            format,
        } => {
            if !cli.quiet {
                tracing::info!("Scanning for Victron devices (timeout: {timeout}s)...");
            }
            let options = ScanOptions::new()
                .duration(Duration::from_secs(timeout))
                .supported_families_only(supported_only);
            let devices = scan_with_options(options)
                .await
                .context("scan failed")?;

            match format {
                OutputFormat::Text => print!("{}", format::render_text(&devices)),
                OutputFormat::Json => println!("{}", format::render_json(&devices)?),
            }
        }
        Commands::CheckKey {
            device,
            key,
            timeout,
        } => {
            if !cli.quiet {
                tracing::info!("Scanning for {device} (timeout: {timeout}s)...");
            }
            let devices = scan_with_options(
                ScanOptions::new().duration(Duration::from_secs(timeout)),
            )
            .await
            .context("scan failed")?;

            let Some(found) = devices.iter().find(|d| d.identifier == device) else {
                bail!("device {device} not seen during scan");
            };

            let key = AdvertisementKey::new(key);
            match key.matches(&found.payload) {
                Ok(true) => println!("Key matches {device}."),
                Ok(false) => {
                    bail!("key does not match {device} (first-byte check failed)")
                }
                Err(e) => bail!("unable to check key for {device}: {e}"),
            }
        }
        Commands::Completions { .. } => {
            // Already handled above
            unreachable!()
        }
    }

    Ok(())
}
