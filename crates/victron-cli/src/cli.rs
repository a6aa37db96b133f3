//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

/// CLI for Victron BLE telemetry.
#[derive(Parser)]
#[command(name = "victron")]
#[command(author, version, about = "CLI for Victron BLE devices", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan for nearby Victron devices broadcasting instant-readout data
    Scan {
        /// Scan timeout in seconds
        #[arg(short, long, default_value = "10")]
        timeout: u64,

        /// Only list devices of supported families
        #[arg(long)]
        supported_only: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check whether an advertisement key is plausible for a device
    ///
    /// Runs the same first-byte envelope comparison the gate uses, so a
    /// misconfigured key can be diagnosed without decrypting anything.
    CheckKey {
        /// Device identifier (MAC address, or peripheral UUID on macOS)
        #[arg(short, long)]
        device: String,

        /// Hex-encoded advertisement key
        #[arg(short, long, env = "VICTRON_KEY")]
        key: String,

        /// Scan timeout in seconds
        #[arg(short, long, default_value = "10")]
        timeout: u64,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
