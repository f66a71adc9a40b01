use crate::core::config::{ConfigOverrides, DEFAULT_CONFIG_PATH};
use crate::core::tracing_init::LogFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Verbosity used when running in test mode
pub const TEST_MODE_VERBOSITY: u8 = 2;

/// Output format for the end-of-run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Manage Deluge torrents based on criteria.
#[derive(Debug, Parser)]
#[command(name = "deluge-cleanup", version, about = "Remove Deluge torrents that reached their seed ratio")]
pub struct Cli {
    /// Configuration snapshot to read and update
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Deluge daemon host
    #[arg(long)]
    pub host: Option<String>,

    /// Deluge daemon port
    #[arg(long)]
    pub port: Option<u16>,

    /// Deluge daemon username
    #[arg(long)]
    pub user: Option<String>,

    /// Deluge daemon password
    #[arg(long)]
    pub password: Option<String>,

    /// Ratio limit to stop and remove torrents
    #[arg(long, alias = "ratio_limit")]
    pub ratio_limit: Option<f64>,

    /// Docker container running deluge-console, leave unset to run on the host
    #[arg(long)]
    pub container: Option<String>,

    /// Trackers whose torrents are never removed
    #[arg(long, alias = "allowed_trackers", num_args = 0..)]
    pub allowed_trackers: Option<Vec<String>>,

    /// Run in test mode without making any changes
    #[arg(long)]
    pub test: bool,

    /// Verbosity level: 1 for minimal output, 2 for detailed, 3 for debug
    #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
    pub verbose: u8,

    /// Log line format
    #[arg(long, default_value = "console", value_enum)]
    pub log_format: LogFormat,

    /// Summary format
    #[arg(long, default_value = "text", value_enum)]
    pub output: OutputFormat,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            ratio_limit: self.ratio_limit,
            container: self.container.clone(),
            allowed_trackers: self.allowed_trackers.clone(),
        }
    }

    /// Test mode always narrates at least the per-torrent decisions
    pub fn effective_verbosity(&self) -> u8 {
        if self.test {
            self.verbose.max(TEST_MODE_VERBOSITY)
        } else {
            self.verbose
        }
    }
}
