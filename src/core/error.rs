// Centralized error handling for the cleanup run

use std::process::ExitStatus;
use thiserror::Error;

/// Errors raised while resolving the effective configuration
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing required arguments: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Errors raised by a console invocation
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Console command '{command}' exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Errors raised while parsing the `info --detailed` report
#[derive(Error, Debug, PartialEq)]
pub enum ReportError {
    #[error("Invalid share ratio '{value}' for torrent '{name}'")]
    InvalidShareRatio { name: String, value: String },
}

#[derive(Error, Debug)]
pub enum CleanupError {
    #[error("Failed to fetch torrent list: {0}")]
    Console(#[from] ConsoleError),

    #[error("Failed to parse torrent list: {0}")]
    Report(#[from] ReportError),
}
