//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// popmap - status and geolocation map of a network's PoPs
///
/// Fetches the component list from a status page and the location list
/// from a speed test service, joins them on PoP code, and prints the
/// merged map as a table or JSON.
///
/// Examples:
///   popmap
///   popmap --format json
///   popmap --format json --output locations.json
///   popmap --status-url https://status.internal/api/v2/summary.json
///   popmap --fail-degraded --quiet
///   popmap --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Status page summary endpoint
    ///
    /// Can also be set via POPMAP_STATUS_URL env var or .popmap.toml config.
    #[arg(long, value_name = "URL", env = "POPMAP_STATUS_URL")]
    pub status_url: Option<String>,

    /// Speed test locations endpoint
    ///
    /// Can also be set via POPMAP_SPEED_URL env var or .popmap.toml config.
    #[arg(long, value_name = "URL", env = "POPMAP_SPEED_URL")]
    pub speed_url: Option<String>,

    /// Request timeout in seconds
    ///
    /// Applied to each feed fetch. Default: from config or 30s.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format (table, json)
    #[arg(long, default_value = "table", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Write the output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .popmap.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Fail when any PoP reports a non-operational status
    ///
    /// Useful for CI pipelines. Exit code 2 when a degraded PoP is found.
    #[arg(long)]
    pub fail_degraded: bool,

    /// Generate a default .popmap.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the merged map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown table (default)
    #[default]
    Table,
    /// JSON array
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Validate endpoint URL formats
        if let Some(ref url) = self.status_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("Status URL must start with 'http://' or 'https://'".to_string());
            }
        }
        if let Some(ref url) = self.speed_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("Speed URL must start with 'http://' or 'https://'".to_string());
            }
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
