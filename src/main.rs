//! popmap - PoP status and geolocation aggregator
//!
//! A CLI tool that merges a status page's component list with a speed
//! test service's location list into one map of points-of-presence.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (fetch, decode, config failure, etc.)
//!   2 - Degraded PoPs found with --fail-degraded set

mod aggregate;
mod cli;
mod config;
mod error;
mod extract;
mod feeds;
mod models;
mod report;

use aggregate::{AggregatorConfig, LocationAggregator};
use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("popmap v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the aggregation
    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Aggregation failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .popmap.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".popmap.toml");

    if path.exists() {
        eprintln!("⚠️  .popmap.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .popmap.toml")?;

    println!("✅ Created .popmap.toml with default settings.");
    println!("   Edit it to point at different status or speed endpoints.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr; stdout is reserved for the rendering.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete aggregation workflow. Returns exit code (0 or 2).
async fn run(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    info!("Status feed: {}", config.endpoints.status_url);
    info!("Speed feed: {}", config.endpoints.speed_url);

    let aggregator = LocationAggregator::new(AggregatorConfig {
        status_url: config.endpoints.status_url.clone(),
        speed_url: config.endpoints.speed_url.clone(),
        timeout: Duration::from_secs(config.http.timeout_seconds),
    });

    // Fetch both feeds behind a spinner. It draws on stderr, so piped
    // stdout stays clean.
    let spinner = make_spinner(&args);
    let result = aggregator.fetch_locations().await;
    if let Some(ref spinner) = spinner {
        spinner.finish_and_clear();
    }
    let locations = result?;

    let matched = locations.iter().filter(|l| l.is_matched()).count();
    let degraded = locations.iter().filter(|l| !l.is_operational()).count();
    info!(
        "Merged {} PoPs: {} with speed metadata, {} degraded",
        locations.len(),
        matched,
        degraded
    );

    // Render in the requested format
    let rendering = match args.format {
        OutputFormat::Json => report::render_json(&locations)?,
        OutputFormat::Table => report::render_table(&locations),
    };

    match args.output {
        Some(ref path) => {
            report::write_output(path, &rendering)?;
            println!(
                "📊 {} PoPs ({} with speed metadata, {} degraded)",
                locations.len(),
                matched,
                degraded
            );
            println!("✅ Saved to: {}", path.display());
        }
        None => {
            print!("{}", rendering);
        }
    }

    // Check --fail-degraded
    if args.fail_degraded && degraded > 0 {
        eprintln!(
            "\n⛔ {} PoPs report a non-operational status. Failing (exit code 2).",
            degraded
        );
        return Ok(2);
    }

    Ok(0)
}

/// Build the fetch spinner, unless running quiet.
fn make_spinner(args: &Args) -> Option<ProgressBar> {
    if args.quiet {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message("Fetching status and speed feeds...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    Some(spinner)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .popmap.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
