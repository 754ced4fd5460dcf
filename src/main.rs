//! gpu-harvest main entry point
//!
//! This is the command-line interface for the GPU listing harvester.

use anyhow::Context;
use clap::Parser;
use gpu_harvest::config::{load_config_with_hash, Config};
use gpu_harvest::output::print_results;
use gpu_harvest::session::HttpSessionFactory;
use gpu_harvest::{build_frontier, harvest, ProductId};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// gpu-harvest: compare GPU prices across Canadian retailers
///
/// Searches PC-Canada, Memory Express and Newegg for one GPU model number,
/// walks every results page, and lists the cheapest matching cards.
#[derive(Parser, Debug)]
#[command(name = "gpu-harvest")]
#[command(version)]
#[command(about = "Compare GPU prices across retailers", long_about = None)]
struct Cli {
    /// GPU model number to search for, digits only (e.g. 3060)
    #[arg(value_name = "MODEL")]
    product_id: String,

    /// Include refurbished and open-box cards (Newegg only)
    #[arg(short = 'u', long)]
    include_used: bool,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the searches that would run without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let product_id = ProductId::new(&cli.product_id)?;
    let config = load_settings(cli.config.as_deref())?;

    if cli.dry_run {
        handle_dry_run(&config, &product_id, cli.include_used);
        return Ok(());
    }

    let factory = HttpSessionFactory::new(&config.session).context("building HTTP client")?;

    tracing::info!(
        "Searching for GPU {} (used cards {})",
        product_id,
        if cli.include_used { "included" } else { "excluded" }
    );
    let results = harvest(&config, Arc::new(factory), &product_id, cli.include_used).await;
    tracing::info!(
        "Harvest finished: {} listings, {} in stock",
        results.all.len(),
        results.in_stock.len()
    );

    print_results(&results);
    Ok(())
}

/// Loads the configuration file if one was given, else the defaults
fn load_settings(path: Option<&Path>) -> gpu_harvest::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("gpu_harvest=info,warn"),
            1 => EnvFilter::new("gpu_harvest=debug,info"),
            2 => EnvFilter::new("gpu_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the frontier and effective settings
fn handle_dry_run(config: &Config, product_id: &ProductId, include_used: bool) {
    println!("=== gpu-harvest Dry Run ===\n");

    println!("Harvester Configuration:");
    println!("  Launch stagger: {}ms", config.harvester.launch_stagger_ms);
    println!("  Page settle: {}ms", config.harvester.page_settle_ms);
    println!("  Max pages per site: {}", config.harvester.max_pages);
    println!("  Parse workers: {}", config.harvester.parse_workers);
    println!("  Result timeout: {}s", config.harvester.result_timeout_secs);
    println!("  Listings shown: {}", config.harvester.top_n);

    println!("\nSession:");
    println!("  Request timeout: {}s", config.session.request_timeout_secs);
    println!("  User agent: {}", config.session.user_agent);

    let frontier = build_frontier(product_id, include_used);
    println!("\nSearches ({}):", frontier.len());
    for target in &frontier {
        println!("  - {}: {}", target.site, target.url);
    }
}
