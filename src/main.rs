//! Risalah-Harvester main entry point
//!
//! This is the command-line interface for the Risalah-Harvester article
//! archiver.

use anyhow::Result;
use clap::Parser;
use risalah_harvester::config::load_config_with_hash;
use risalah_harvester::crawler::harvest;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Risalah-Harvester: a rate-limited article archiver
///
/// Risalah-Harvester walks a numeric identifier range on a news site,
/// fetches each article page under a global request-rate ceiling, and
/// archives the extracted fields to a file tree and a SQLite database.
#[derive(Parser, Debug)]
#[command(name = "risalah-harvester")]
#[command(version = "1.0.0")]
#[command(about = "A rate-limited article archiver", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without fetching
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_harvest(config, config_hash).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("risalah_harvester=info,warn"),
            1 => EnvFilter::new("risalah_harvester=debug,info"),
            2 => EnvFilter::new("risalah_harvester=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &risalah_harvester::config::Config) {
    println!("=== Risalah-Harvester Dry Run ===\n");

    println!("Harvest Configuration:");
    println!(
        "  Identifier range: {}..={} ({} articles)",
        config.harvest.start_id,
        config.harvest.end_id,
        config.harvest.range_len()
    );
    println!("  Workers: {}", config.harvest.workers);
    println!(
        "  Requests per second: {}",
        config.harvest.requests_per_second
    );
    println!(
        "  Courtesy delay: {}ms - {}ms",
        config.harvest.jitter_min_ms, config.harvest.jitter_max_ms
    );

    println!("\nRetry Policy:");
    println!("  Max attempts: {}", config.retry.max_attempts);
    println!(
        "  Backoff: {}ms base, {}ms cap",
        config.retry.base_delay_ms, config.retry.max_delay_ms
    );

    println!("\nSource:");
    println!("  Base URL: {}", config.source.base_url);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Articles: {}", config.output.articles_dir);
    println!("  Database: {}", config.output.database_path);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would harvest {} identifiers with {} workers",
        config.harvest.range_len(),
        config.harvest.workers
    );
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &risalah_harvester::config::Config) -> Result<()> {
    use risalah_harvester::output::{load_statistics, print_statistics};
    use std::path::Path;

    println!("Database: {}\n", config.output.database_path);

    let stats = load_statistics(Path::new(&config.output.database_path))?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(
    config: risalah_harvester::config::Config,
    config_hash: String,
) -> Result<()> {
    tracing::info!(
        "Harvesting identifiers {}..={} with {} workers",
        config.harvest.start_id,
        config.harvest.end_id,
        config.harvest.workers
    );

    match harvest(config, config_hash).await {
        Ok(summary) => {
            println!("Harvest complete:");
            println!("  Done:    {}", summary.done);
            println!(
                "  Skipped: {} ({} not found, {} no content)",
                summary.skipped(),
                summary.skipped_not_found,
                summary.skipped_no_content
            );
            println!("  Failed:  {}", summary.failed);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
