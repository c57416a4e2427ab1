//! Unique-Harvest main entry point
//!
//! This is the command-line interface for the Unique-Harvest pipeline.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use unique_harvest::config::{load_config_with_hash, Config};
use unique_harvest::crawler::run_pipeline;
use unique_harvest::output::{print_ledger_statistics, print_statistics};
use unique_harvest::state::LedgerStore;

/// Unique-Harvest: a resumable category archiver and image downloader
///
/// Discovers category pages from the seed listing, archives their markup,
/// then downloads every item image they reference. Progress is kept in a
/// ledger so an interrupted run picks up where it stopped.
#[derive(Parser, Debug)]
#[command(name = "unique-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A resumable category archiver and image downloader", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults if omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show ledger statistics and exit
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if cli.stats {
        let ledger = LedgerStore::load(Path::new(&config.output.state_file));
        println!("Ledger: {}\n", config.output.state_file);
        print_ledger_statistics(&ledger.statistics());
        return Ok(());
    }

    handle_run(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("unique_harvest=info,warn"),
            1 => EnvFilter::new("unique_harvest=debug,info"),
            2 => EnvFilter::new("unique_harvest=trace,debug"),
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

/// Handles the main pipeline run
async fn handle_run(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Seed: {}, delay: {}ms, download slots: {}",
        config.crawler.seed_url,
        config.crawler.request_delay,
        config.crawler.max_concurrent_downloads
    );

    let stats = run_pipeline(config)
        .await
        .context("pipeline setup failed")?;

    tracing::info!("Harvest finished");
    print_statistics(&stats);

    Ok(())
}
