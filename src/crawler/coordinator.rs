//! Pipeline coordinator - sequences the four stages of a run
//!
//! This module owns the ledger's load/save lifecycle and runs:
//! 1. Category discovery from the seed listing
//! 2. Sequential archiving of every category page
//! 3. Extraction of item images from all archived pages
//! 4. Bounded-parallel download of the deduplicated images
//!
//! Each stage reads only the durable output of the previous one (files and
//! ledger), which is what makes an interrupted run resumable.

use crate::config::Config;
use crate::crawler::archiver::archive_pages;
use crate::crawler::build_http_client;
use crate::crawler::discovery::discover_categories;
use crate::crawler::downloader::download_assets;
use crate::crawler::extractor::extract_assets;
use crate::output::RunStatistics;
use crate::state::LedgerStore;
use crate::storage::ContentStore;
use crate::HarvestError;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Main pipeline coordinator structure
pub struct Coordinator {
    config: Config,
    seed: Url,
    client: Client,
    ledger: LedgerStore,
    store: ContentStore,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Builds the HTTP client, creates the content store directories and
    /// loads the ledger. These are the only steps that can fail a run.
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let seed = Url::parse(&config.crawler.seed_url)?;
        let client = build_http_client(&config.client, &config.crawler)?;

        let store = ContentStore::from_config(&config.output);
        store.ensure_dirs()?;

        let ledger = LedgerStore::load(Path::new(&config.output.state_file));

        Ok(Self {
            config,
            seed,
            client,
            ledger,
            store,
        })
    }

    /// Read-only access to the ledger, mostly for inspection after a run
    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    /// Runs every stage once
    ///
    /// Per-item failures are absorbed by the stages and show up only in the
    /// returned statistics.
    pub async fn run(&mut self) -> RunStatistics {
        let mut stats = RunStatistics::start();

        let categories =
            discover_categories(&self.client, &self.seed, &self.config.filters).await;
        stats.categories_discovered = categories.len();

        let delay = Duration::from_millis(self.config.crawler.request_delay);
        stats.pages = archive_pages(
            &self.client,
            &categories,
            &mut self.ledger,
            &self.store,
            delay,
        )
        .await;

        let extraction = extract_assets(&self.store, &self.seed, &self.config.filters).await;
        stats.pages_scanned = extraction.pages_scanned;
        stats.references_found = extraction.references_found;
        stats.unique_assets = extraction.assets.len();

        if extraction.assets.is_empty() {
            tracing::info!("No item images found in archived pages");
        } else {
            stats.images = download_assets(
                &self.client,
                &extraction.assets,
                &mut self.ledger,
                &self.store,
                self.config.crawler.max_concurrent_downloads as usize,
            )
            .await;
        }

        stats.finish();
        stats
    }
}

/// Runs the whole pipeline once with the given configuration
///
/// # Example
///
/// ```no_run
/// use unique_harvest::config::Config;
/// use unique_harvest::crawler::run_pipeline;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = run_pipeline(Config::default()).await?;
/// println!("{} images downloaded", stats.images.downloaded);
/// # Ok(())
/// # }
/// ```
pub async fn run_pipeline(config: Config) -> Result<RunStatistics, HarvestError> {
    let mut coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}
