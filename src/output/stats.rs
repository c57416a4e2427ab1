//! Run and ledger statistics
//!
//! This module provides the counters collected during a pipeline run and
//! the summaries printed at the end of a run or by `--stats`.

use crate::crawler::{ArchiveReport, DownloadReport};
use crate::state::LedgerStatistics;
use chrono::{DateTime, Utc};

/// Counters for one pipeline run
#[derive(Debug, Clone)]
pub struct RunStatistics {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished, if it has
    pub finished_at: Option<DateTime<Utc>>,

    /// Category URLs returned by discovery
    pub categories_discovered: usize,

    /// Page archiving outcome
    pub pages: ArchiveReport,

    /// Archived pages parsed for images
    pub pages_scanned: usize,

    /// Image references before deduplication
    pub references_found: usize,

    /// Distinct image URLs handed to the downloader
    pub unique_assets: usize,

    /// Image download outcome
    pub images: DownloadReport,
}

impl RunStatistics {
    /// Creates empty statistics stamped with the current time
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            categories_discovered: 0,
            pages: ArchiveReport::default(),
            pages_scanned: 0,
            references_found: 0,
            unique_assets: 0,
            images: DownloadReport::default(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration of the run, in seconds
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Total fetches that failed and stay eligible for the next run
    pub fn total_failures(&self) -> usize {
        self.pages.failed + self.images.failed
    }
}

/// Prints run statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Categories:");
    println!("  Discovered: {}", stats.categories_discovered);
    println!("  Archived: {}", stats.pages.archived);
    println!("  Already done: {}", stats.pages.skipped);
    println!("  Failed: {}", stats.pages.failed);
    println!();

    println!("Images:");
    println!("  Pages scanned: {}", stats.pages_scanned);
    println!("  References found: {}", stats.references_found);
    println!("  Unique: {}", stats.unique_assets);
    println!("  Downloaded: {}", stats.images.downloaded);
    println!("  Already done: {}", stats.images.skipped);
    println!("  Failed: {}", stats.images.failed);
    println!();

    if let Some(seconds) = stats.duration_seconds() {
        println!("Duration: {}s", seconds);
    }

    if stats.total_failures() > 0 {
        println!(
            "{} items failed and will be retried on the next run",
            stats.total_failures()
        );
    }
}

/// Prints ledger counts to stdout
pub fn print_ledger_statistics(stats: &LedgerStatistics) {
    println!("=== Ledger ===\n");
    println!("  Pages done: {}", stats.pages_done);
    println!("  Images done: {}", stats.images_done);
}
