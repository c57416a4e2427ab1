//! Sequential, rate-limited archiving of category pages
//!
//! Pages are fetched one at a time with a fixed pause after each success.
//! Serial execution keeps "write body, then write ledger" free of races.

use crate::crawler::fetcher::fetch_url;
use crate::state::{LedgerStore, Namespace};
use crate::storage::ContentStore;
use crate::url::page_file_name;
use crate::HarvestError;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Outcome counts of one archiving pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveReport {
    pub archived: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Archives every category not yet marked done in the ledger
///
/// Failures are logged per URL and leave it eligible for the next run; they
/// never abort the batch.
pub async fn archive_pages(
    client: &Client,
    categories: &[Url],
    ledger: &mut LedgerStore,
    store: &ContentStore,
    delay: Duration,
) -> ArchiveReport {
    let mut report = ArchiveReport::default();

    tracing::info!("Checking {} category pages", categories.len());

    for url in categories {
        if ledger.is_done(Namespace::Pages, url.as_str()) {
            tracing::debug!("Already archived: {}", url);
            report.skipped += 1;
            continue;
        }

        match archive_page(client, url, ledger, store).await {
            Ok(path) => {
                tracing::info!("Archived {} -> {}", url, path.display());
                report.archived += 1;
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                tracing::warn!("Failed to archive {}: {}", url, e);
                report.failed += 1;
            }
        }
    }

    report
}

/// Fetches one page, writes it, then records it in the ledger
async fn archive_page(
    client: &Client,
    url: &Url,
    ledger: &mut LedgerStore,
    store: &ContentStore,
) -> Result<PathBuf, HarvestError> {
    let body = fetch_url(client, url.as_str()).await.into_body(url.as_str())?;
    let path = store.write_page(&page_file_name(url), &body).await?;
    ledger.mark_done_and_save(Namespace::Pages, url.as_str())?;
    Ok(path)
}
