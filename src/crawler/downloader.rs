//! Bounded-parallel asset downloads
//!
//! Each pending asset runs as its own task, gated by a semaphore with a fixed
//! number of permits. Completions are drained on the calling task, which is
//! the only writer of the ledger.

use crate::crawler::fetcher::fetch_url;
use crate::crawler::parser::AssetRef;
use crate::state::{LedgerStore, Namespace};
use crate::storage::ContentStore;
use crate::url::image_file_name;
use crate::HarvestError;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Outcome counts of one download pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Downloads every asset not yet marked done, at most `max_concurrent` at once
///
/// A failing download never cancels or fails its siblings. The ledger is
/// saved after each success and once more when every task has finished.
pub async fn download_assets(
    client: &Client,
    assets: &[AssetRef],
    ledger: &mut LedgerStore,
    store: &ContentStore,
    max_concurrent: usize,
) -> DownloadReport {
    let mut report = DownloadReport::default();
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut tasks = JoinSet::new();

    for asset in assets {
        if ledger.is_done(Namespace::Images, asset.url.as_str()) {
            report.skipped += 1;
            continue;
        }

        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        let store = store.clone();
        let asset = asset.clone();

        tasks.spawn(async move {
            let result = match semaphore.acquire_owned().await {
                Ok(_permit) => download_asset(&client, &asset, &store).await,
                Err(e) => Err(HarvestError::Task(e.to_string())),
            };
            (asset, result)
        });
    }

    tracing::info!(
        "Downloading {} images ({} already done, {} slots)",
        tasks.len(),
        report.skipped,
        max_concurrent
    );

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((asset, Ok(path))) => {
                report.downloaded += 1;
                tracing::debug!("Saved {} -> {}", asset.url, path.display());
                if let Err(e) = ledger.mark_done_and_save(Namespace::Images, asset.url.as_str()) {
                    tracing::error!("Failed to persist ledger after {}: {}", asset.url, e);
                }
            }
            Ok((asset, Err(e))) => {
                report.failed += 1;
                tracing::warn!("Failed to download {}: {}", asset.url, e);
            }
            Err(e) => {
                report.failed += 1;
                tracing::error!("Download task panicked: {}", e);
            }
        }
    }

    if let Err(e) = ledger.save() {
        tracing::error!("Failed to persist ledger: {}", e);
    }

    tracing::info!(
        "Images: {} downloaded, {} skipped, {} failed",
        report.downloaded,
        report.skipped,
        report.failed
    );

    report
}

/// Fetches one asset and writes it under its derived name
async fn download_asset(
    client: &Client,
    asset: &AssetRef,
    store: &ContentStore,
) -> Result<PathBuf, HarvestError> {
    let body = fetch_url(client, asset.url.as_str())
        .await
        .into_body(asset.url.as_str())?;
    let file_name = image_file_name(&asset.url, &asset.label);
    store.write_image(&file_name, &body).await
}
