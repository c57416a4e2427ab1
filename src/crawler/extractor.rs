//! Asset extraction over the archived markup
//!
//! Works only on pages already in the content store; it never touches the
//! network.

use crate::config::FilterConfig;
use crate::crawler::parser::{extract_asset_refs, AssetRef};
use crate::storage::ContentStore;
use std::collections::HashSet;
use url::Url;

/// References found across all archived pages
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Pages that were parsed
    pub pages_scanned: usize,

    /// References before deduplication
    pub references_found: usize,

    /// Distinct assets, first occurrence first
    pub assets: Vec<AssetRef>,
}

/// Scans every archived page and returns the globally deduplicated assets
///
/// Pages are read in file-name order, so "first occurrence" (and therefore
/// the label kept for a shared URL) is stable between runs. Unreadable pages
/// are logged and skipped.
pub async fn extract_assets(
    store: &ContentStore,
    base_url: &Url,
    filters: &FilterConfig,
) -> ExtractionReport {
    let mut report = ExtractionReport::default();

    let pages = match store.list_pages().await {
        Ok(pages) => pages,
        Err(e) => {
            tracing::error!(
                "Failed to list archived pages in {}: {}",
                store.html_dir().display(),
                e
            );
            return report;
        }
    };

    tracing::info!("Scanning {} archived pages for item images", pages.len());

    let mut found = Vec::new();
    for page in pages {
        let content = match tokio::fs::read(&page).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", page.display(), e);
                continue;
            }
        };

        let refs = extract_asset_refs(&String::from_utf8_lossy(&content), base_url, filters);
        tracing::debug!("{}: {} image references", page.display(), refs.len());
        report.pages_scanned += 1;
        found.extend(refs);
    }

    report.references_found = found.len();
    report.assets = dedup_assets(found);

    tracing::info!(
        "Found {} image references, {} unique",
        report.references_found,
        report.assets.len()
    );

    report
}

/// Keeps the first occurrence of each URL
pub fn dedup_assets(refs: Vec<AssetRef>) -> Vec<AssetRef> {
    let mut seen = HashSet::new();
    refs.into_iter()
        .filter(|asset| seen.insert(asset.url.as_str().to_string()))
        .collect()
}
