//! Crawler module for fetching, archiving and downloading
//!
//! This module contains the pipeline stages, including:
//! - HTTP fetching with outcome classification
//! - HTML parsing for category links and item images
//! - Sequential page archiving and bounded-parallel downloads
//! - Overall run coordination

mod archiver;
mod coordinator;
mod discovery;
mod downloader;
mod extractor;
mod fetcher;
mod parser;

pub use archiver::{archive_pages, ArchiveReport};
pub use coordinator::{run_pipeline, Coordinator};
pub use discovery::discover_categories;
pub use downloader::{download_assets, DownloadReport};
pub use extractor::{dedup_assets, extract_assets, ExtractionReport};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use parser::{extract_asset_refs, extract_category_links, AssetRef};
