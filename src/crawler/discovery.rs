//! Category discovery from the seed listing

use crate::config::FilterConfig;
use crate::crawler::fetcher::{fetch_url, FetchResult};
use crate::crawler::parser::extract_category_links;
use reqwest::Client;
use url::Url;

/// Fetches the seed listing once and returns its category URLs
///
/// A failed fetch yields an empty list; it is logged, never returned as an
/// error, so the rest of the pipeline still runs on previously archived pages.
pub async fn discover_categories(client: &Client, seed: &Url, filters: &FilterConfig) -> Vec<Url> {
    tracing::info!("Collecting category links from {}", seed);

    let body = match fetch_url(client, seed.as_str()).await {
        FetchResult::Success { body, .. } => body,
        FetchResult::HttpError { status_code } => {
            tracing::error!("Seed listing {} returned HTTP {}", seed, status_code);
            return Vec::new();
        }
        FetchResult::NetworkError { error } => {
            tracing::error!("Failed to fetch seed listing {}: {}", seed, error);
            return Vec::new();
        }
    };

    let html = String::from_utf8_lossy(&body);
    let categories = extract_category_links(&html, seed, filters);
    tracing::info!("Found {} categories", categories.len());

    categories
}
