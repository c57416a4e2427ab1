//! HTML parser for category links and item image references
//!
//! This module handles parsing markup to extract:
//! - Candidate category links from the seed listing
//! - Item image references (source URL plus label) from archived pages
//!
//! Parsing is best-effort: elements without the attributes we need are
//! skipped, never reported as errors.

use crate::config::FilterConfig;
use crate::url::{contains_any, resolve_link};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Image attributes checked in order; the first non-empty one wins
const IMAGE_SOURCE_ATTRIBUTES: [&str; 3] = ["data-src", "src", "data-lazy-src"];

/// An item image referenced by an archived page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    /// Absolute image URL
    pub url: Url,

    /// Text describing the image (alt, then title), possibly empty
    pub label: String,
}

/// Extracts category links from the seed listing
///
/// # Link Extraction Rules
///
/// - Only `<a href>` inside the first `<main>` element are considered, or the
///   whole document if it has none
/// - Links are resolved against the seed and their fragment is stripped
/// - Paths containing any `category_exclude` substring are dropped
/// - If `category_include` is non-empty, the path must contain one of them
/// - Only URLs strictly longer than the seed URL are kept
///
/// # Returns
///
/// The distinct category URLs, sorted
///
/// # Example
///
/// ```
/// use unique_harvest::config::FilterConfig;
/// use unique_harvest::crawler::extract_category_links;
/// use url::Url;
///
/// let html = r#"<main><a href="/us/Unique_Rings">Rings</a><a href="/us/Login">Login</a></main>"#;
/// let seed = Url::parse("https://poedb.tw/us/Unique_item").unwrap();
/// let links = extract_category_links(html, &seed, &FilterConfig::default());
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "https://poedb.tw/us/Unique_Rings");
/// ```
pub fn extract_category_links(html: &str, seed: &Url, filters: &FilterConfig) -> Vec<Url> {
    let document = Html::parse_document(html);
    let seed_len = seed.as_str().len();

    let mut links = BTreeSet::new();
    for href in main_region_hrefs(&document) {
        let Some(url) = resolve_link(href, seed) else {
            continue;
        };

        let path = url.path();
        if contains_any(path, &filters.category_exclude) {
            continue;
        }
        if !filters.category_include.is_empty() && !contains_any(path, &filters.category_include) {
            continue;
        }

        links.insert(url);
    }

    links
        .into_iter()
        .filter(|url| url.as_str().len() > seed_len)
        .collect()
}

/// Collects raw href values from the main content region
fn main_region_hrefs(document: &Html) -> Vec<&str> {
    let (Ok(main_selector), Ok(a_selector)) = (Selector::parse("main"), Selector::parse("a[href]"))
    else {
        return Vec::new();
    };

    match document.select(&main_selector).next() {
        Some(main) => main.select(&a_selector).filter_map(href_of).collect(),
        None => document.select(&a_selector).filter_map(href_of).collect(),
    }
}

fn href_of(element: ElementRef<'_>) -> Option<&str> {
    element.value().attr("href")
}

/// Extracts item image references from an archived page
///
/// For each `<img>`, the candidate source is the first non-empty of
/// `data-src`, `src` and `data-lazy-src`. The lower-cased candidate must
/// contain one `image_include` substring and no `image_exclude` substring.
/// Survivors are resolved against `base_url`. Order follows the document;
/// duplicates are kept for the caller to resolve across pages.
pub fn extract_asset_refs(html: &str, base_url: &Url, filters: &FilterConfig) -> Vec<AssetRef> {
    let document = Html::parse_document(html);
    let Ok(img_selector) = Selector::parse("img") else {
        return Vec::new();
    };

    let include = lowercase_all(&filters.image_include);
    let exclude = lowercase_all(&filters.image_exclude);

    let mut refs = Vec::new();
    for element in document.select(&img_selector) {
        let Some(candidate) = first_attr(element, &IMAGE_SOURCE_ATTRIBUTES) else {
            continue;
        };

        let lowered = candidate.to_lowercase();
        if !contains_any(&lowered, &include) || contains_any(&lowered, &exclude) {
            tracing::trace!("Filtered image source {}", candidate);
            continue;
        }

        let Some(url) = resolve_link(candidate, base_url) else {
            continue;
        };

        let label = first_attr(element, &["alt", "title"]).unwrap_or_default();
        refs.push(AssetRef {
            url,
            label: label.to_string(),
        });
    }

    refs
}

fn first_attr<'a>(element: ElementRef<'a>, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .filter_map(|name| element.value().attr(name))
        .find(|value| !value.is_empty())
}

fn lowercase_all(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}
