//! Deterministic file names for the content store
//!
//! Re-runs must land on the same names for the same inputs, so nothing here
//! depends on process state.

use sha2::{Digest, Sha256};
use url::Url;

/// Extension used when an image URL's path has none
pub const DEFAULT_EXTENSION: &str = ".webp";

/// Stem used when neither the label nor the URL yields one
pub const FALLBACK_STEM: &str = "item";

const SUFFIX_LEN: usize = 6;

/// Derives the archive file name for a category page
///
/// Uses the last non-empty path segment, so `/us/Unique_Rings/` becomes
/// `Unique_Rings.html`. Distinct URLs can collide; the last write wins.
///
/// # Examples
///
/// ```
/// use unique_harvest::url::page_file_name;
/// use url::Url;
///
/// let url = Url::parse("https://poedb.tw/us/Unique_Rings/").unwrap();
/// assert_eq!(page_file_name(&url), "Unique_Rings.html");
/// ```
pub fn page_file_name(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or("index");
    format!("{}.html", segment)
}

/// Keeps alphanumerics, spaces, hyphens and underscores, then trims
pub fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Short deterministic suffix distinguishing URLs that share a label
///
/// The last six hex characters of the URL's SHA-256 digest.
pub fn url_suffix(url: &str) -> String {
    let digest = hex::encode(Sha256::digest(url.as_bytes()));
    digest[digest.len() - SUFFIX_LEN..].to_string()
}

/// Derives the file name for a downloaded image
///
/// Format: `<stem>_<suffix><ext>` where the stem comes from the label, then
/// the URL basename, then [`FALLBACK_STEM`].
///
/// # Examples
///
/// ```
/// use unique_harvest::url::{image_file_name, url_suffix};
/// use url::Url;
///
/// let url = Url::parse("https://cdn.example.com/x/item1.webp?v=2").unwrap();
/// let name = image_file_name(&url, "Kaom's Heart");
/// assert_eq!(name, format!("Kaoms Heart_{}.webp", url_suffix(url.as_str())));
/// ```
pub fn image_file_name(url: &Url, label: &str) -> String {
    let basename = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");

    let mut stem = sanitize_label(label);
    if stem.is_empty() {
        stem = sanitize_label(basename.split('.').next().unwrap_or(""));
    }
    if stem.is_empty() {
        stem = FALLBACK_STEM.to_string();
    }

    format!(
        "{}_{}{}",
        stem,
        url_suffix(url.as_str()),
        extension(basename)
    )
}

/// Extension of a path basename including the dot, or the default
fn extension(basename: &str) -> String {
    let ext = match basename.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < basename.len() => &basename[idx..],
        _ => return DEFAULT_EXTENSION.to_string(),
    };
    ext.split('?').next().unwrap_or(ext).to_string()
}
