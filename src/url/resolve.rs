use url::Url;

/// Resolves an href or src attribute to an absolute URL without fragment
///
/// Returns None if the link should be excluded:
/// - empty or fragment-only values
/// - javascript:, mailto:, tel: and data: schemes
/// - values that fail to resolve
/// - non-HTTP(S) URLs after resolution
///
/// # Examples
///
/// ```
/// use unique_harvest::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://poedb.tw/us/Unique_item").unwrap();
/// let url = resolve_link("/us/Unique_Rings#top", &base).unwrap();
/// assert_eq!(url.as_str(), "https://poedb.tw/us/Unique_Rings");
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let mut absolute = base_url.join(href).ok()?;
    if absolute.scheme() != "http" && absolute.scheme() != "https" {
        return None;
    }

    absolute.set_fragment(None);
    Some(absolute)
}

/// Returns true if `haystack` contains at least one of `needles`
pub fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}
