//! URL handling module for Unique-Harvest
//!
//! This module resolves links found in markup against the seed listing and
//! derives the deterministic file names used by the content store.

mod naming;
mod resolve;

// Re-export main functions
pub use naming::{
    image_file_name, page_file_name, sanitize_label, url_suffix, DEFAULT_EXTENSION, FALLBACK_STEM,
};
pub use resolve::{contains_any, resolve_link};
