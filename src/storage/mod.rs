//! Storage module for persisting crawl artifacts
//!
//! This module handles the content store, the two directories that receive
//! archived category markup and downloaded item images. Completion is never
//! inferred from what is on disk; that is the ledger's job.

mod content;

pub use content::ContentStore;
