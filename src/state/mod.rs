//! State module for tracking crawl progress
//!
//! This module provides the durable progress ledger shared by every pipeline
//! stage.
//!
//! # Components
//!
//! - `Ledger`: the serialized record of completed page and image URLs
//! - `LedgerStore`: owns the ledger file and funnels every mutation through
//!   `mark_done` / `save`
//! - `ItemStatus` / `Namespace`: status values and the two URL mappings

mod ledger;

pub use ledger::{ItemStatus, Ledger, LedgerStatistics, LedgerStore, Namespace};
