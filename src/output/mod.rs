//! Output module for run summaries
//!
//! This module handles:
//! - Collecting per-stage counters during a run
//! - Printing run and ledger summaries

pub mod stats;

pub use stats::{print_ledger_statistics, print_statistics, RunStatistics};
