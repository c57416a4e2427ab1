//! Configuration module for Unique-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; anything left out falls back to the defaults tuned
//! for the poedb unique item listing.
//!
//! # Example
//!
//! ```no_run
//! use unique_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Seed listing: {}", config.crawler.seed_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ClientConfig, Config, CrawlerConfig, FilterConfig, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
