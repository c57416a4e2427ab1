//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the pipeline:
//! - Building the HTTP client with the browser-like identity
//! - GET requests returning the raw body bytes
//! - Classifying outcomes into a `FetchResult` instead of bubbling errors
//!
//! Redirects, pooling and TLS are left to reqwest's defaults.

use crate::config::{ClientConfig, CrawlerConfig};
use crate::HarvestError;
use reqwest::Client;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// The server answered with a 2xx status
    Success {
        /// HTTP status code
        status_code: u16,
        /// Response body
        body: Vec<u8>,
    },

    /// The server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Connection error, timeout, or failure while reading the body
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Converts into the body bytes, or the error describing the failure
    pub fn into_body(self, url: &str) -> Result<Vec<u8>, HarvestError> {
        match self {
            Self::Success { body, .. } => Ok(body),
            Self::HttpError { status_code } => Err(HarvestError::HttpStatus {
                url: url.to_string(),
                status: status_code,
            }),
            Self::NetworkError { error } => Err(HarvestError::Network {
                url: url.to_string(),
                message: error,
            }),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use unique_harvest::config::Config;
/// use unique_harvest::crawler::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.client, &config.crawler).unwrap();
/// ```
pub fn build_http_client(
    client: &ClientConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(client.user_agent.as_str())
        .timeout(Duration::from_secs(crawler.request_timeout))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// Never returns an error; every failure mode is a `FetchResult` variant so
/// batch drivers can log it and move on.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.bytes().await {
        Ok(body) => FetchResult::Success {
            status_code: status.as_u16(),
            body: body.to_vec(),
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}
