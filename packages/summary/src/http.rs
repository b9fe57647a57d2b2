//! HTTP client wrapper for talking to the GitHub REST API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use crate::config::Config;
use crate::error::Result;

/// User agent string identifying this generator. GitHub rejects requests without one.
const USER_AGENT: &str = concat!("github-summary/", env!("CARGO_PKG_VERSION"));

/// Media type recommended by the GitHub REST API.
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Header carrying the number of requests left in the current window.
pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Header carrying the epoch second at which the window resets.
pub const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` with the configured timeout, user agent
/// and GitHub accept header.
pub fn create_client(config: &Config) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// Read a numeric header, ignoring absent or malformed values.
pub fn numeric_header<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
