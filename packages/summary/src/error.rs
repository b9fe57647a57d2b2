//! Error types for the summary generator.
//!
//! Network trouble is not an error here: the API client degrades to "no
//! data" and logs instead. `SummaryError` covers the failures that should
//! stop a run, such as malformed API payloads or an unreadable config.

use thiserror::Error;

/// Main error type for the summary generator library.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Invalid GitHub username.
    #[error("Invalid GitHub username: '{0}'. Expected 1-39 alphanumeric characters or single hyphens")]
    InvalidUsername(String),

    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// API response did not match the expected record shape.
    #[error("Malformed response from {endpoint}: {source}")]
    Json {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Config file could not be read or parsed.
    #[error("Invalid config file {path}: {message}")]
    Config { path: String, message: String },

    /// Timestamp outside the range chrono can represent.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for summary operations.
pub type Result<T> = std::result::Result<T, SummaryError>;
