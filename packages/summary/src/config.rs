//! Configuration constants, the sidecar config file and input validation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{Result, SummaryError};

/// Base URL for the GitHub REST API.
pub const GITHUB_API_URL: &str = "https://api.github.com/";

/// Assumed request quota before the first response reports the real one.
pub const DEFAULT_RATE_LIMIT: u32 = 100;

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default location of the sidecar config file.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// File name (without extension) of the generated document.
pub const OUTPUT_FILE_STEM: &str = "generated";

/// GitHub login: alphanumerics and single inner hyphens, at most 39 characters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static USERNAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9]|-[A-Za-z0-9]){0,38}$").expect("valid regex")
});

/// Epoch timestamp: digits only.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static EPOCH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// Runtime configuration, read once at startup and passed to each component.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enable debug logging.
    pub debug: bool,

    /// Output path prefix; the document is written to `<path>generated`.
    pub path: String,

    /// GitHub API base URL (with trailing slash).
    pub api_url: String,

    /// Assumed request quota.
    pub rate_limit: u32,

    /// HTTP timeout in seconds.
    pub timeout_secs: u64,

    /// Directory that relative output paths resolve against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            path: String::new(),
            api_url: GITHUB_API_URL.to_string(),
            rate_limit: DEFAULT_RATE_LIMIT,
            timeout_secs: HTTP_TIMEOUT_SECS,
            base_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load the config file at `path`.
    ///
    /// A missing file yields the defaults; a file that exists but cannot be
    /// parsed is an error. Relative output paths resolve against the
    /// directory containing the file.
    pub fn load(path: &Path) -> Result<Self> {
        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        if !path.exists() {
            return Ok(Self {
                base_dir,
                ..Self::default()
            });
        }

        let raw = fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&raw).map_err(|e| SummaryError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.base_dir = base_dir;
        Ok(config)
    }

    /// Output path without extension.
    ///
    /// # Examples
    /// ```
    /// use github_summary::config::Config;
    /// use std::path::Path;
    ///
    /// let config = Config { path: "out/".to_string(), ..Config::default() };
    /// assert_eq!(config.output_stem(), Path::new("./out/generated"));
    /// ```
    pub fn output_stem(&self) -> PathBuf {
        let prefixed = PathBuf::from(format!("{}{OUTPUT_FILE_STEM}", self.path));
        if prefixed.is_absolute() {
            prefixed
        } else {
            self.base_dir.join(prefixed)
        }
    }

    /// Tracing filter directive matching the `debug` flag.
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

/// Validate a GitHub username.
///
/// # Examples
/// ```
/// use github_summary::config::validate_username;
///
/// assert!(validate_username("octocat").is_ok());
/// assert!(validate_username("-octocat").is_err());
/// ```
pub fn validate_username(username: &str) -> Result<()> {
    if username.len() <= 39 && USERNAME_PATTERN.is_match(username) {
        Ok(())
    } else {
        Err(SummaryError::InvalidUsername(username.to_string()))
    }
}

/// Whether `value` is a plain epoch timestamp (digits only).
pub fn is_epoch(value: &str) -> bool {
    EPOCH_PATTERN.is_match(value)
}

/// Build the URL of a user endpoint, e.g. `users/octocat/repos`.
pub fn user_url(api_url: &str, username: &str, resource: Option<&str>) -> String {
    match resource {
        Some(resource) => format!("{api_url}users/{username}/{resource}"),
        None => format!("{api_url}users/{username}"),
    }
}
