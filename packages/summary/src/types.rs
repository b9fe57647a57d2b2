//! Core data types for the summary generator.
//!
//! These are immutable snapshots of what the GitHub API reported at fetch
//! time. The API client maps its wire records onto them; the document
//! builder only ever reads them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// Public profile of a GitHub user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    /// Login handle (e.g., "octocat").
    pub login: String,

    /// Profile page URL.
    pub url: String,

    /// Display name, if the user set one.
    pub name: Option<String>,

    pub followers: u64,
    pub following: u64,

    /// Account creation time.
    pub created: DateTime<Utc>,

    /// Number of public repositories.
    pub repos: u64,
}

impl UserInfo {
    /// Display name, falling back to the login.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}

/// Bytes of code written in one language within a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub name: String,
    pub bytes: u64,
}

impl Language {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: u64) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// A public repository owned by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,

    /// Repository page URL.
    pub url: String,

    pub description: Option<String>,

    /// Whether the repository is a fork.
    pub forked: bool,

    /// Languages ordered by descending byte count.
    pub languages: Vec<Language>,

    /// Size in KB as reported by the API.
    pub size: u64,

    /// SPDX identifier of the license (optional).
    pub license: Option<String>,

    pub forks: u64,
    pub stars: u64,
    pub watchers: u64,

    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Repository {
    /// The most used language, if any.
    #[must_use]
    pub fn top_language(&self) -> Option<&Language> {
        self.languages.first()
    }

    /// Languages after the most used one, in order.
    #[must_use]
    pub fn other_languages(&self) -> &[Language] {
        self.languages.get(1..).unwrap_or_default()
    }

    /// Size in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        self.size.saturating_mul(1024)
    }
}

/// Metadata of one file inside a gist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GistFile {
    pub language: Option<String>,
    pub size: u64,
}

/// A public gist owned by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gist {
    pub id: String,

    /// Gist page URL.
    pub url: String,

    pub description: Option<String>,

    /// Files keyed by file name.
    pub files: BTreeMap<String, GistFile>,

    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Records that carry a last-update timestamp and can be filtered by time range.
pub trait Updated {
    fn updated(&self) -> DateTime<Utc>;
}

impl Updated for Repository {
    fn updated(&self) -> DateTime<Utc> {
        self.updated
    }
}

impl Updated for Gist {
    fn updated(&self) -> DateTime<Utc> {
        self.updated
    }
}
