//! GitHub summary generator - Render a GitHub profile's projects into a LaTeX report.
//!
//! This crate fetches a user's public profile, repositories and gists from
//! the GitHub REST API and turns them into a LaTeX document with statistics,
//! a timeline and a language distribution, optionally compiled to PDF.
//!
//! # Example
//!
//! ```
//! use github_summary::config;
//! use github_summary::format::get_size;
//!
//! assert!(config::validate_username("octocat").is_ok());
//! assert_eq!(get_size(2048), "2.00KB");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants, config file and validation
//! - [`types`]: Core data types (UserInfo, Repository, Gist, etc.)
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client construction and header helpers
//! - [`api`]: GitHub API client with rate-limit tracking
//! - [`format`]: Human-readable sizes and counts
//! - [`timerange`]: Reporting window resolution and filtering
//! - [`latex`]: LaTeX document tree, escaping and charts
//! - [`snippets`]: Narrative text blocks
//! - [`builder`]: Report structure
//! - [`render`]: Writing and compiling the document
//! - [`sample`]: Built-in sample records
//! - [`cli`]: Command-line interface

pub mod api;
pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod latex;
pub mod render;
pub mod sample;
pub mod snippets;
pub mod timerange;
pub mod types;

// Re-export commonly used items
pub use api::GitHubClient;
pub use builder::DocBuilder;
pub use config::{validate_username, Config};
pub use error::{Result, SummaryError};
pub use render::{Artifact, Renderer};
pub use timerange::{EndTime, Interval, TimeRange};
pub use types::{Gist, GistFile, Language, Repository, UserInfo};
