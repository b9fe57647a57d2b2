//! GitHub REST API client.
//!
//! Every request goes through [`GitHubClient::get`], which owns the quota
//! bookkeeping. Failed requests are logged and reported as "no data"
//! (`Ok(None)`) so a partially fetched profile still renders; a response
//! that arrives but does not match the expected record shape is an error.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::config::{user_url, validate_username, Config};
use crate::error::{Result, SummaryError};
use crate::http::{create_client, numeric_header, RATE_LIMIT_REMAINING, RATE_LIMIT_RESET};
use crate::types::{Gist, GistFile, Language, Repository, UserInfo};

/// Wire shape of `GET users/{user}`.
#[derive(Debug, Deserialize)]
struct ApiUser {
    login: String,
    html_url: String,
    name: Option<String>,
    followers: u64,
    following: u64,
    created_at: DateTime<Utc>,
    public_repos: u64,
}

impl From<ApiUser> for UserInfo {
    fn from(u: ApiUser) -> Self {
        Self {
            login: u.login,
            url: u.html_url,
            name: u.name,
            followers: u.followers,
            following: u.following,
            created: u.created_at,
            repos: u.public_repos,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiLicense {
    spdx_id: Option<String>,
}

/// Wire shape of one entry of `GET users/{user}/repos`.
#[derive(Debug, Deserialize)]
struct ApiRepository {
    name: String,
    html_url: String,
    description: Option<String>,
    fork: bool,
    languages_url: String,
    size: u64,
    license: Option<ApiLicense>,
    forks_count: u64,
    stargazers_count: u64,
    watchers_count: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ApiRepository {
    fn into_repository(self, languages: Vec<Language>) -> Repository {
        Repository {
            name: self.name,
            url: self.html_url,
            description: self.description,
            forked: self.fork,
            languages,
            size: self.size,
            license: self.license.and_then(|l| l.spdx_id),
            forks: self.forks_count,
            stars: self.stargazers_count,
            watchers: self.watchers_count,
            created: self.created_at,
            updated: self.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiGistFile {
    language: Option<String>,
    #[serde(default)]
    size: u64,
}

/// Wire shape of one entry of `GET users/{user}/gists`.
#[derive(Debug, Deserialize)]
struct ApiGist {
    id: String,
    html_url: String,
    description: Option<String>,
    files: BTreeMap<String, ApiGistFile>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ApiGist> for Gist {
    fn from(g: ApiGist) -> Self {
        Self {
            id: g.id,
            url: g.html_url,
            description: g.description,
            files: g
                .files
                .into_iter()
                .map(|(name, f)| {
                    (
                        name,
                        GistFile {
                            language: f.language,
                            size: f.size,
                        },
                    )
                })
                .collect(),
            created: g.created_at,
            updated: g.updated_at,
        }
    }
}

/// Client for the public endpoints of one GitHub user.
pub struct GitHubClient {
    http: Client,
    api_url: String,
    user: String,
    rate_limit: u32,
}

impl GitHubClient {
    /// Create a client for `username`.
    ///
    /// The quota counter starts at the configured assumption and follows
    /// the server's reports from the first response on.
    pub fn new(config: &Config, username: &str) -> Result<Self> {
        validate_username(username)?;
        Ok(Self {
            http: create_client(config)?,
            api_url: config.api_url.clone(),
            user: username.to_string(),
            rate_limit: config.rate_limit,
        })
    }

    /// Requests left before the client stops issuing them.
    pub fn rate_limit(&self) -> u32 {
        self.rate_limit
    }

    /// Fetch the user's public profile.
    pub fn fetch_user_info(&mut self) -> Result<Option<UserInfo>> {
        let url = user_url(&self.api_url, &self.user, None);
        let user: Option<ApiUser> = self.get_json(&url)?;
        Ok(user.map(UserInfo::from))
    }

    /// Fetch the user's repositories, each with its language breakdown.
    pub fn fetch_repositories(&mut self) -> Result<Vec<Repository>> {
        let url = user_url(&self.api_url, &self.user, Some("repos"));
        let raw: Vec<ApiRepository> = self.get_json(&url)?.unwrap_or_default();

        let mut repos = Vec::with_capacity(raw.len());
        for repo in raw {
            let languages = self.fetch_languages(&repo.languages_url)?;
            repos.push(repo.into_repository(languages));
        }
        tracing::debug!(count = repos.len(), "fetched repositories");
        Ok(repos)
    }

    /// Fetch the user's public gists.
    pub fn fetch_gists(&mut self) -> Result<Vec<Gist>> {
        let url = user_url(&self.api_url, &self.user, Some("gists"));
        let raw: Vec<ApiGist> = self.get_json(&url)?.unwrap_or_default();
        tracing::debug!(count = raw.len(), "fetched gists");
        Ok(raw.into_iter().map(Gist::from).collect())
    }

    /// Fetch a repository's languages, most used first.
    pub fn fetch_languages(&mut self, url: &str) -> Result<Vec<Language>> {
        let raw: BTreeMap<String, u64> = self.get_json(url)?.unwrap_or_default();
        let mut languages: Vec<Language> = raw
            .into_iter()
            .map(|(name, bytes)| Language::new(name, bytes))
            .collect();
        languages.sort_by(|a, b| b.bytes.cmp(&a.bytes));
        Ok(languages)
    }

    /// GET `url` and decode the body into `T`.
    fn get_json<T: DeserializeOwned>(&mut self, url: &str) -> Result<Option<T>> {
        let Some(body) = self.get(url) else {
            return Ok(None);
        };
        serde_json::from_value(body)
            .map(Some)
            .map_err(|source| SummaryError::Json {
                endpoint: self.endpoint_name(url),
                source,
            })
    }

    /// GET `url`, returning the JSON body or `None` when no data is available.
    fn get(&mut self, url: &str) -> Option<Value> {
        if self.rate_limit == 0 {
            tracing::warn!(url, "rate limit exhausted, skipping request");
            return None;
        }

        let response = match self.http.get(url).send() {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url, error = %e, "request failed");
                return None;
            }
        };

        let status = response.status();
        if let Some(remaining) = numeric_header::<u32>(response.headers(), RATE_LIMIT_REMAINING) {
            self.rate_limit = remaining;
        }
        tracing::debug!(url, status = status.as_u16(), remaining = self.rate_limit, "GET");

        if status == StatusCode::FORBIDDEN {
            let reset = numeric_header::<i64>(response.headers(), RATE_LIMIT_RESET)
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
            match reset {
                Some(reset) => tracing::error!(
                    "Wait until {} UTC to send new requests!",
                    reset.format("%Y/%m/%d %H:%M:%S")
                ),
                None => tracing::error!(url, "request forbidden by GitHub"),
            }
            return None;
        }

        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "unexpected response status");
            return None;
        }

        match response.json::<Value>() {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(url, error = %e, "response body is not JSON");
                None
            }
        }
    }

    /// URL relative to the API base, for error messages.
    fn endpoint_name(&self, url: &str) -> String {
        url.strip_prefix(&self.api_url).unwrap_or(url).to_string()
    }
}
