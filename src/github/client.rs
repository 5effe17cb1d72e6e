//! Thin GitHub REST client with response caching.
//!
//! Every call goes through the shared [`ApiCache`]; a hit skips the
//! network entirely. Error mapping: 404 → [`RoastError::UserNotFound`]
//! (by the typed accessors that know the username), 403/429 →
//! [`RoastError::RateLimited`], anything else non-2xx →
//! [`RoastError::Api`].

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::cache::ApiCache;
use crate::telemetry;
use crate::types::{CommitSummary, EventSummary, RepoSummary, UserProfile};
use crate::{Result, RoastError};

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("gitroast/", env!("CARGO_PKG_VERSION"));

/// GitHub client configuration.
#[derive(Debug, Clone, Default)]
pub struct GithubConfig {
    /// Personal access token; anonymous requests work but are tightly
    /// rate-limited by GitHub.
    pub token: Option<String>,
    /// Override the API base URL (tests point this at a mock server).
    pub base_url: Option<String>,
}

/// GitHub REST client.
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    cache: Arc<ApiCache>,
}

/// Commit entry as returned by `/repos/{owner}/{repo}/commits`.
#[derive(Debug, Deserialize)]
struct CommitEntry {
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
    #[serde(default)]
    author: Option<CommitAuthor>,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
    #[serde(default)]
    date: Option<String>,
}

/// Event entry as returned by `/users/{username}/events/public`.
#[derive(Debug, Deserialize)]
struct EventEntry {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    repo: Option<EventRepo>,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventRepo {
    name: String,
}

impl GithubClient {
    /// Create a client with the given configuration and shared cache.
    pub fn new(config: GithubConfig, cache: Arc<ApiCache>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: config
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            token: config.token,
            cache,
        }
    }

    /// Whether a token is configured.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Fetch a user's profile. 404 maps to [`RoastError::UserNotFound`].
    pub async fn profile(&self, username: &str) -> Result<UserProfile> {
        let value = self
            .get_json(&format!("/users/{username}"), &[], "profile")
            .await
            .map_err(|e| match e {
                RoastError::Api { status: 404, .. } => RoastError::UserNotFound(username.into()),
                other => other,
            })?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch up to `per_page` most-recently-updated public repos.
    pub async fn repos(&self, username: &str, per_page: u32) -> Result<Vec<RepoSummary>> {
        let per_page = per_page.to_string();
        let params = [
            ("sort", "updated"),
            ("per_page", per_page.as_str()),
            ("type", "owner"),
        ];
        let value = self
            .get_json(&format!("/users/{username}/repos"), &params, "repos")
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch up to `per_page` commits authored by `username` in `repo`.
    pub async fn commits(
        &self,
        username: &str,
        repo: &str,
        per_page: u32,
    ) -> Result<Vec<CommitSummary>> {
        let per_page = per_page.to_string();
        let params = [("author", username), ("per_page", per_page.as_str())];
        let value = self
            .get_json(
                &format!("/repos/{username}/{repo}/commits"),
                &params,
                "commits",
            )
            .await?;
        let entries: Vec<CommitEntry> = serde_json::from_value(value)?;
        Ok(entries
            .into_iter()
            .map(|e| CommitSummary {
                message: e.commit.message,
                date: e.commit.author.and_then(|a| a.date),
            })
            .collect())
    }

    /// Fetch per-language byte counts for one repo.
    pub async fn languages(&self, username: &str, repo: &str) -> Result<BTreeMap<String, u64>> {
        let value = self
            .get_json(
                &format!("/repos/{username}/{repo}/languages"),
                &[],
                "languages",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch up to `per_page` recent public events.
    pub async fn events(&self, username: &str, per_page: u32) -> Result<Vec<EventSummary>> {
        let per_page = per_page.to_string();
        let params = [("per_page", per_page.as_str())];
        let value = self
            .get_json(
                &format!("/users/{username}/events/public"),
                &params,
                "events",
            )
            .await?;
        let entries: Vec<EventEntry> = serde_json::from_value(value)?;
        Ok(entries
            .into_iter()
            .map(|e| EventSummary {
                event_type: e.event_type,
                repo: e.repo.map(|r| r.name),
                created_at: e.created_at,
            })
            .collect())
    }

    /// Cached GET returning raw JSON.
    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
        endpoint: &'static str,
    ) -> Result<serde_json::Value> {
        if let Some(cached) = self.cache.get(path, params).await {
            debug!(path, "github cache hit");
            return Ok(cached);
        }

        metrics::counter!(telemetry::GITHUB_REQUESTS_TOTAL, "endpoint" => endpoint).increment(1);

        let url = format!("{}{path}", self.base_url);
        let mut request = self
            .http
            .get(&url)
            .query(params)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        if status == 403 || status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs);
            return Err(RoastError::RateLimited { retry_after });
        }
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RoastError::Api { status, message });
        }

        let value: serde_json::Value = response.json().await?;
        self.cache.insert(path, params, value.clone()).await;
        Ok(value)
    }
}
