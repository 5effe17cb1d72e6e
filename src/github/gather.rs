//! Data gathering: a bounded set of GitHub calls per roast subject.
//!
//! The aggregate is built leaf-first: profile, then repos, then per-repo
//! commits and languages for the top few repos, then events. Any single
//! per-repo sub-fetch failure is logged and swallowed — a missing commit
//! list never fails the whole roast.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::Result;
use crate::types::{RepoCommits, UserAggregate};

use super::GithubClient;

/// Fetch bounds for one aggregate.
#[derive(Debug, Clone)]
pub struct GatherLimits {
    /// Most-recently-updated repos to list. Default: 20.
    pub max_repos: u32,
    /// How many of those repos get commit/language detail. Default: 5.
    pub detail_repos: usize,
    /// Commits fetched per detailed repo. Default: 10.
    pub max_commits: u32,
    /// Recent public events to fetch. Default: 20.
    pub max_events: u32,
}

impl Default for GatherLimits {
    fn default() -> Self {
        Self {
            max_repos: 20,
            detail_repos: 5,
            max_commits: 10,
            max_events: 20,
        }
    }
}

/// Build a full [`UserAggregate`] for `username`.
///
/// Fails only on profile lookup errors (unknown user, rate limit);
/// everything below the profile degrades to partial data.
pub async fn gather_user_data(
    client: &GithubClient,
    username: &str,
    limits: &GatherLimits,
) -> Result<UserAggregate> {
    let profile = client.profile(username).await?;

    let repositories = match client.repos(username, limits.max_repos).await {
        Ok(repos) => repos,
        Err(e) => {
            warn!(username, error = %e, "repo listing failed, roasting on profile alone");
            Vec::new()
        }
    };

    let mut commits = Vec::new();
    let mut language_stats: BTreeMap<String, u64> = BTreeMap::new();
    for repo in repositories.iter().take(limits.detail_repos) {
        match client.commits(username, &repo.name, limits.max_commits).await {
            Ok(list) if !list.is_empty() => commits.push(RepoCommits {
                repo: repo.name.clone(),
                commits: list,
            }),
            Ok(_) => {}
            Err(e) => {
                debug!(username, repo = %repo.name, error = %e, "commit fetch failed, skipping")
            }
        }
        match client.languages(username, &repo.name).await {
            Ok(langs) => {
                for (lang, bytes) in langs {
                    *language_stats.entry(lang).or_insert(0) += bytes;
                }
            }
            Err(e) => {
                debug!(username, repo = %repo.name, error = %e, "language fetch failed, skipping")
            }
        }
    }

    let events = match client.events(username, limits.max_events).await {
        Ok(events) => events,
        Err(e) => {
            warn!(username, error = %e, "event fetch failed, skipping");
            Vec::new()
        }
    };

    debug!(
        username,
        repos = repositories.len(),
        commit_repos = commits.len(),
        events = events.len(),
        languages = language_stats.len(),
        "aggregate gathered"
    );

    Ok(UserAggregate {
        profile,
        repositories,
        commits,
        events,
        language_stats,
    })
}

/// Minimal aggregate for the quick-roast path: profile plus the 10
/// most-recently-updated repos, nothing else.
pub async fn gather_quick(client: &GithubClient, username: &str) -> Result<UserAggregate> {
    let profile = client.profile(username).await?;
    let repositories = client.repos(username, 10).await.unwrap_or_else(|e| {
        warn!(username, error = %e, "repo listing failed for quick roast");
        Vec::new()
    });
    let mut aggregate = UserAggregate::from_profile(profile);
    aggregate.repositories = repositories;
    Ok(aggregate)
}
