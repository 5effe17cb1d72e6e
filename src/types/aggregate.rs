//! Normalized GitHub data for one roast subject.
//!
//! A [`UserAggregate`] is built once per request by the gatherer and is
//! immutable afterwards. Nothing here is persisted; the aggregate lives
//! for the duration of the HTTP request that produced it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// GitHub user profile, reduced to the fields the roast cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// One public repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One commit authored by the subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSummary {
    pub message: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// Commits grouped by repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoCommits {
    pub repo: String,
    pub commits: Vec<CommitSummary>,
}

/// One public event from the user's activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSummary {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Everything we know about the roast subject, in one record.
///
/// `language_stats` maps language name to byte count, summed across the
/// top repositories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAggregate {
    pub profile: UserProfile,
    pub repositories: Vec<RepoSummary>,
    pub commits: Vec<RepoCommits>,
    pub events: Vec<EventSummary>,
    pub language_stats: BTreeMap<String, u64>,
}

impl UserAggregate {
    /// Aggregate with only a profile, used by the quick-roast path.
    pub fn from_profile(profile: UserProfile) -> Self {
        Self {
            profile,
            repositories: Vec::new(),
            commits: Vec::new(),
            events: Vec::new(),
            language_stats: BTreeMap::new(),
        }
    }

    /// Language with the highest byte count, if any code was found.
    pub fn top_language(&self) -> Option<&str> {
        self.language_stats
            .iter()
            .max_by_key(|(_, bytes)| **bytes)
            .map(|(lang, _)| lang.as_str())
    }

    /// Stars summed across the fetched repositories.
    pub fn total_stars(&self) -> u32 {
        self.repositories.iter().map(|r| r.stargazers_count).sum()
    }

    /// Total commits fetched across all repositories.
    pub fn total_commits(&self) -> usize {
        self.commits.iter().map(|rc| rc.commits.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(login: &str) -> UserProfile {
        UserProfile {
            login: login.into(),
            name: None,
            bio: None,
            company: None,
            location: None,
            blog: None,
            avatar_url: None,
            public_repos: 3,
            followers: 1,
            following: 2,
            created_at: None,
        }
    }

    #[test]
    fn top_language_prefers_largest_byte_count() {
        let mut agg = UserAggregate::from_profile(profile("octocat"));
        agg.language_stats.insert("Rust".into(), 10_000);
        agg.language_stats.insert("TypeScript".into(), 90_000);
        assert_eq!(agg.top_language(), Some("TypeScript"));
    }

    #[test]
    fn empty_aggregate_has_no_top_language() {
        let agg = UserAggregate::from_profile(profile("octocat"));
        assert_eq!(agg.top_language(), None);
        assert_eq!(agg.total_stars(), 0);
        assert_eq!(agg.total_commits(), 0);
    }
}
