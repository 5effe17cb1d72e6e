//! TTL + capacity bounded cache for upstream API responses.
//!
//! [`ApiCache`] deduplicates GitHub REST calls within a short window so
//! that repeated roasts of the same user do not burn through the GitHub
//! rate limit. Entries are keyed by a content hash of endpoint + query
//! parameters and store the raw JSON response.
//!
//! The cache sits inside [`GithubClient`](crate::github::GithubClient);
//! a hit bypasses the network entirely. Hit/miss metrics are emitted per
//! operation. Invariant: a hit never returns data older than the TTL —
//! expiry is enforced by moka, eviction order beyond that is moka's
//! concern.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use moka::future::Cache;

use crate::telemetry;

/// Configuration for the response cache.
///
/// ```rust
/// # use gitroast::cache::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(500)
///     .ttl(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries. Default: 100.
    pub max_entries: u64,
    /// Time-to-live for cached entries. Default: 300 s.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 100,
            ttl: Duration::from_secs(300),
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// In-memory response cache for upstream API calls.
pub struct ApiCache {
    cache: Cache<u64, serde_json::Value>,
}

impl ApiCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { cache }
    }

    /// Look up a cached response.
    ///
    /// Returns `None` on miss. Emits cache hit/miss metrics.
    pub async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Option<serde_json::Value> {
        let key = cache_key(endpoint, params);
        match self.cache.get(&key).await {
            Some(value) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL, "operation" => "github")
                    .increment(1);
                Some(value)
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "operation" => "github")
                    .increment(1);
                None
            }
        }
    }

    /// Insert a response.
    pub async fn insert(&self, endpoint: &str, params: &[(&str, &str)], value: serde_json::Value) {
        let key = cache_key(endpoint, params);
        self.cache.insert(key, value).await;
    }

    /// Number of live entries (approximate, per moka semantics).
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute a cache key from endpoint and query parameters.
///
/// Uses `DefaultHasher` (SipHash); deterministic within a process
/// lifetime, which is all an in-memory cache needs.
fn cache_key(endpoint: &str, params: &[(&str, &str)]) -> u64 {
    let mut hasher = DefaultHasher::new();
    endpoint.hash(&mut hasher);
    for (k, v) in params {
        k.hash(&mut hasher);
        v.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_deterministic() {
        let k1 = cache_key("/users/octocat", &[("per_page", "20")]);
        let k2 = cache_key("/users/octocat", &[("per_page", "20")]);
        assert_eq!(k1, k2);
    }

    #[test]
    fn cache_key_differs_on_endpoint() {
        let k1 = cache_key("/users/octocat", &[]);
        let k2 = cache_key("/users/octocat/repos", &[]);
        assert_ne!(k1, k2);
    }

    #[test]
    fn cache_key_differs_on_params() {
        let k1 = cache_key("/users/octocat/repos", &[("per_page", "10")]);
        let k2 = cache_key("/users/octocat/repos", &[("per_page", "20")]);
        assert_ne!(k1, k2);
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let cache = ApiCache::new(&CacheConfig::new());
        let value = serde_json::json!({"login": "octocat"});
        cache.insert("/users/octocat", &[], value.clone()).await;
        assert_eq!(cache.get("/users/octocat", &[]).await, Some(value));
    }

    #[tokio::test]
    async fn miss_on_different_params() {
        let cache = ApiCache::new(&CacheConfig::new());
        cache
            .insert("/users/octocat", &[("page", "1")], serde_json::json!(1))
            .await;
        assert_eq!(cache.get("/users/octocat", &[("page", "2")]).await, None);
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache = ApiCache::new(&CacheConfig::new().ttl(Duration::from_millis(50)));
        cache
            .insert("/users/octocat", &[], serde_json::json!(1))
            .await;
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(cache.get("/users/octocat", &[]).await, None);
    }
}
