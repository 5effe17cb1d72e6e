//! Configuration loading for roastd.
//!
//! Everything comes from environment variables so the daemon can run
//! unconfigured (no keys) and still serve fallback roasts:
//!
//! - `PORT`, `GITROAST_ENV`
//! - `GITHUB_TOKEN`
//! - `GROQ_API_KEY` (or `OPENROUTER_API_KEY` as a fallback provider)
//! - `ELEVENLABS_API_KEY`
//! - `CACHE_TTL` (seconds), `MAX_CACHE_SIZE`
//! - `RATE_LIMIT_MAX_REQUESTS`, `RATE_LIMIT_WINDOW_MS`
//! - `CORS_ORIGINS` (comma-separated allow-list; empty = any)

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::{Result, RoastError};

/// Which chat-completion provider a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Groq,
    OpenRouter,
}

/// Per-IP rate limiting configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Requests allowed per window. Default: 100.
    pub max_requests: u32,
    /// Window length. Default: 900 s.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(900),
        }
    }
}

/// Daemon configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: String,
    pub github_token: Option<String>,
    pub llm_api_key: Option<(LlmProvider, String)>,
    pub elevenlabs_api_key: Option<String>,
    pub cache: CacheConfig,
    pub rate_limit: RateLimitConfig,
    /// CORS allow-list; empty means any origin (development mode).
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3001,
            environment: "development".to_string(),
            github_token: None,
            llm_api_key: None,
            elevenlabs_api_key: None,
            cache: CacheConfig::default(),
            rate_limit: RateLimitConfig::default(),
            cors_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Some(port) = parse_var::<u16>("PORT")? {
            config.port = port;
        }
        if let Ok(environment) = env::var("GITROAST_ENV") {
            config.environment = environment;
        }
        config.github_token = non_empty_var("GITHUB_TOKEN");
        config.llm_api_key = non_empty_var("GROQ_API_KEY")
            .map(|key| (LlmProvider::Groq, key))
            .or_else(|| non_empty_var("OPENROUTER_API_KEY").map(|k| (LlmProvider::OpenRouter, k)));
        config.elevenlabs_api_key = non_empty_var("ELEVENLABS_API_KEY");

        if let Some(ttl) = parse_var::<u64>("CACHE_TTL")? {
            config.cache = config.cache.ttl(Duration::from_secs(ttl));
        }
        if let Some(size) = parse_var::<u64>("MAX_CACHE_SIZE")? {
            config.cache = config.cache.max_entries(size);
        }
        if let Some(max) = parse_var::<u32>("RATE_LIMIT_MAX_REQUESTS")? {
            config.rate_limit.max_requests = max;
        }
        if let Some(window_ms) = parse_var::<u64>("RATE_LIMIT_WINDOW_MS")? {
            config.rate_limit.window = Duration::from_millis(window_ms);
        }
        if let Ok(origins) = env::var("CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(config)
    }

    /// Whether this is a production deployment (error detail is gated
    /// on this).
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Err(_) => Ok(None),
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            RoastError::Configuration(format!("invalid value for {key}: {raw:?}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.rate_limit.max_requests, 100);
        assert_eq!(config.rate_limit.window, Duration::from_secs(900));
        assert_eq!(config.cache.ttl, Duration::from_secs(300));
        assert_eq!(config.cache.max_entries, 100);
        assert!(!config.is_production());
    }
}
