//! Roast generation pipeline: bounded retry, exponential backoff on
//! rate limits, guaranteed fallback.
//!
//! [`RoastPipeline::generate`] never returns an error. Every failure
//! mode — no credential configured, rate limits on every attempt, a
//! provider outage — ends in a canned roast, so the HTTP route needs no
//! "LLM unavailable" branch of its own.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::llm::ChatClient;
use crate::roast::{FALLBACK_MODEL, SYSTEM_PROMPT, build_prompt, fallback_roast};
use crate::telemetry;
use crate::types::{GeneratedRoast, Language, UserAggregate};

/// Configuration for retry and multi-variant behaviour.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum LLM calls per roast (including the initial one).
    /// Default: 3.
    pub max_attempts: u32,
    /// Base delay before the first rate-limit retry; doubles per
    /// attempt (1 s, 2 s, 4 s). Also the flat delay for non-rate-limit
    /// retries. Default: 1 s.
    pub base_delay: Duration,
    /// Cap on any single backoff sleep. Default: 30 s.
    pub max_delay: Duration,
    /// Politeness delay between variant generations. Default: 500 ms.
    pub variant_delay: Duration,
    /// Hard cap on variants per request. Default: 3.
    pub max_variants: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            variant_delay: Duration::from_millis(500),
            max_variants: 3,
        }
    }
}

impl PipelineConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of attempts.
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set the base backoff delay.
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Set the delay between variant generations.
    pub fn variant_delay(mut self, delay: Duration) -> Self {
        self.variant_delay = delay;
        self
    }

    /// Backoff for a rate-limited attempt (1-indexed): `base * 2^(n-1)`,
    /// capped at `max_delay`.
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)));
        delay.min(self.max_delay)
    }

    /// Effective delay, preferring a provider `Retry-After` hint.
    pub fn effective_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        retry_after
            .unwrap_or_else(|| self.backoff_for_attempt(attempt))
            .min(self.max_delay)
    }
}

/// The roast generation pipeline.
///
/// Holds an optional [`ChatClient`] — `None` means no credential was
/// configured at startup, and every roast is served from the canned
/// templates.
pub struct RoastPipeline {
    client: Option<Arc<dyn ChatClient>>,
    config: PipelineConfig,
}

impl RoastPipeline {
    /// Pipeline backed by a real chat client.
    pub fn new(client: Arc<dyn ChatClient>, config: PipelineConfig) -> Self {
        Self {
            client: Some(client),
            config,
        }
    }

    /// Pipeline with no client; every roast is a fallback.
    pub fn unconfigured(config: PipelineConfig) -> Self {
        Self {
            client: None,
            config,
        }
    }

    /// Whether a chat client is configured.
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Generate one roast. Infallible by contract: the worst case is a
    /// canned roast, never an error.
    pub async fn generate(&self, aggregate: &UserAggregate, language: Language) -> GeneratedRoast {
        let username = aggregate.profile.login.as_str();
        let Some(client) = &self.client else {
            debug!(username, "no chat client configured, serving fallback roast");
            metrics::counter!(telemetry::FALLBACKS_TOTAL, "reason" => "no_client").increment(1);
            return self.canned(username, language, 1);
        };

        let prompt = build_prompt(aggregate, language);
        for attempt in 1..=self.config.max_attempts {
            match client.complete(SYSTEM_PROMPT, &prompt).await {
                Ok(content) => {
                    info!(username, %language, attempt, "roast generated");
                    return GeneratedRoast {
                        roast: content,
                        fallback: false,
                        model: client.model().to_string(),
                        language,
                        attempts: attempt,
                    };
                }
                Err(e) if attempt < self.config.max_attempts => {
                    metrics::counter!(telemetry::LLM_RETRIES_TOTAL).increment(1);
                    // Rate limits back off exponentially; other errors
                    // get one flat base delay before the next try.
                    let delay = if e.is_rate_limit() {
                        self.config.effective_delay(attempt, e.retry_after())
                    } else {
                        self.config.base_delay
                    };
                    warn!(
                        username,
                        attempt,
                        max_attempts = self.config.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "roast attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!(username, attempt, error = %e, "roast attempts exhausted, serving fallback");
                    metrics::counter!(telemetry::FALLBACKS_TOTAL, "reason" => "exhausted")
                        .increment(1);
                    return self.canned(username, language, attempt);
                }
            }
        }

        // max_attempts == 0 is a misconfiguration; still honour the
        // infallible contract.
        self.canned(username, language, 1)
    }

    /// Generate up to `count` variants (clamped to the configured cap),
    /// serially, with a politeness delay between calls.
    pub async fn generate_many(
        &self,
        aggregate: &UserAggregate,
        count: u32,
        language: Language,
    ) -> Vec<GeneratedRoast> {
        let count = count.clamp(1, self.config.max_variants);
        let mut roasts = Vec::with_capacity(count as usize);
        for i in 0..count {
            if i > 0 {
                tokio::time::sleep(self.config.variant_delay).await;
            }
            roasts.push(self.generate(aggregate, language).await);
        }
        roasts
    }

    fn canned(&self, username: &str, language: Language, attempts: u32) -> GeneratedRoast {
        GeneratedRoast {
            roast: fallback_roast(username, language),
            fallback: true,
            model: FALLBACK_MODEL.to_string(),
            language,
            attempts,
        }
    }
}
