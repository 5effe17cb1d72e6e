//! Telemetry metric name constants.
//!
//! Centralised metric names for gitroast operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `gitroast_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `endpoint` — upstream endpoint family (e.g. "profile", "repos")
//! - `operation` — cache operation (e.g. "github")
//! - `status` — outcome: "ok" or "error"

/// Total HTTP requests served by the roast API.
///
/// Labels: `route`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "gitroast_requests_total";

/// Total GitHub API calls issued (cache misses only).
///
/// Labels: `endpoint`.
pub const GITHUB_REQUESTS_TOTAL: &str = "gitroast_github_requests_total";

/// Total LLM retry attempts (not counting the initial request).
pub const LLM_RETRIES_TOTAL: &str = "gitroast_llm_retries_total";

/// Total roasts served from the canned fallback templates.
///
/// Labels: `reason` ("no_client" | "exhausted").
pub const FALLBACKS_TOTAL: &str = "gitroast_fallbacks_total";

/// Total cache hits for upstream responses.
///
/// Labels: `operation`.
pub const CACHE_HITS_TOTAL: &str = "gitroast_cache_hits_total";

/// Total cache misses for upstream responses.
///
/// Labels: `operation`.
pub const CACHE_MISSES_TOTAL: &str = "gitroast_cache_misses_total";

/// Total requests rejected by the per-IP rate limiter.
pub const RATE_LIMITED_TOTAL: &str = "gitroast_rate_limited_total";

/// Total playback items that timed out and were skipped.
///
/// Labels: `kind` ("sound" | "tts").
pub const PLAYBACK_TIMEOUTS_TOTAL: &str = "gitroast_playback_timeouts_total";
