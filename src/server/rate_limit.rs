//! Per-IP fixed-window rate limiting.
//!
//! Counters live in a moka cache whose TTL is the window length, so a
//! client's window resets by expiry rather than by a background sweep.
//! Client identity is the `X-Forwarded-For` head when present (we sit
//! behind a proxy in production), else the socket peer address.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use moka::future::Cache;
use tracing::warn;

use crate::telemetry;

use super::config::RateLimitConfig;

/// Shared rate limiter.
pub struct RateLimiter {
    counters: Cache<String, Arc<AtomicU32>>,
    max_requests: u32,
}

impl RateLimiter {
    /// Create a limiter from configuration.
    pub fn new(config: &RateLimitConfig) -> Arc<Self> {
        Arc::new(Self {
            counters: Cache::builder()
                .max_capacity(100_000)
                .time_to_live(config.window)
                .build(),
            max_requests: config.max_requests,
        })
    }

    /// Record one request for `client`; true if still under the limit.
    pub async fn allow(&self, client: &str) -> bool {
        let counter = self
            .counters
            .get_with(client.to_string(), async { Arc::new(AtomicU32::new(0)) })
            .await;
        counter.fetch_add(1, Ordering::Relaxed) < self.max_requests
    }
}

/// Axum middleware enforcing the limit.
pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_key(&request);
    if !limiter.allow(&client).await {
        metrics::counter!(telemetry::RATE_LIMITED_TOTAL).increment(1);
        warn!(client, "request rejected by rate limiter");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            axum::Json(serde_json::json!({
                "error": "Too many requests",
                "message": "Rate limit exceeded, slow down",
            })),
        )
            .into_response();
    }
    next.run(request).await
}

fn client_key(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
    {
        return forwarded.trim().to_string();
    }
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn allows_up_to_limit_then_rejects() {
        let limiter = RateLimiter::new(&RateLimitConfig {
            max_requests: 3,
            window: Duration::from_secs(60),
        });
        for _ in 0..3 {
            assert!(limiter.allow("10.0.0.1").await);
        }
        assert!(!limiter.allow("10.0.0.1").await);
    }

    #[tokio::test]
    async fn clients_are_counted_separately() {
        let limiter = RateLimiter::new(&RateLimitConfig {
            max_requests: 1,
            window: Duration::from_secs(60),
        });
        assert!(limiter.allow("10.0.0.1").await);
        assert!(limiter.allow("10.0.0.2").await);
        assert!(!limiter.allow("10.0.0.1").await);
    }

    #[tokio::test]
    async fn window_expiry_resets_the_count() {
        let limiter = RateLimiter::new(&RateLimitConfig {
            max_requests: 1,
            window: Duration::from_millis(50),
        });
        assert!(limiter.allow("10.0.0.1").await);
        assert!(!limiter.allow("10.0.0.1").await);
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(limiter.allow("10.0.0.1").await);
    }
}
