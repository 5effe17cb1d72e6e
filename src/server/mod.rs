//! HTTP surface for roastd.
//!
//! Routes, shared state, env-driven configuration, and the middleware
//! stack (security headers, CORS allow-list, body limit, per-IP rate
//! limiting).

pub mod config;
pub mod rate_limit;
pub mod routes;
pub mod state;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::warn;

pub use config::{Config, LlmProvider, RateLimitConfig};
pub use state::{AppState, SharedState};

use rate_limit::RateLimiter;

/// Maximum JSON request body size: 10 MB.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the full application router.
pub fn router(state: SharedState, config: &Config) -> Router {
    let limiter = RateLimiter::new(&config.rate_limit);

    let cors = if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| {
                origin.parse().map_err(|_| {
                    warn!(origin, "ignoring unparseable CORS origin");
                }).ok()
            })
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };

    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/roast/demo/sample", get(routes::demo_sample))
        .route("/api/roast/{username}", get(routes::roast_user))
        .route("/api/roast/{username}/quick", get(routes::quick_roast))
        .route("/api/user/{username}", get(routes::user_profile))
        .route("/api/user/{username}/repos", get(routes::user_repos))
        .route("/api/user/{username}/analyze", get(routes::user_analyze))
        .route("/api/tts/generate", post(routes::tts_generate))
        .route("/api/tts/voices", get(routes::tts_voices))
        .route("/api/tts/status", get(routes::tts_status))
        .route("/api/tts/clean-text", post(routes::tts_clean_text))
        .layer(axum::middleware::from_fn_with_state(
            limiter,
            rate_limit::rate_limit,
        ))
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}
