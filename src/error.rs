//! Gitroast error types

use std::time::Duration;

/// Gitroast error types
#[derive(Debug, thiserror::Error)]
pub enum RoastError {
    // Upstream/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("GitHub user not found: {0}")]
    UserNotFound(String),

    // Request validation errors
    #[error("invalid username: {0}")]
    InvalidUsername(String),

    #[error("text too long: {len} chars (limit {limit})")]
    TextTooLong { len: usize, limit: usize },

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty response from model")]
    EmptyResponse,

    // Configuration errors
    #[error("no API key configured for {0}")]
    NoApiKey(&'static str),

    #[error("configuration error: {0}")]
    Configuration(String),

    // TTS provider errors
    #[error("TTS provider unavailable: {0}")]
    TtsUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl RoastError {
    /// Whether this error is worth retrying.
    ///
    /// Rate limits and transport-level failures are transient; everything
    /// else (missing user, bad input, missing credential) is permanent.
    pub fn is_transient(&self) -> bool {
        matches!(self, RoastError::RateLimited { .. } | RoastError::Http(_))
    }

    /// Whether this error came from an upstream rate limit.
    ///
    /// The roast pipeline backs off exponentially on these and only
    /// applies a flat delay to other failures.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            RoastError::RateLimited { .. } => true,
            RoastError::Api { status, message } => {
                *status == 429 || message.contains("rate limit") || message.contains("429")
            }
            RoastError::Http(msg) => msg.contains("rate limit") || msg.contains("429"),
            _ => false,
        }
    }

    /// Provider `Retry-After` hint, if one was supplied.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            RoastError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RoastError {
    fn from(err: reqwest::Error) -> Self {
        if err.status().map(|s| s.as_u16()) == Some(429) {
            RoastError::RateLimited { retry_after: None }
        } else {
            RoastError::Http(err.to_string())
        }
    }
}

/// Result type alias for gitroast operations
pub type Result<T> = std::result::Result<T, RoastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_is_transient() {
        assert!(RoastError::RateLimited { retry_after: None }.is_transient());
        assert!(RoastError::Http("connection reset".into()).is_transient());
    }

    #[test]
    fn user_not_found_is_permanent() {
        assert!(!RoastError::UserNotFound("ghost".into()).is_transient());
        assert!(!RoastError::NoApiKey("groq").is_transient());
    }

    #[test]
    fn rate_limit_detected_in_api_message() {
        let err = RoastError::Api {
            status: 400,
            message: "rate limit exceeded for model".into(),
        };
        assert!(err.is_rate_limit());
        assert!(
            RoastError::Api {
                status: 429,
                message: "too many requests".into()
            }
            .is_rate_limit()
        );
    }

    #[test]
    fn retry_after_surfaces_hint() {
        let err = RoastError::RateLimited {
            retry_after: Some(Duration::from_secs(7)),
        };
        assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
        assert_eq!(RoastError::EmptyResponse.retry_after(), None);
    }
}
