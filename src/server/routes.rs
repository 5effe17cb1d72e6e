//! HTTP route handlers for the roast API.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::github::{gather_quick, gather_user_data, validate_username};
use crate::roast::{FALLBACK_MODEL, fallback_roast};
use crate::telemetry;
use crate::tts::{MAX_TTS_CHARS, VoiceSettings, clean_text};
use crate::RoastError;
use crate::types::{GeneratedRoast, Language, UserAggregate};

use super::state::SharedState;

/// JSON error envelope returned by every failing route.
pub struct ApiError {
    status: StatusCode,
    error: &'static str,
    message: String,
}

impl ApiError {
    /// Map a [`RoastError`] onto the HTTP surface.
    ///
    /// Internal error detail is gated on the environment; production
    /// deployments get a generic message.
    pub fn from_roast(err: RoastError, production: bool) -> Self {
        let (status, label) = match &err {
            RoastError::InvalidUsername(_) => (StatusCode::BAD_REQUEST, "Invalid username"),
            RoastError::UserNotFound(_) => (StatusCode::NOT_FOUND, "User not found"),
            RoastError::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, "Rate limited"),
            RoastError::TextTooLong { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "Text too long"),
            RoastError::TtsUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "TTS unavailable"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };
        let message = if production && status == StatusCode::INTERNAL_SERVER_ERROR {
            "Something went wrong".to_string()
        } else {
            err.to_string()
        };
        Self {
            status,
            error: label,
            message,
        }
    }

    fn bad_request(error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        metrics::counter!(telemetry::REQUESTS_TOTAL, "status" => "error").increment(1);
        (
            self.status,
            Json(json!({ "error": self.error, "message": self.message })),
        )
            .into_response()
    }
}

fn map_err(state: &SharedState) -> impl Fn(RoastError) -> ApiError + '_ {
    let production = state.environment == "production";
    move |e| ApiError::from_roast(e, production)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// `GET /api/health`
pub async fn health(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": unix_now(),
        "uptime": state.started_at.elapsed().as_secs(),
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.environment,
        "services": {
            "github": state.github.has_token(),
            "llm": state.pipeline.is_configured(),
        },
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct RoastQuery {
    variants: Option<u32>,
    language: Option<String>,
}

fn parse_language(raw: Option<&str>) -> std::result::Result<Language, ApiError> {
    match raw {
        None => Ok(Language::default()),
        Some(code) => code.parse().map_err(|_| {
            ApiError::bad_request("Invalid language", format!("unsupported language: {code}"))
        }),
    }
}

fn stats_json(aggregate: &UserAggregate) -> serde_json::Value {
    json!({
        "total_repos": aggregate.profile.public_repos,
        "repos_analyzed": aggregate.repositories.len(),
        "total_stars": aggregate.total_stars(),
        "total_commits": aggregate.total_commits(),
        "top_language": aggregate.top_language(),
        "events_count": aggregate.events.len(),
    })
}

/// `GET /api/roast/{username}`
pub async fn roast_user(
    State(state): State<SharedState>,
    Path(username): Path<String>,
    Query(query): Query<RoastQuery>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    validate_username(&username).map_err(map_err(&state))?;
    let language = parse_language(query.language.as_deref())?;
    let variants = query.variants.unwrap_or(1);

    let aggregate = gather_user_data(&state.github, &username, &state.limits)
        .await
        .map_err(map_err(&state))?;
    let roasts = state
        .pipeline
        .generate_many(&aggregate, variants, language)
        .await;

    info!(username, %language, variants = roasts.len(), "roast served");
    metrics::counter!(telemetry::REQUESTS_TOTAL, "status" => "ok").increment(1);

    Ok(Json(json!({
        "success": true,
        "username": username,
        "language": language,
        "roasts": roasts,
        "stats": stats_json(&aggregate),
        "profile": aggregate.profile,
        "meta": {
            "generated_at": unix_now(),
            "model": roasts.first().map(|r| r.model.clone()),
            "variants": roasts.len(),
        },
    })))
}

/// `GET /api/roast/{username}/quick`
pub async fn quick_roast(
    State(state): State<SharedState>,
    Path(username): Path<String>,
    Query(query): Query<RoastQuery>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    validate_username(&username).map_err(map_err(&state))?;
    let language = parse_language(query.language.as_deref())?;

    let aggregate = gather_quick(&state.github, &username)
        .await
        .map_err(map_err(&state))?;
    let roast = state.pipeline.generate(&aggregate, language).await;

    metrics::counter!(telemetry::REQUESTS_TOTAL, "status" => "ok").increment(1);
    Ok(Json(json!({
        "success": true,
        "username": username,
        "language": language,
        "roast": roast,
    })))
}

/// `GET /api/roast/demo/sample` — fixed canned roast, no upstream calls.
pub async fn demo_sample() -> Json<serde_json::Value> {
    let roast = GeneratedRoast {
        roast: fallback_roast("octocat", Language::En),
        fallback: true,
        model: FALLBACK_MODEL.to_string(),
        language: Language::En,
        attempts: 0,
    };
    Json(json!({
        "success": true,
        "username": "octocat",
        "language": Language::En,
        "roasts": [roast],
        "demo": true,
    }))
}

/// `GET /api/user/{username}`
pub async fn user_profile(
    State(state): State<SharedState>,
    Path(username): Path<String>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    validate_username(&username).map_err(map_err(&state))?;
    let profile = state
        .github
        .profile(&username)
        .await
        .map_err(map_err(&state))?;
    Ok(Json(json!({ "success": true, "profile": profile })))
}

/// `GET /api/user/{username}/repos`
pub async fn user_repos(
    State(state): State<SharedState>,
    Path(username): Path<String>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    validate_username(&username).map_err(map_err(&state))?;
    let repos = state
        .github
        .repos(&username, state.limits.max_repos)
        .await
        .map_err(map_err(&state))?;
    Ok(Json(json!({ "success": true, "repos": repos })))
}

/// `GET /api/user/{username}/analyze`
pub async fn user_analyze(
    State(state): State<SharedState>,
    Path(username): Path<String>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    validate_username(&username).map_err(map_err(&state))?;
    let aggregate = gather_user_data(&state.github, &username, &state.limits)
        .await
        .map_err(map_err(&state))?;
    Ok(Json(json!({
        "success": true,
        "aggregate": aggregate,
        "stats": stats_json(&aggregate),
    })))
}

#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    text: Option<String>,
    voice_id: Option<String>,
    voice_settings: Option<VoiceSettings>,
}

/// `POST /api/tts/generate` — returns binary `audio/mpeg`.
pub async fn tts_generate(
    State(state): State<SharedState>,
    Json(request): Json<TtsRequest>,
) -> std::result::Result<Response, ApiError> {
    let text = request.text.as_deref().unwrap_or("").trim();
    if text.is_empty() {
        return Err(ApiError::bad_request(
            "Missing text",
            "text is required and may not be empty",
        ));
    }

    let audio = state
        .tts
        .synthesize(text, request.voice_id.as_deref(), request.voice_settings)
        .await
        .map_err(map_err(&state))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "audio/mpeg")],
        audio,
    )
        .into_response())
}

/// `GET /api/tts/voices`
pub async fn tts_voices(
    State(state): State<SharedState>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    let voices = state.tts.voices().await.map_err(map_err(&state))?;
    Ok(Json(json!({ "success": true, "voices": voices })))
}

/// `GET /api/tts/status`
pub async fn tts_status(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let status = state.tts.status().await;
    Json(json!({ "success": true, "status": status }))
}

#[derive(Debug, Deserialize)]
pub struct CleanTextRequest {
    text: String,
}

/// `POST /api/tts/clean-text`
pub async fn tts_clean_text(
    Json(request): Json<CleanTextRequest>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    if request.text.chars().count() > MAX_TTS_CHARS {
        return Err(ApiError::from_roast(
            RoastError::TextTooLong {
                len: request.text.chars().count(),
                limit: MAX_TTS_CHARS,
            },
            false,
        ));
    }
    Ok(Json(json!({
        "success": true,
        "cleaned": clean_text(&request.text),
    })))
}
