//! End-to-end HTTP tests: axum router + wiremock upstreams.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gitroast::cache::{ApiCache, CacheConfig};
use gitroast::github::{GithubClient, GithubConfig};
use gitroast::llm::{GroqClient, GroqConfig};
use gitroast::roast::{PipelineConfig, RoastPipeline};
use gitroast::server::{AppState, Config, router};
use gitroast::tts::{ElevenLabsClient, TtsConfig};

fn github_client(server: &MockServer) -> GithubClient {
    GithubClient::new(
        GithubConfig {
            token: Some("test-token".into()),
            base_url: Some(server.uri()),
        },
        Arc::new(ApiCache::new(&CacheConfig::new())),
    )
}

fn app_with(
    github: GithubClient,
    pipeline: RoastPipeline,
    tts: ElevenLabsClient,
) -> Router {
    let state = AppState::with_components(github, pipeline, tts);
    router(state, &Config::default())
}

fn unconfigured_tts() -> ElevenLabsClient {
    ElevenLabsClient::new(TtsConfig::default())
}

async fn mount_github_user(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "octocat",
            "name": "The Octocat",
            "public_repos": 8,
            "followers": 4000,
            "following": 9
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "name": "hello-world",
            "language": "Rust",
            "stargazers_count": 80,
            "forks_count": 9,
            "fork": false
        }])))
        .mount(server)
        .await;
    // Commits/languages/events left unmatched → 404, which the
    // gatherer swallows.
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn health_reports_service_configuration() {
    let github = MockServer::start().await;
    let app = app_with(
        github_client(&github),
        RoastPipeline::unconfigured(PipelineConfig::new()),
        unconfigured_tts(),
    );

    let response = get(&app, "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["services"]["github"], true);
    assert_eq!(body["services"]["llm"], false);
    assert!(body["uptime"].is_number());
}

#[tokio::test]
async fn malformed_username_is_rejected_before_any_upstream_call() {
    let github = MockServer::start().await;
    let app = app_with(
        github_client(&github),
        RoastPipeline::unconfigured(PipelineConfig::new()),
        unconfigured_tts(),
    );

    let response = get(&app, "/api/roast/octocat-").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid username");

    // No GitHub call was made.
    assert!(github.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_user_returns_404_with_username_in_message() {
    let github = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/this-user-does-not-exist-zzz"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&github)
        .await;
    let app = app_with(
        github_client(&github),
        RoastPipeline::unconfigured(PipelineConfig::new()),
        unconfigured_tts(),
    );

    let response = get(&app, "/api/roast/this-user-does-not-exist-zzz").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "User not found");
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("this-user-does-not-exist-zzz")
    );
}

#[tokio::test]
async fn roast_without_llm_key_degrades_to_fallback() {
    let github = MockServer::start().await;
    mount_github_user(&github).await;
    let app = app_with(
        github_client(&github),
        RoastPipeline::unconfigured(PipelineConfig::new()),
        unconfigured_tts(),
    );

    let response = get(&app, "/api/roast/octocat").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["roasts"][0]["fallback"], true);
    assert!(!body["roasts"][0]["roast"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn roast_happy_path_with_live_llm() {
    let github = MockServer::start().await;
    mount_github_user(&github).await;

    let llm = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "content": "¡Bienvenidos al show! *crowd laughs* El código es tremendo."
                }
            }]
        })))
        .mount(&llm)
        .await;

    let client = GroqClient::new(GroqConfig::new("test-key").base_url(llm.uri()));
    let app = app_with(
        github_client(&github),
        RoastPipeline::new(Arc::new(client), PipelineConfig::new()),
        unconfigured_tts(),
    );

    let response = get(&app, "/api/roast/octocat?variants=1&language=es").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["language"], "es");
    assert_eq!(body["roasts"].as_array().unwrap().len(), 1);
    assert_eq!(body["roasts"][0]["fallback"], false);
    assert_eq!(body["roasts"][0]["attempts"], 1);
    // totalRepos comes from the profile, not the fetched page.
    assert_eq!(body["stats"]["total_repos"], 8);
    assert_eq!(body["stats"]["repos_analyzed"], 1);
}

#[tokio::test]
async fn unsupported_language_is_a_bad_request() {
    let github = MockServer::start().await;
    let app = app_with(
        github_client(&github),
        RoastPipeline::unconfigured(PipelineConfig::new()),
        unconfigured_tts(),
    );

    let response = get(&app, "/api/roast/octocat?language=klingon").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid language");
}

#[tokio::test]
async fn quick_roast_uses_profile_and_repos_only() {
    let github = MockServer::start().await;
    mount_github_user(&github).await;
    let app = app_with(
        github_client(&github),
        RoastPipeline::unconfigured(PipelineConfig::new()),
        unconfigured_tts(),
    );

    let response = get(&app, "/api/roast/octocat/quick").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["roast"]["fallback"], true);

    // Only profile + repos were fetched.
    let requests = github.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn demo_sample_needs_no_upstreams() {
    let github = MockServer::start().await;
    let app = app_with(
        github_client(&github),
        RoastPipeline::unconfigured(PipelineConfig::new()),
        unconfigured_tts(),
    );

    let response = get(&app, "/api/roast/demo/sample").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["demo"], true);
    assert_eq!(body["roasts"][0]["fallback"], true);
    assert!(github.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn user_endpoints_pass_through() {
    let github = MockServer::start().await;
    mount_github_user(&github).await;
    let app = app_with(
        github_client(&github),
        RoastPipeline::unconfigured(PipelineConfig::new()),
        unconfigured_tts(),
    );

    let response = get(&app, "/api/user/octocat").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["profile"]["login"], "octocat");

    let response = get(&app, "/api/user/octocat/repos").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["repos"][0]["name"], "hello-world");

    let response = get(&app, "/api/user/octocat/analyze").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["aggregate"]["profile"]["login"], "octocat");
    assert_eq!(body["stats"]["total_repos"], 8);
}

#[tokio::test]
async fn tts_generate_validates_before_calling_upstream() {
    let github = MockServer::start().await;
    let app = app_with(
        github_client(&github),
        RoastPipeline::unconfigured(PipelineConfig::new()),
        unconfigured_tts(),
    );

    // Empty text → 400.
    let response = post_json(&app, "/api/tts/generate", json!({ "text": "   " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Oversized text → 413.
    let response = post_json(
        &app,
        "/api/tts/generate",
        json!({ "text": "a".repeat(1001) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    // Valid text but no provider key → 503.
    let response = post_json(&app, "/api/tts/generate", json!({ "text": "hello" })).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn tts_generate_streams_audio_from_provider() {
    let github = MockServer::start().await;
    let elevenlabs = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/text-to-speech/test-voice"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/mpeg")
                .set_body_bytes(b"ID3fake-mpeg-data".to_vec()),
        )
        .mount(&elevenlabs)
        .await;

    let tts = ElevenLabsClient::new(TtsConfig {
        api_key: Some("test-key".into()),
        base_url: Some(elevenlabs.uri()),
    });
    let app = app_with(
        github_client(&github),
        RoastPipeline::unconfigured(PipelineConfig::new()),
        tts,
    );

    let response = post_json(
        &app,
        "/api/tts/generate",
        json!({ "text": "hello crowd", "voice_id": "test-voice" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "audio/mpeg"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ID3fake-mpeg-data");
}

#[tokio::test]
async fn tts_status_reports_unconfigured() {
    let github = MockServer::start().await;
    let app = app_with(
        github_client(&github),
        RoastPipeline::unconfigured(PipelineConfig::new()),
        unconfigured_tts(),
    );

    let response = get(&app, "/api/tts/status").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"]["configured"], false);
    assert_eq!(body["status"]["reachable"], false);
}

#[tokio::test]
async fn clean_text_strips_cues() {
    let github = MockServer::start().await;
    let app = app_with(
        github_client(&github),
        RoastPipeline::unconfigured(PipelineConfig::new()),
        unconfigured_tts(),
    );

    let response = post_json(
        &app,
        "/api/tts/clean-text",
        json!({ "text": "Hello! *air horn* Such (ahem) code." }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["cleaned"], "Hello! Such code.");
}

#[tokio::test]
async fn rate_limiter_rejects_after_budget_is_spent() {
    let github = MockServer::start().await;
    let state = AppState::with_components(
        github_client(&github),
        RoastPipeline::unconfigured(PipelineConfig::new()),
        unconfigured_tts(),
    );
    let mut config = Config::default();
    config.rate_limit.max_requests = 2;
    let app = router(state, &config);

    for _ in 0..2 {
        let response = get(&app, "/api/health").await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    let response = get(&app, "/api/health").await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Too many requests");
}

#[tokio::test]
async fn security_headers_are_set() {
    let github = MockServer::start().await;
    let app = app_with(
        github_client(&github),
        RoastPipeline::unconfigured(PipelineConfig::new()),
        unconfigured_tts(),
    );

    let response = get(&app, "/api/health").await;
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
}
