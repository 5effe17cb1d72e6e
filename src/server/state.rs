//! Shared application state, built once at startup.
//!
//! All upstream clients are constructed from [`Config`] and injected
//! here; request handlers only ever see this struct. No module-level
//! singletons — a missing credential is an explicit `None`/unconfigured
//! pipeline, and the degrade-to-fallback behaviour follows from that.

use std::sync::Arc;
use std::time::Instant;

use crate::cache::ApiCache;
use crate::github::{GatherLimits, GithubClient, GithubConfig};
use crate::llm::{GroqClient, GroqConfig};
use crate::roast::{PipelineConfig, RoastPipeline};
use crate::tts::{ElevenLabsClient, TtsConfig};

use super::config::{Config, LlmProvider};

const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const OPENROUTER_MODEL: &str = "meta-llama/llama-3.3-70b-instruct";

/// Handle to everything the routes need.
pub struct AppState {
    pub github: GithubClient,
    pub pipeline: RoastPipeline,
    pub tts: ElevenLabsClient,
    pub limits: GatherLimits,
    pub environment: String,
    pub started_at: Instant,
}

/// State as shared with axum handlers.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build the full state from configuration.
    pub fn from_config(config: &Config) -> SharedState {
        let cache = Arc::new(ApiCache::new(&config.cache));
        let github = GithubClient::new(
            GithubConfig {
                token: config.github_token.clone(),
                base_url: None,
            },
            cache,
        );

        let pipeline = match &config.llm_api_key {
            Some((provider, key)) => {
                let groq_config = match provider {
                    LlmProvider::Groq => GroqConfig::new(key),
                    LlmProvider::OpenRouter => GroqConfig::new(key)
                        .base_url(OPENROUTER_BASE_URL)
                        .model(OPENROUTER_MODEL),
                };
                RoastPipeline::new(Arc::new(GroqClient::new(groq_config)), PipelineConfig::new())
            }
            None => RoastPipeline::unconfigured(PipelineConfig::new()),
        };

        let tts = ElevenLabsClient::new(TtsConfig {
            api_key: config.elevenlabs_api_key.clone(),
            base_url: None,
        });

        Arc::new(Self {
            github,
            pipeline,
            tts,
            limits: GatherLimits::default(),
            environment: config.environment.clone(),
            started_at: Instant::now(),
        })
    }

    /// State with explicit components, for tests.
    pub fn with_components(
        github: GithubClient,
        pipeline: RoastPipeline,
        tts: ElevenLabsClient,
    ) -> SharedState {
        Arc::new(Self {
            github,
            pipeline,
            tts,
            limits: GatherLimits::default(),
            environment: "test".to_string(),
            started_at: Instant::now(),
        })
    }
}
