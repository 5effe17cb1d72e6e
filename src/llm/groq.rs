//! OpenAI-compatible chat-completion client for Groq/OpenRouter.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Result, RoastError};

use super::ChatClient;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Groq client configuration.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: String,
    /// Model identifier. Default: `llama-3.3-70b-versatile`.
    pub model: String,
    /// Override the API base URL (tests point this at a mock server).
    pub base_url: Option<String>,
    /// Sampling temperature. Roasts want some heat. Default: 0.9.
    pub temperature: f32,
    /// Completion token cap. Default: 600.
    pub max_tokens: u32,
}

impl GroqConfig {
    /// Config with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            temperature: 0.9,
            max_tokens: 600,
        }
    }

    /// Set the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
}

/// Chat-completion client for the Groq API.
pub struct GroqClient {
    http: reqwest::Client,
    base_url: String,
    config: GroqConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl GroqClient {
    /// Create a client from configuration.
    pub fn new(config: GroqConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            http,
            base_url,
            config,
        }
    }
}

#[async_trait]
impl ChatClient for GroqClient {
    fn name(&self) -> &str {
        "groq"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: system,
                },
                WireMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs);
            return Err(RoastError::RateLimited { retry_after });
        }
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            let err = RoastError::Api { status, message };
            // Some providers report throttling as 400/503 with a
            // rate-limit body rather than a 429 status.
            if err.is_rate_limit() {
                return Err(RoastError::RateLimited { retry_after: None });
            }
            return Err(err);
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        let content = content.trim();
        if content.is_empty() {
            return Err(RoastError::EmptyResponse);
        }
        Ok(content.to_string())
    }
}
