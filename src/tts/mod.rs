//! ElevenLabs TTS proxy client.
//!
//! Thin wrapper over the ElevenLabs REST API: synthesize text to MPEG
//! audio, list voices, and report reachability. Also hosts
//! [`clean_text`], which strips stage directions, asides, and emoji so
//! the synthesizer never reads cue markup aloud.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::script::lexer::strip_directions;
use crate::{Result, RoastError};

const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";
/// "Rachel", the ElevenLabs default narrator voice.
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
/// Longest text accepted for one synthesis call.
pub const MAX_TTS_CHARS: usize = 1000;

/// ElevenLabs client configuration.
#[derive(Debug, Clone, Default)]
pub struct TtsConfig {
    /// API key; `None` means the TTS surface reports unavailable.
    pub api_key: Option<String>,
    /// Override the API base URL (tests point this at a mock server).
    pub base_url: Option<String>,
}

/// Per-request voice tuning, passed through to the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
        }
    }
}

/// Provider reachability report for the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TtsStatus {
    pub configured: bool,
    pub reachable: bool,
}

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceSettings,
}

/// ElevenLabs REST client.
pub struct ElevenLabsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ElevenLabsClient {
    /// Create a client from configuration.
    pub fn new(config: TtsConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: config
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: config.api_key,
        }
    }

    /// Whether an API key is configured.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Synthesize `text` into MPEG audio bytes.
    ///
    /// Cleans the text first, rejects oversized input before any
    /// upstream call, and maps provider failures to
    /// [`RoastError::TtsUnavailable`].
    pub async fn synthesize(
        &self,
        text: &str,
        voice_id: Option<&str>,
        settings: Option<VoiceSettings>,
    ) -> Result<Vec<u8>> {
        if text.chars().count() > MAX_TTS_CHARS {
            return Err(RoastError::TextTooLong {
                len: text.chars().count(),
                limit: MAX_TTS_CHARS,
            });
        }
        let Some(api_key) = &self.api_key else {
            return Err(RoastError::TtsUnavailable("no API key configured".into()));
        };

        let cleaned = clean_text(text);
        let voice = voice_id.unwrap_or(DEFAULT_VOICE_ID);
        let settings = settings.unwrap_or_default();
        let body = SynthesizeRequest {
            text: &cleaned,
            model_id: "eleven_multilingual_v2",
            voice_settings: &settings,
        };

        debug!(voice, chars = cleaned.len(), "synthesizing speech");
        let response = self
            .http
            .post(format!("{}/v1/text-to-speech/{voice}", self.base_url))
            .header("xi-api-key", api_key)
            .header("Accept", "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(|e| RoastError::TtsUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(RoastError::TtsUnavailable(format!(
                "provider returned {status}: {message}"
            )));
        }
        Ok(response
            .bytes()
            .await
            .map_err(|e| RoastError::TtsUnavailable(e.to_string()))?
            .to_vec())
    }

    /// List available voices (raw provider JSON, passed through).
    pub async fn voices(&self) -> Result<serde_json::Value> {
        let Some(api_key) = &self.api_key else {
            return Err(RoastError::TtsUnavailable("no API key configured".into()));
        };
        let response = self
            .http
            .get(format!("{}/v1/voices", self.base_url))
            .header("xi-api-key", api_key)
            .send()
            .await
            .map_err(|e| RoastError::TtsUnavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(RoastError::TtsUnavailable(format!(
                "provider returned {}",
                response.status().as_u16()
            )));
        }
        Ok(response
            .json()
            .await
            .map_err(|e| RoastError::TtsUnavailable(e.to_string()))?)
    }

    /// Reachability probe for the status endpoint.
    pub async fn status(&self) -> TtsStatus {
        let configured = self.is_configured();
        if !configured {
            return TtsStatus {
                configured,
                reachable: false,
            };
        }
        let reachable = self.voices().await.is_ok();
        TtsStatus {
            configured,
            reachable,
        }
    }
}

/// Strip everything a synthesizer should not read aloud: stage
/// directions, asides, and emoji/symbol characters.
pub fn clean_text(text: &str) -> String {
    let stripped = strip_directions(text);
    let without_symbols: String = stripped
        .chars()
        .filter(|c| !is_emoji_like(*c))
        .collect();
    without_symbols
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rough emoji/pictograph detection by Unicode block.
fn is_emoji_like(c: char) -> bool {
    matches!(u32::from(c),
        0x1F300..=0x1FAFF   // pictographs, emoticons, symbols
        | 0x2600..=0x27BF   // misc symbols, dingbats
        | 0x2B00..=0x2BFF   // arrows and misc
        | 0xFE00..=0xFE0F   // variation selectors
        | 0x1F1E6..=0x1F1FF // regional indicators
    )
}
