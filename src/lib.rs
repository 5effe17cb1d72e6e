//! Gitroast - backend and playback engine for The Git Roast Show
//!
//! Fetches a GitHub user's public profile, repos, commits, and events,
//! feeds them to an LLM to generate a comedic roast, converts the roast
//! into a sound/speech script, and drives playback of that script as an
//! explicit state machine.
//!
//! # Roast example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use gitroast::cache::{ApiCache, CacheConfig};
//! use gitroast::github::{GatherLimits, GithubClient, GithubConfig, gather_user_data};
//! use gitroast::llm::{GroqClient, GroqConfig};
//! use gitroast::roast::{PipelineConfig, RoastPipeline};
//! use gitroast::types::Language;
//!
//! #[tokio::main]
//! async fn main() -> gitroast::Result<()> {
//!     let cache = Arc::new(ApiCache::new(&CacheConfig::new()));
//!     let github = GithubClient::new(GithubConfig::default(), cache);
//!     let aggregate = gather_user_data(&github, "octocat", &GatherLimits::default()).await?;
//!
//!     let client = Arc::new(GroqClient::new(GroqConfig::new("gsk-your-key")));
//!     let pipeline = RoastPipeline::new(client, PipelineConfig::new());
//!     let roast = pipeline.generate(&aggregate, Language::En).await;
//!
//!     println!("{}", roast.roast);
//!     Ok(())
//! }
//! ```
//!
//! # Playback example
//!
//! The script converter and sequencer are UI-agnostic; plug in your own
//! [`AudioSink`](playback::AudioSink) and [`TtsEngine`](playback::TtsEngine)
//! and render the [`PlaybackEvent`](playback::PlaybackEvent) stream.

pub mod cache;
pub mod error;
pub mod github;
pub mod llm;
pub mod playback;
pub mod roast;
pub mod script;
pub mod server;
pub mod telemetry;
pub mod tts;
pub mod types;

// Re-export main types at crate root
pub use error::{Result, RoastError};
pub use playback::{Phase, PlaybackEvent, Sequencer, SequencerConfig};
pub use roast::RoastPipeline;
pub use script::{RoastItem, SoundEffect};
pub use types::{GeneratedRoast, Language, UserAggregate};
