//! Chat-completion client seam.
//!
//! [`ChatClient`] abstracts the completion endpoint so the roast
//! pipeline can be tested against mock providers. [`GroqClient`] is the
//! production implementation, speaking the OpenAI-compatible wire format
//! that Groq and OpenRouter share.

mod groq;

pub use groq::{GroqClient, GroqConfig};

use async_trait::async_trait;

use crate::Result;

/// A provider that can turn a prompt into completion text.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Provider name, for logs and metrics.
    fn name(&self) -> &str;

    /// Model identifier reported in [`GeneratedRoast`](crate::types::GeneratedRoast).
    fn model(&self) -> &str;

    /// Run one chat completion and return the assistant's text.
    ///
    /// Must return [`RoastError::EmptyResponse`](crate::RoastError::EmptyResponse)
    /// rather than an empty string.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}
