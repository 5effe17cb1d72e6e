//! Scripted playback: the sequencer state machine and its device seams.
//!
//! The sequencer steps through a [`RoastItem`](crate::script::RoastItem)
//! script one item at a time. Sounds and speech go out through the
//! [`AudioSink`] and [`TtsEngine`] traits so the engine can be embedded
//! behind any UI — and tested with mock devices and a paused clock.
//!
//! The design favours forward progress over exact synchronisation:
//! every wait carries its own timeout, so a broken audio asset or a TTS
//! engine that never signals completion degrades to a slightly quieter
//! show, never a stalled one.

mod sequencer;

pub use sequencer::{Phase, PlaybackEvent, Sequencer, SequencerConfig};

use async_trait::async_trait;

use crate::Result;

/// Plays sound-effect assets.
#[async_trait]
pub trait AudioSink: Send + Sync {
    /// Play one asset to completion.
    ///
    /// The sequencer bounds this call with its own timeout; a sink that
    /// hangs or errors is skipped, not fatal.
    async fn play(&self, file: &str) -> Result<()>;
}

/// Speaks sentence text.
#[async_trait]
pub trait TtsEngine: Send + Sync {
    /// Speak one sentence to completion.
    async fn speak(&self, text: &str) -> Result<()>;

    /// Best-effort cancellation of any in-flight utterance.
    fn cancel(&self);
}
