//! The playback sequencer state machine.
//!
//! `Idle → Playing(i) → Complete`, driven by [`Sequencer::advance`].
//! Sound items show a cue and play audio under a 3 s timeout. Speech
//! items run a character-timed typing animation concurrently with TTS,
//! joined with a text-length-proportional fallback timeout and a
//! minimum-visible floor. When a speech item is followed by a sound
//! item, the sound's cue is pre-shown and its audio played before the
//! text is hidden, and the sequencer advances by two — the sound's own
//! turn was consumed by the overlap.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, timeout};
use tracing::{debug, warn};

use crate::script::{RoastItem, SoundEffect};
use crate::telemetry;

use super::{AudioSink, TtsEngine};

/// Sequencer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Script loaded, nothing played yet.
    Idle,
    /// Item `i` is the next to play.
    Playing(usize),
    /// Script finished (or cancelled).
    Complete,
}

/// Observable playback events, in emission order.
///
/// A UI renders these; tests assert on them.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// Item `index` started playing.
    ItemStarted { index: usize },
    /// A sound cue became visible.
    CueShown {
        index: usize,
        cue: String,
        emoji: String,
    },
    /// The current cue was cleared.
    CueCleared,
    /// Typing began for a speech item.
    TypingStarted { index: usize },
    /// The typed prefix grew.
    TextTyped { index: usize, text: String },
    /// The speech text was hidden.
    TextHidden,
    /// The whole script finished.
    Completed,
}

/// Timing knobs for the sequencer.
#[derive(Debug, Clone)]
pub struct SequencerConfig {
    /// Cap on one sound asset playing. Default: 3 s.
    pub sound_timeout: Duration,
    /// Safety timeout after which a stuck in-flight advance is forcibly
    /// cleared, restoring liveness. Default: 15 s.
    pub advance_guard: Duration,
    /// Minimum time a speech item stays on screen. Default: 800 ms.
    pub min_visible: Duration,
    /// Per-character typing delay, derived from narration speed so the
    /// animation and the audio finish close together. Default: 70 ms.
    pub char_delay: Duration,
    /// Ceiling on one speech item's estimated duration. Default: 8 s.
    pub max_speech: Duration,
    /// Slack added to the estimated duration before TTS is abandoned.
    /// Default: 2 s.
    pub tts_grace: Duration,
    /// Pause before the completion callback fires. Default: 500 ms.
    pub completion_delay: Duration,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            sound_timeout: Duration::from_secs(3),
            advance_guard: Duration::from_secs(15),
            min_visible: Duration::from_millis(800),
            char_delay: Duration::from_millis(70),
            max_speech: Duration::from_secs(8),
            tts_grace: Duration::from_secs(2),
            completion_delay: Duration::from_millis(500),
        }
    }
}

impl SequencerConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimated narration duration for one sentence.
    pub fn speech_duration(&self, text: &str) -> Duration {
        let est = self.char_delay.saturating_mul(text.chars().count() as u32);
        est.clamp(self.min_visible, self.max_speech)
    }
}

/// The playback state machine.
pub struct Sequencer {
    script: Vec<RoastItem>,
    phase: Phase,
    /// Set while an advance is running; a dropped advance future leaves
    /// it set, and the guard timeout clears it on a later call.
    in_flight: Option<Instant>,
    config: SequencerConfig,
    audio: Arc<dyn AudioSink>,
    tts: Option<Arc<dyn TtsEngine>>,
    events: mpsc::UnboundedSender<PlaybackEvent>,
}

impl Sequencer {
    /// Create a sequencer for one script, returning the event stream.
    pub fn new(
        script: Vec<RoastItem>,
        audio: Arc<dyn AudioSink>,
        tts: Option<Arc<dyn TtsEngine>>,
        config: SequencerConfig,
    ) -> (Self, mpsc::UnboundedReceiver<PlaybackEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Self {
                script,
                phase: Phase::Idle,
                in_flight: None,
                config,
                audio,
                tts,
                events,
            },
            rx,
        )
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Replace the script and reset to `Idle`.
    ///
    /// Cancels any in-flight TTS utterance; the old session has no
    /// meaning once a new script is loaded.
    pub fn load(&mut self, script: Vec<RoastItem>) {
        if let Some(tts) = &self.tts {
            tts.cancel();
        }
        self.script = script;
        self.phase = Phase::Idle;
        self.in_flight = None;
    }

    /// Cancel the session outright.
    pub fn cancel(&mut self) {
        if let Some(tts) = &self.tts {
            tts.cancel();
        }
        self.phase = Phase::Complete;
        self.in_flight = None;
    }

    /// Run the script to completion.
    pub async fn run(&mut self) {
        while self.phase != Phase::Complete {
            self.advance().await;
        }
    }

    /// Take one step of the state machine.
    ///
    /// Re-entrancy is cooperative: if a previous advance is still
    /// marked in flight, the call is a no-op until the guard timeout
    /// expires, at which point the stale marker is cleared and playback
    /// resumes.
    pub async fn advance(&mut self) {
        if let Some(started) = self.in_flight {
            if started.elapsed() < self.config.advance_guard {
                debug!("advance skipped, previous step still in flight");
                return;
            }
            warn!("in-flight guard expired, forcing playback forward");
            self.in_flight = None;
        }

        match self.phase {
            Phase::Complete => {}
            Phase::Idle => {
                self.phase = if self.script.is_empty() {
                    let _ = self.events.send(PlaybackEvent::Completed);
                    Phase::Complete
                } else {
                    Phase::Playing(0)
                };
            }
            Phase::Playing(index) => {
                self.in_flight = Some(Instant::now());
                let step = self.play_item(index).await;
                self.in_flight = None;

                let next = index + step;
                if next >= self.script.len() {
                    tokio::time::sleep(self.config.completion_delay).await;
                    let _ = self.events.send(PlaybackEvent::Completed);
                    self.phase = Phase::Complete;
                } else {
                    self.phase = Phase::Playing(next);
                }
            }
        }
    }

    /// Play item `index`, returning how far to advance (1 or 2).
    async fn play_item(&self, index: usize) -> usize {
        let _ = self.events.send(PlaybackEvent::ItemStarted { index });
        match &self.script[index] {
            RoastItem::Sound { effect, .. } => {
                self.play_sound(index, *effect).await;
                let _ = self.events.send(PlaybackEvent::CueCleared);
                1
            }
            RoastItem::Speech { text } => self.play_speech(index, text).await,
        }
    }

    /// Show a cue and play its audio, bounded by the sound timeout.
    async fn play_sound(&self, index: usize, effect: SoundEffect) {
        let _ = self.events.send(PlaybackEvent::CueShown {
            index,
            cue: effect.cue().to_string(),
            emoji: effect.emoji().to_string(),
        });
        match timeout(self.config.sound_timeout, self.audio.play(effect.file())).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(effect = ?effect, error = %e, "sound playback failed, continuing");
            }
            Err(_) => {
                metrics::counter!(telemetry::PLAYBACK_TIMEOUTS_TOTAL, "kind" => "sound")
                    .increment(1);
                warn!(effect = ?effect, "sound playback timed out, continuing");
            }
        }
    }

    /// Type out a sentence while TTS narrates it; wait for the typing
    /// animation, the minimum-visible floor, and (bounded) TTS.
    async fn play_speech(&self, index: usize, text: &str) -> usize {
        let _ = self.events.send(PlaybackEvent::TypingStarted { index });
        let duration = self.config.speech_duration(text);
        let char_count = text.chars().count().max(1);
        let per_char = duration / char_count as u32;

        let typing = async {
            let mut typed = String::with_capacity(text.len());
            for c in text.chars() {
                tokio::time::sleep(per_char).await;
                typed.push(c);
                let _ = self.events.send(PlaybackEvent::TextTyped {
                    index,
                    text: typed.clone(),
                });
            }
        };

        let narration = async {
            if let Some(tts) = &self.tts {
                let deadline = duration + self.config.tts_grace;
                match timeout(deadline, tts.speak(text)).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        warn!(error = %e, "TTS failed, continuing without narration");
                    }
                    Err(_) => {
                        metrics::counter!(telemetry::PLAYBACK_TIMEOUTS_TOTAL, "kind" => "tts")
                            .increment(1);
                        debug!("TTS completion never signalled, timer fallback fired");
                        tts.cancel();
                    }
                }
            }
        };

        let floor = tokio::time::sleep(self.config.min_visible);
        tokio::join!(typing, narration, floor);

        // Pacing overlap: a directly following sound item plays while
        // the text is still visible, and its turn is consumed here.
        if let Some(RoastItem::Sound { effect, .. }) = self.script.get(index + 1) {
            self.play_sound(index + 1, *effect).await;
            let _ = self.events.send(PlaybackEvent::TextHidden);
            let _ = self.events.send(PlaybackEvent::CueCleared);
            2
        } else {
            let _ = self.events.send(PlaybackEvent::TextHidden);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speech_duration_scales_with_length_and_clamps() {
        let config = SequencerConfig::new();
        assert_eq!(config.speech_duration("hi"), config.min_visible);
        let long = "x".repeat(500);
        assert_eq!(config.speech_duration(&long), config.max_speech);
        let mid = "x".repeat(20);
        assert_eq!(config.speech_duration(&mid), Duration::from_millis(1400));
    }
}
