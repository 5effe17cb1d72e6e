//! Roast script model and the text → script pipeline.
//!
//! A roast arrives as free text with `*stage direction*` markers. Three
//! stages turn it into a playable script:
//!
//! 1. [`lexer`] — split the text into literal spans, `*...*` stage
//!    directions, and `(...)` asides.
//! 2. [`classify`] — map stage-direction text onto the closed
//!    [`SoundEffect`] set.
//! 3. [`convert`] — segment sentences and interleave sound items into
//!    the ordered [`RoastItem`] sequence the sequencer plays.

pub mod classify;
pub mod convert;
pub mod lexer;

pub use classify::classify_direction;
pub use convert::{SOUND_PROBABILITY, split_sentences, to_items, to_items_seeded};
pub use lexer::{Span, lex, strip_directions};

use serde::{Deserialize, Serialize};

/// The closed set of playable sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundEffect {
    Laugh,
    Rimshot,
    Crickets,
    Gasp,
    Airhorn,
    Boo,
    Applause,
    MicDrop,
}

impl SoundEffect {
    /// The six effects eligible for random interleaving. Applause and
    /// mic-drop are reserved for the opening and closing cues.
    pub const PALETTE: [SoundEffect; 6] = [
        SoundEffect::Laugh,
        SoundEffect::Rimshot,
        SoundEffect::Crickets,
        SoundEffect::Gasp,
        SoundEffect::Airhorn,
        SoundEffect::Boo,
    ];

    /// On-screen cue text.
    pub fn cue(&self) -> &'static str {
        match self {
            SoundEffect::Laugh => "*crowd laughs*",
            SoundEffect::Rimshot => "*ba dum tss*",
            SoundEffect::Crickets => "*crickets chirp*",
            SoundEffect::Gasp => "*audience gasps*",
            SoundEffect::Airhorn => "*air horn*",
            SoundEffect::Boo => "*crowd boos*",
            SoundEffect::Applause => "*crowd goes wild*",
            SoundEffect::MicDrop => "*mic drop*",
        }
    }

    /// On-screen emoji accompanying the cue.
    pub fn emoji(&self) -> &'static str {
        match self {
            SoundEffect::Laugh => "😂",
            SoundEffect::Rimshot => "🥁",
            SoundEffect::Crickets => "🦗",
            SoundEffect::Gasp => "😱",
            SoundEffect::Airhorn => "📯",
            SoundEffect::Boo => "👎",
            SoundEffect::Applause => "👏",
            SoundEffect::MicDrop => "🎤",
        }
    }

    /// Relative path of the audio asset.
    pub fn file(&self) -> &'static str {
        match self {
            SoundEffect::Laugh => "sounds/laugh.mp3",
            SoundEffect::Rimshot => "sounds/rimshot.mp3",
            SoundEffect::Crickets => "sounds/crickets.mp3",
            SoundEffect::Gasp => "sounds/gasp.mp3",
            SoundEffect::Airhorn => "sounds/airhorn.mp3",
            SoundEffect::Boo => "sounds/boo.mp3",
            SoundEffect::Applause => "sounds/applause.mp3",
            SoundEffect::MicDrop => "sounds/micdrop.mp3",
        }
    }
}

/// One item of the playable script. Order is playback order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoastItem {
    Speech {
        text: String,
    },
    Sound {
        effect: SoundEffect,
        cue: String,
        emoji: String,
        file: String,
    },
}

impl RoastItem {
    /// Speech item from sentence text.
    pub fn speech(text: impl Into<String>) -> Self {
        RoastItem::Speech { text: text.into() }
    }

    /// Sound item carrying the effect's cue, emoji, and asset path.
    pub fn sound(effect: SoundEffect) -> Self {
        RoastItem::Sound {
            effect,
            cue: effect.cue().to_string(),
            emoji: effect.emoji().to_string(),
            file: effect.file().to_string(),
        }
    }

    /// Whether this is a sound item.
    pub fn is_sound(&self) -> bool {
        matches!(self, RoastItem::Sound { .. })
    }
}
