//! Roast text → ordered script conversion.
//!
//! Strips stage directions, segments sentences, and interleaves sound
//! items: a fixed opening cue, a ~0.7-probability random effect after
//! each sentence, and a closing mic drop. Deterministic apart from that
//! one sampling step; [`to_items_seeded`] pins the RNG for tests.
//!
//! Edge case: empty or whitespace-only input still yields a one-item
//! script — playback must never see a zero-length sequence.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::lexer::strip_directions;
use super::{RoastItem, SoundEffect};

/// Probability of a sound effect after each sentence.
pub const SOUND_PROBABILITY: f64 = 0.7;

/// Split cleaned text on sentence-ending punctuation.
///
/// Each sentence keeps its terminator; empty fragments (e.g. from
/// `"?!"` runs) are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let trimmed = current.trim();
            if trimmed.chars().any(|c| c.is_alphanumeric()) {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }
    let tail = current.trim();
    if tail.chars().any(|c| c.is_alphanumeric()) {
        sentences.push(tail.to_string());
    }
    sentences
}

/// Convert roast text into the playable script.
pub fn to_items(roast_text: &str, username: &str) -> Vec<RoastItem> {
    convert(roast_text, username, &mut rand::rng())
}

/// [`to_items`] with a fixed RNG seed, for deterministic tests.
pub fn to_items_seeded(roast_text: &str, username: &str, seed: u64) -> Vec<RoastItem> {
    convert(roast_text, username, &mut StdRng::seed_from_u64(seed))
}

fn convert<R: Rng>(roast_text: &str, username: &str, rng: &mut R) -> Vec<RoastItem> {
    let cleaned = strip_directions(roast_text);
    let sentences = split_sentences(&cleaned);

    if sentences.is_empty() {
        // The show goes on even with nothing to say.
        return vec![RoastItem::speech(format!(
            "Well, {username} broke the roast machine. No roast generated!"
        ))];
    }

    let mut items = Vec::with_capacity(sentences.len() * 2 + 2);
    items.push(RoastItem::sound(SoundEffect::Applause));
    let last = sentences.len() - 1;
    for (i, sentence) in sentences.into_iter().enumerate() {
        items.push(RoastItem::speech(sentence));
        // No random effect right before the mic drop.
        if i != last && rng.random::<f64>() < SOUND_PROBABILITY {
            if let Some(effect) = SoundEffect::PALETTE.choose(rng) {
                items.push(RoastItem::sound(*effect));
            }
        }
    }
    items.push(RoastItem::sound(SoundEffect::MicDrop));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_punctuation() {
        let sentences = split_sentences("One. Two! Three? Four");
        assert_eq!(sentences, vec!["One.", "Two!", "Three?", "Four"]);
    }

    #[test]
    fn drops_empty_fragments() {
        let sentences = split_sentences("What?! No way...");
        assert_eq!(sentences, vec!["What?", "No way."]);
    }

    #[test]
    fn empty_text_yields_fallback_speech() {
        for input in ["", "   ", "\n\t", "*crowd laughs*"] {
            let items = to_items_seeded(input, "octocat", 1);
            assert_eq!(items.len(), 1, "input {input:?}");
            match &items[0] {
                RoastItem::Speech { text } => assert!(text.contains("octocat")),
                other => panic!("expected speech, got {other:?}"),
            }
        }
    }

    #[test]
    fn script_opens_with_applause_and_closes_with_mic_drop() {
        let items = to_items_seeded("First. Second.", "octocat", 42);
        assert_eq!(items.first(), Some(&RoastItem::sound(SoundEffect::Applause)));
        assert_eq!(items.last(), Some(&RoastItem::sound(SoundEffect::MicDrop)));
    }

    #[test]
    fn speech_order_follows_sentence_order() {
        let items = to_items_seeded("Alpha. Beta! Gamma?", "octocat", 7);
        let speeches: Vec<&str> = items
            .iter()
            .filter_map(|i| match i {
                RoastItem::Speech { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(speeches, vec!["Alpha.", "Beta!", "Gamma?"]);
    }

    #[test]
    fn interleaved_sounds_come_from_the_palette() {
        let items = to_items_seeded(
            "One. Two. Three. Four. Five. Six. Seven. Eight.",
            "octocat",
            3,
        );
        for item in &items[1..items.len() - 1] {
            if let RoastItem::Sound { effect, .. } = item {
                assert!(
                    SoundEffect::PALETTE.contains(effect),
                    "{effect:?} not in palette"
                );
            }
        }
    }

    #[test]
    fn round_trip_reconstructs_text_minus_directions() {
        let input = "Hello crowd! *air horn* This code is bold. (pause) Very bold?";
        let items = to_items_seeded(input, "octocat", 9);
        let spoken: Vec<String> = items
            .iter()
            .filter_map(|i| match i {
                RoastItem::Speech { text } => {
                    Some(text.trim_end_matches(['.', '!', '?']).to_string())
                }
                _ => None,
            })
            .collect();
        assert_eq!(spoken.join(" "), "Hello crowd This code is bold Very bold");
    }
}
