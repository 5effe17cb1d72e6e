//! Keyword classifier for stage-direction spans.
//!
//! Maps free-form direction text (`"crowd laughs"`, `"rimshot"`,
//! `"the audience gasps audibly"`) onto the closed [`SoundEffect`] set.
//! Unrecognised directions get the default effect rather than being
//! dropped, so a creative model never silences the show.

use super::SoundEffect;

/// Effect used when no keyword matches.
pub const DEFAULT_EFFECT: SoundEffect = SoundEffect::Laugh;

/// Classify a stage direction (delimiters already stripped).
pub fn classify_direction(direction: &str) -> SoundEffect {
    let lower = direction.to_lowercase();
    let has = |needle: &str| lower.contains(needle);

    if has("mic drop") || has("drops the mic") {
        SoundEffect::MicDrop
    } else if has("rimshot") || has("ba dum") || has("drum") {
        SoundEffect::Rimshot
    } else if has("cricket") {
        SoundEffect::Crickets
    } else if has("gasp") {
        SoundEffect::Gasp
    } else if has("horn") {
        SoundEffect::Airhorn
    } else if has("boo") || has("hiss") {
        SoundEffect::Boo
    } else if has("applau") || has("clap") || has("cheer") || has("wild") {
        SoundEffect::Applause
    } else if has("laugh") || has("chuckle") || has("giggle") {
        SoundEffect::Laugh
    } else {
        DEFAULT_EFFECT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_cues_classify() {
        assert_eq!(classify_direction("crowd laughs"), SoundEffect::Laugh);
        assert_eq!(classify_direction("rimshot"), SoundEffect::Rimshot);
        assert_eq!(classify_direction("crickets chirp"), SoundEffect::Crickets);
        assert_eq!(classify_direction("audience gasps"), SoundEffect::Gasp);
        assert_eq!(classify_direction("air horn"), SoundEffect::Airhorn);
        assert_eq!(classify_direction("crowd boos"), SoundEffect::Boo);
    }

    #[test]
    fn variants_and_case_are_tolerated() {
        assert_eq!(
            classify_direction("The Audience GASPS audibly"),
            SoundEffect::Gasp
        );
        assert_eq!(classify_direction("ba dum tss"), SoundEffect::Rimshot);
        assert_eq!(classify_direction("wild cheering"), SoundEffect::Applause);
        assert_eq!(classify_direction("drops the mic"), SoundEffect::MicDrop);
    }

    #[test]
    fn unknown_directions_get_default() {
        assert_eq!(classify_direction("dramatic pause"), DEFAULT_EFFECT);
        assert_eq!(classify_direction(""), DEFAULT_EFFECT);
    }
}
