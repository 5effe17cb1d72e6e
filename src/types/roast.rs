//! Roast output types and target languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RoastError;

/// Target language for a generated roast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    Hi,
    Zh,
    Ja,
    Ru,
}

impl Language {
    /// ISO 639-1 code, as used in the API surface.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Hi => "hi",
            Language::Zh => "zh",
            Language::Ja => "ja",
            Language::Ru => "ru",
        }
    }

    /// English name of the language, for embedding in prompts.
    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::De => "German",
            Language::Hi => "Hindi",
            Language::Zh => "Chinese",
            Language::Ja => "Japanese",
            Language::Ru => "Russian",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = RoastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            "fr" => Ok(Language::Fr),
            "de" => Ok(Language::De),
            "hi" => Ok(Language::Hi),
            "zh" => Ok(Language::Zh),
            "ja" => Ok(Language::Ja),
            "ru" => Ok(Language::Ru),
            other => Err(RoastError::Configuration(format!(
                "unsupported language: {other}"
            ))),
        }
    }
}

/// One generated roast, genuine or canned.
///
/// `fallback` is true iff no LLM call succeeded; `attempts` records how
/// many LLM calls were tried before settling (1–3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedRoast {
    pub roast: String,
    pub fallback: bool,
    pub model: String,
    pub language: Language,
    pub attempts: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_round_trips_through_code() {
        for lang in [
            Language::En,
            Language::Es,
            Language::Fr,
            Language::De,
            Language::Hi,
            Language::Zh,
            Language::Ja,
            Language::Ru,
        ] {
            assert_eq!(lang.code().parse::<Language>().unwrap(), lang);
        }
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn language_serializes_as_code() {
        let json = serde_json::to_string(&Language::Es).unwrap();
        assert_eq!(json, "\"es\"");
    }
}
