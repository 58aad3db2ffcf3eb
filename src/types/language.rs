//! Output language selection.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MoodbotError;

/// Languages the spoken/translated output can be rendered in.
///
/// English is the default; replies are authored in English and translated
/// only when another target is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "hi")]
    Hindi,
}

impl Language {
    /// All selectable languages, default first.
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::Hindi,
    ];

    /// Two-letter language code used by the web service backends.
    pub const fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::Hindi => "hi",
        }
    }

    /// Human-readable language name.
    pub const fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::Hindi => "Hindi",
        }
    }

    /// Whether this is the default output language (no translation needed).
    pub const fn is_default(&self) -> bool {
        matches!(self, Language::English)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = MoodbotError;

    /// Parse a two-letter code or full language name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "es" | "spanish" => Ok(Language::Spanish),
            "fr" | "french" => Ok(Language::French),
            "hi" | "hindi" => Ok(Language::Hindi),
            other => Err(MoodbotError::InvalidInput(format!(
                "unsupported language: {other}"
            ))),
        }
    }
}
