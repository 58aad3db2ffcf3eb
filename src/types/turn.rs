//! Chat turn types.
//!
//! A turn is one complete input → classify → reply → (translate) → (speak)
//! evaluation. Stage failures after reply selection are non-fatal and ride
//! inside the outcome instead of aborting it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::language::Language;
use crate::types::mood::SentimentResult;

/// A scripted reply produced by the response selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// The reply text, always authored in English.
    pub text: String,
    /// True when this reply closes the conversation.
    pub farewell: bool,
}

impl Reply {
    pub(crate) fn scripted(text: &str) -> Self {
        Self {
            text: text.to_string(),
            farewell: false,
        }
    }

    pub(crate) fn farewell(text: &str) -> Self {
        Self {
            text: text.to_string(),
            farewell: true,
        }
    }
}

/// A reply translated into the selected output language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// The translated text.
    pub text: String,
    /// Language the text was translated from.
    pub source: Language,
    /// Language the text was translated into.
    pub target: Language,
}

/// A synthesized spoken reply, written to an audio artifact on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenReply {
    /// Path of the rendered audio file.
    pub path: PathBuf,
    /// Language the audio was synthesized in.
    pub language: Language,
}

/// Everything one chat turn produced.
///
/// `translation` and `speech` are `None` when the stage did not apply
/// (default language, speech disabled) and `Some(Err(..))` when the stage
/// ran and failed; a failed stage never erases the earlier ones.
#[derive(Debug)]
pub struct TurnOutcome {
    /// The raw input text for this turn.
    pub input: String,
    /// Sentiment verdict for the input.
    pub sentiment: SentimentResult,
    /// The selected reply.
    pub reply: Reply,
    /// Translation stage result, when a non-default language is selected.
    pub translation: Option<Result<Translation>>,
    /// Speech stage result, when spoken output is enabled.
    pub speech: Option<Result<SpokenReply>>,
}

impl TurnOutcome {
    /// True when this turn ends the conversation.
    pub fn is_farewell(&self) -> bool {
        self.reply.farewell
    }

    /// The text to show in the selected output language: the translation
    /// when one succeeded, otherwise the untranslated reply.
    pub fn display_text(&self) -> &str {
        match &self.translation {
            Some(Ok(translation)) => &translation.text,
            _ => &self.reply.text,
        }
    }
}
