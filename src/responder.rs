//! Conversational response selection.
//!
//! Maps a mood verdict to one of a fixed set of scripted replies, with a
//! special-cased farewell trigger. No learning, no per-user memory, no
//! randomness.

use crate::types::{MoodLabel, Reply, SentimentResult};

/// The literal whole-message farewell trigger, compared case-insensitively.
pub const FAREWELL_TRIGGER: &str = "bye";

pub const POSITIVE_REPLY: &str =
    "🌟 I'm glad you're feeling positive! What's making you happy today?";
pub const NEGATIVE_REPLY: &str =
    "😟 I'm sorry to hear that you're feeling down. Want to talk about it?";
pub const NEUTRAL_REPLY: &str =
    "🤔 Hmm, that's interesting. Tell me more about what's on your mind.";
pub const FAREWELL_REPLY: &str = "👋 Goodbye! Take care!";

/// Selects the scripted reply for one turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseSelector;

impl ResponseSelector {
    /// Create a response selector.
    pub fn new() -> Self {
        Self
    }

    /// Select the reply for `input` under the given sentiment verdict.
    ///
    /// The farewell check is an exact whole-string comparison against
    /// "bye", ignoring ASCII case only: nothing is trimmed and substrings
    /// do not trigger it. A farewell short-circuits the mood mapping.
    pub fn select(&self, input: &str, sentiment: &SentimentResult) -> Reply {
        if input.eq_ignore_ascii_case(FAREWELL_TRIGGER) {
            return Reply::farewell(FAREWELL_REPLY);
        }

        let text = match sentiment.label {
            MoodLabel::Positive => POSITIVE_REPLY,
            MoodLabel::Negative => NEGATIVE_REPLY,
            MoodLabel::Neutral => NEUTRAL_REPLY,
        };
        Reply::scripted(text)
    }
}
