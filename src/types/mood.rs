//! Mood classification types.
//!
//! A mood is the discretized verdict over a continuous sentiment score in
//! [-1, 1]. The thresholds here are the single source of truth for the
//! three-way split.

use serde::{Deserialize, Serialize};

/// Combined scores strictly above this value classify as positive.
pub const POSITIVE_THRESHOLD: f32 = 0.1;

/// Combined scores strictly below this value classify as negative.
pub const NEGATIVE_THRESHOLD: f32 = -0.1;

/// The classified mood label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    /// Text reads as favorable.
    Positive,
    /// Text reads as unfavorable.
    Negative,
    /// Text is neither, or the signal is too weak to call.
    Neutral,
}

impl MoodLabel {
    /// Classify a combined sentiment score.
    ///
    /// The inequalities are strict, so the boundary values `0.1` and `-0.1`
    /// fall into `Neutral`.
    pub fn from_score(score: f32) -> Self {
        if score > POSITIVE_THRESHOLD {
            MoodLabel::Positive
        } else if score < NEGATIVE_THRESHOLD {
            MoodLabel::Negative
        } else {
            MoodLabel::Neutral
        }
    }

    /// Lowercase label name, used for metric labels and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::Positive => "positive",
            MoodLabel::Negative => "negative",
            MoodLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one piece of text.
///
/// Created fresh on every classification call; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// The determined mood label, a deterministic function of `score`.
    pub label: MoodLabel,
    /// Combined sentiment score in [-1.0, 1.0].
    pub score: f32,
}

impl SentimentResult {
    /// Create a sentiment result from a combined score.
    ///
    /// The score is clamped to [-1.0, 1.0] and the label derived from the
    /// clamped value, so both data-model invariants hold by construction.
    pub fn from_score(score: f32) -> Self {
        let score = score.clamp(-1.0, 1.0);
        Self {
            label: MoodLabel::from_score(score),
            score,
        }
    }

    /// Normalized confidence for display: maps score [-1, 1] → [0, 1].
    pub fn confidence(&self) -> f32 {
        (self.score + 1.0) / 2.0
    }
}
