//! Provider traits for capability-specific implementations.
//!
//! Each external collaborator sits behind its own trait (`SentimentAnalyzer`,
//! `SpeechToText`, `Translator`, `SpeechSynthesizer`) rather than a single
//! "god trait", so backends can be swapped per capability and stubbed
//! independently in tests.
//!
//! Every call is attempted exactly once: there are no fallback chains and no
//! retry decorators, and a provider error is surfaced to the caller as-is.

use async_trait::async_trait;

use crate::Result;
use crate::capture::AudioClip;
use crate::types::{Language, Translation};

// ============================================================================
// Sentiment Analyzer
// ============================================================================

/// Provider of a single scalar sentiment polarity.
///
/// Implementations return a score in [-1.0, 1.0]: negative for unfavorable
/// text, positive for favorable, 0.0 when the text carries no signal the
/// analyzer understands.
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    /// Analyzer name for logging/debugging.
    fn name(&self) -> &str;

    /// Score the sentiment polarity of `text`.
    async fn polarity(&self, text: &str) -> Result<f32>;
}

// ============================================================================
// Speech To Text
// ============================================================================

/// Provider for speech recognition.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Transcribe a captured audio clip.
    ///
    /// `locale` is a BCP 47 tag such as `en-US`. Returns
    /// [`MoodbotError::Unrecognized`](crate::MoodbotError::Unrecognized) when
    /// the backend heard the audio but produced no transcript, and
    /// [`MoodbotError::Recognition`](crate::MoodbotError::Recognition) for
    /// backend failures.
    async fn transcribe(&self, clip: &AudioClip, locale: &str) -> Result<String>;
}

// ============================================================================
// Translator
// ============================================================================

/// Provider for text translation.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Translate `text` from `source` into `target`.
    async fn translate(&self, text: &str, source: Language, target: Language)
    -> Result<Translation>;
}

// ============================================================================
// Speech Synthesizer
// ============================================================================

/// Provider for speech synthesis.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Render `text` in `language` as playable audio bytes (MP3).
    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>>;
}

// ============================================================================
// Tests
// ============================================================================
