//! Chat sessions: explicit per-conversation state and the turn pipeline.
//!
//! A [`Session`] owns what the original UI kept in implicit widget state —
//! output language, speak flag, listen options — plus the configured
//! providers, and evaluates one turn at a time: classify → reply →
//! (translate) → (speak). Turns are otherwise stateless; no history is
//! retained across them.

mod builder;

pub use builder::{Moodbot, SessionBuilder};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::cache::ResponseCache;
use crate::capture::VoiceCapture;
use crate::classifier::MoodClassifier;
use crate::error::{MoodbotError, Result};
use crate::providers::{SpeechSynthesizer, Translator};
use crate::responder::ResponseSelector;
use crate::telemetry;
use crate::types::{Language, ListenOptions, SpokenReply, Translation, TurnOutcome};

/// Fixed artifact filename spoken replies are written to, relative to the
/// working directory unless the builder overrides it.
pub const DEFAULT_AUDIO_PATH: &str = "response.mp3";

/// One chat session.
///
/// Created via [`Moodbot::builder()`]; dropped (or [`reset`](Session::reset))
/// at conversation end. A farewell turn marks the session ended but does not
/// lock it — turns are independent, and the front-end decides when to stop.
pub struct Session {
    classifier: MoodClassifier,
    selector: ResponseSelector,
    translator: Option<Arc<dyn Translator>>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    voice: Option<VoiceCapture>,
    cache: Option<ResponseCache>,
    language: Language,
    speak: bool,
    audio_path: PathBuf,
    ended: bool,
}

impl Session {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        classifier: MoodClassifier,
        selector: ResponseSelector,
        translator: Option<Arc<dyn Translator>>,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
        voice: Option<VoiceCapture>,
        cache: Option<ResponseCache>,
        language: Language,
        speak: bool,
        audio_path: PathBuf,
    ) -> Self {
        Self {
            classifier,
            selector,
            translator,
            synthesizer,
            voice,
            cache,
            language,
            speak,
            audio_path,
            ended: false,
        }
    }

    // ========================================================================
    // Settings surface
    // ========================================================================

    /// Selected output language.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Select the output language for subsequent turns.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Whether spoken output is enabled.
    pub fn speak_enabled(&self) -> bool {
        self.speak
    }

    /// Enable or disable spoken output for subsequent turns.
    pub fn set_speak(&mut self, enabled: bool) {
        self.speak = enabled;
    }

    /// Listen options of the configured voice capture, if any.
    pub fn listen_options(&self) -> Option<ListenOptions> {
        self.voice.as_ref().map(VoiceCapture::options)
    }

    /// Update the listen options. Has no effect without voice capture.
    pub fn set_listen_options(&mut self, options: ListenOptions) {
        if let Some(voice) = &mut self.voice {
            voice.set_options(options);
        }
    }

    /// Where spoken replies are written.
    pub fn audio_path(&self) -> &Path {
        &self.audio_path
    }

    /// True once a farewell turn has been processed.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Re-arm an ended session for a fresh conversation.
    pub fn reset(&mut self) {
        self.ended = false;
    }

    // ========================================================================
    // Turn pipeline
    // ========================================================================

    /// Process one typed turn.
    ///
    /// Empty or whitespace-only input is rejected as invalid before any
    /// analyzer call. Classification failures abort the turn; translation
    /// and synthesis failures do not — they are returned inside the outcome
    /// and the already-computed stages stand.
    #[instrument(skip(self, input), fields(operation = "turn"))]
    pub async fn process_text(&mut self, input: &str) -> Result<TurnOutcome> {
        if input.trim().is_empty() {
            metrics::counter!(
                telemetry::TURNS_TOTAL,
                "mood" => "none",
                "status" => "error",
            )
            .increment(1);
            return Err(MoodbotError::InvalidInput(
                "empty or whitespace-only input".to_string(),
            ));
        }

        let sentiment = match self.classifier.classify(input).await {
            Ok(sentiment) => sentiment,
            Err(e) => {
                metrics::counter!(
                    telemetry::TURNS_TOTAL,
                    "mood" => "none",
                    "status" => "error",
                )
                .increment(1);
                return Err(e);
            }
        };

        let reply = self.selector.select(input, &sentiment);
        if reply.farewell {
            self.ended = true;
            info!("farewell received, session ended");
        }

        let translation = if self.language.is_default() {
            None
        } else {
            Some(self.translate_reply(&reply.text).await)
        };

        let speech = if !self.speak {
            None
        } else if self.language.is_default() {
            Some(self.speak_text(&reply.text).await)
        } else {
            // Speak the translated reply; when translation failed there is
            // no text in the selected language, so the stage is skipped and
            // the translation error stands on its own.
            match &translation {
                Some(Ok(translation)) => Some(self.speak_text(&translation.text).await),
                _ => None,
            }
        };

        metrics::counter!(
            telemetry::TURNS_TOTAL,
            "mood" => sentiment.label.as_str(),
            "status" => "ok",
        )
        .increment(1);

        Ok(TurnOutcome {
            input: input.to_string(),
            sentiment,
            reply,
            translation,
            speech,
        })
    }

    /// Capture one utterance via the configured voice capture.
    pub async fn listen(&self) -> Result<String> {
        let Some(voice) = &self.voice else {
            return Err(MoodbotError::Configuration(
                "no voice capture configured".to_string(),
            ));
        };
        voice.listen().await
    }

    /// Capture one utterance and process it as a turn.
    pub async fn process_voice(&mut self) -> Result<TurnOutcome> {
        let transcript = self.listen().await?;
        debug!(%transcript, "recognized voice input");
        self.process_text(&transcript).await
    }

    // ========================================================================
    // Stages
    // ========================================================================

    async fn translate_reply(&self, text: &str) -> Result<Translation> {
        let Some(translator) = &self.translator else {
            return Err(MoodbotError::Configuration(
                "no translator configured".to_string(),
            ));
        };

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache
                .get_translation(text, Language::English, self.language)
                .await
            {
                debug!(target_lang = %self.language, "translation served from cache");
                return Ok(hit);
            }
        }

        let started = Instant::now();
        let result = translator
            .translate(text, Language::English, self.language)
            .await;
        telemetry::record_service_call("translate", translator.name(), started, result.is_ok());

        match &result {
            Ok(translation) => {
                if let Some(cache) = &self.cache {
                    cache.insert_translation(text, translation.clone()).await;
                }
            }
            Err(e) => warn!(error = %e, "translation failed"),
        }
        result
    }

    async fn speak_text(&self, text: &str) -> Result<SpokenReply> {
        let Some(synthesizer) = &self.synthesizer else {
            return Err(MoodbotError::Configuration(
                "no speech synthesizer configured".to_string(),
            ));
        };

        let cached = if let Some(cache) = &self.cache {
            cache.get_audio(text, self.language).await
        } else {
            None
        };

        let bytes = match cached {
            Some(bytes) => {
                debug!(language = %self.language, "synthesized audio served from cache");
                bytes
            }
            None => {
                let started = Instant::now();
                let result = synthesizer.synthesize(text, self.language).await;
                telemetry::record_service_call(
                    "synthesize",
                    synthesizer.name(),
                    started,
                    result.is_ok(),
                );
                match result {
                    Ok(bytes) => {
                        let bytes = Arc::new(bytes);
                        if let Some(cache) = &self.cache {
                            cache
                                .insert_audio(text, self.language, Arc::clone(&bytes))
                                .await;
                        }
                        bytes
                    }
                    Err(e) => {
                        warn!(error = %e, "speech synthesis failed");
                        return Err(e);
                    }
                }
            }
        };

        tokio::fs::write(&self.audio_path, bytes.as_slice())
            .await
            .map_err(|e| {
                MoodbotError::Synthesis(format!("failed to write audio artifact: {e}"))
            })?;
        debug!(
            path = %self.audio_path.display(),
            bytes = bytes.len(),
            "wrote spoken reply"
        );

        Ok(SpokenReply {
            path: self.audio_path.clone(),
            language: self.language,
        })
    }
}
