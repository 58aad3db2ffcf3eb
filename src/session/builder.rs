//! Session construction.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::{CacheConfig, ResponseCache};
use crate::capture::{AudioSource, VoiceCapture};
use crate::classifier::MoodClassifier;
use crate::providers::{SentimentAnalyzer, SpeechSynthesizer, SpeechToText, Translator};
use crate::responder::ResponseSelector;
use crate::session::{DEFAULT_AUDIO_PATH, Session};
use crate::types::{Language, ListenOptions};

/// Library entry point.
///
/// ```rust,no_run
/// use moodbot::Moodbot;
///
/// # async fn run() -> moodbot::Result<()> {
/// let mut session = Moodbot::builder().build();
/// let outcome = session.process_text("I love this!").await?;
/// println!("{}", outcome.reply.text);
/// # Ok(())
/// # }
/// ```
pub struct Moodbot;

impl Moodbot {
    /// Start configuring a session.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }
}

/// Builder for [`Session`].
///
/// Text-only sessions need no providers at all: the built-in analyzers are
/// wired by default and replies stay in English. Translation, spoken output
/// and voice input each activate only when their provider is supplied.
pub struct SessionBuilder {
    rule_analyzer: Option<Arc<dyn SentimentAnalyzer>>,
    valence_analyzer: Option<Arc<dyn SentimentAnalyzer>>,
    translator: Option<Arc<dyn Translator>>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    voice: Option<VoiceCapture>,
    listen_options: Option<ListenOptions>,
    language: Language,
    speak: bool,
    audio_path: Option<PathBuf>,
    cache: Option<CacheConfig>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            rule_analyzer: None,
            valence_analyzer: None,
            translator: None,
            synthesizer: None,
            voice: None,
            listen_options: None,
            language: Language::default(),
            speak: false,
            audio_path: None,
            cache: None,
        }
    }

    /// Replace both built-in analyzers.
    pub fn analyzers(
        mut self,
        rule: Arc<dyn SentimentAnalyzer>,
        valence: Arc<dyn SentimentAnalyzer>,
    ) -> Self {
        self.rule_analyzer = Some(rule);
        self.valence_analyzer = Some(valence);
        self
    }

    /// Provider used to translate replies out of English.
    pub fn translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Provider used to synthesize spoken replies.
    pub fn synthesizer(mut self, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    /// Wire voice input from an audio source and a recognizer.
    pub fn voice(mut self, source: Arc<dyn AudioSource>, recognizer: Arc<dyn SpeechToText>) -> Self {
        self.voice = Some(VoiceCapture::new(source, recognizer));
        self
    }

    /// Hand over an already-assembled capture pipeline.
    pub fn voice_capture(mut self, capture: VoiceCapture) -> Self {
        self.voice = Some(capture);
        self
    }

    /// Initial listen options (applied to the voice capture at build time).
    pub fn listen_options(mut self, options: ListenOptions) -> Self {
        self.listen_options = Some(options);
        self
    }

    /// Initial output language.
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Whether replies are spoken aloud from the start.
    pub fn speak(mut self, speak: bool) -> Self {
        self.speak = speak;
        self
    }

    /// Where to write synthesized audio instead of [`DEFAULT_AUDIO_PATH`].
    pub fn audio_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.audio_path = Some(path.into());
        self
    }

    /// Enable response caching for translations and synthesized audio.
    pub fn response_cache(mut self, config: CacheConfig) -> Self {
        self.cache = Some(config);
        self
    }

    /// Wire the web translation and synthesis clients in one call.
    #[cfg(feature = "web-services")]
    pub fn web_output(mut self) -> Self {
        self.translator = Some(Arc::new(crate::providers::WebTranslateClient::new()));
        self.synthesizer = Some(Arc::new(crate::providers::WebTtsClient::new()));
        self
    }

    /// Assemble the session.
    pub fn build(self) -> Session {
        let classifier = match (self.rule_analyzer, self.valence_analyzer) {
            (Some(rule), Some(valence)) => MoodClassifier::with_analyzers(rule, valence),
            _ => MoodClassifier::new(),
        };

        let voice = self.voice.map(|capture| match self.listen_options {
            Some(options) => capture.with_options(options),
            None => capture,
        });

        Session::new(
            classifier,
            ResponseSelector,
            self.translator,
            self.synthesizer,
            voice,
            self.cache.map(|config| ResponseCache::new(&config)),
            self.language,
            self.speak,
            self.audio_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_AUDIO_PATH)),
        )
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_TIMEOUT_SECS;

    #[test]
    fn default_session_is_text_only_english() {
        let session = Moodbot::builder().build();
        assert_eq!(session.language(), Language::English);
        assert!(!session.speak_enabled());
        assert!(!session.is_ended());
        assert!(session.listen_options().is_none());
        assert_eq!(
            session.audio_path(),
            std::path::Path::new(DEFAULT_AUDIO_PATH)
        );
    }

    #[test]
    fn builder_settings_reach_the_session() {
        let session = Moodbot::builder()
            .language(Language::Spanish)
            .speak(true)
            .audio_path("/tmp/out.mp3")
            .build();
        assert_eq!(session.language(), Language::Spanish);
        assert!(session.speak_enabled());
        assert_eq!(session.audio_path(), std::path::Path::new("/tmp/out.mp3"));
    }

    #[test]
    fn settings_can_change_after_build() {
        let mut session = Moodbot::builder().build();
        session.set_language(Language::Hindi);
        session.set_speak(true);
        assert_eq!(session.language(), Language::Hindi);
        assert!(session.speak_enabled());
    }

    #[tokio::test]
    async fn listen_without_voice_capture_is_a_configuration_error() {
        let session = Moodbot::builder().build();
        let err = session.listen().await.unwrap_err();
        assert_eq!(err.kind(), "configuration");
    }

    #[test]
    fn listen_options_are_clamped_not_rejected() {
        let options = ListenOptions::default().with_timeout_secs(99);
        assert_eq!(options.timeout_secs(), MAX_TIMEOUT_SECS);
    }
}
