//! Provider implementations for the external collaborators.
//!
//! The built-in sentiment analyzers are local and always available; the
//! speech, translation and synthesis clients talk to web backends and sit
//! behind the `web-services` feature.

pub mod lexicon;
pub mod traits;
pub mod valence;

#[cfg(feature = "web-services")]
pub mod translate;
#[cfg(feature = "web-services")]
pub mod tts;
#[cfg(feature = "web-services")]
pub mod web_speech;

pub use lexicon::LexiconAnalyzer;
pub use traits::{SentimentAnalyzer, SpeechSynthesizer, SpeechToText, Translator};
pub use valence::ValenceAnalyzer;

#[cfg(feature = "web-services")]
pub use translate::WebTranslateClient;
#[cfg(feature = "web-services")]
pub use tts::WebTtsClient;
#[cfg(feature = "web-services")]
pub use web_speech::WebSpeechClient;
