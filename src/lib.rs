//! Moodbot - Mood-aware chat sessions over pluggable speech services
//!
//! This crate reads the emotional tone of short chat messages and answers
//! with a scripted, mood-matched reply. Sessions are explicit objects:
//! they hold the output language, the speak flag and the listen options,
//! and evaluate one turn at a time through a classify → reply →
//! translate → speak pipeline. Recognition, translation and synthesis
//! are traits, so the bundled web clients can be swapped for anything.
//!
//! # Text Example
//!
//! ```rust,no_run
//! use moodbot::Moodbot;
//!
//! #[tokio::main]
//! async fn main() -> moodbot::Result<()> {
//!     let mut session = Moodbot::builder().build();
//!
//!     let outcome = session.process_text("I love this!").await?;
//!     println!("[{}] {}", outcome.sentiment.label, outcome.reply.text);
//!     Ok(())
//! }
//! ```
//!
//! # Voice Example (requires a microphone and `web-services`)
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use moodbot::capture::ArecordSource;
//! use moodbot::providers::WebSpeechClient;
//! use moodbot::{Language, Moodbot};
//!
//! #[tokio::main]
//! async fn main() -> moodbot::Result<()> {
//!     let mut session = Moodbot::builder()
//!         .web_output()
//!         .voice(
//!             Arc::new(ArecordSource::new()?),
//!             Arc::new(WebSpeechClient::new("your-api-key")),
//!         )
//!         .language(Language::Spanish)
//!         .speak(true)
//!         .build();
//!
//!     let outcome = session.process_voice().await?;
//!     println!("{}", outcome.display_text());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod capture;
pub mod classifier;
#[cfg(feature = "cli")]
pub mod config;
pub mod error;
pub mod playback;
pub mod providers;
pub mod responder;
pub mod session;
pub mod telemetry;
pub mod types;
pub mod version;

// Re-export main types at crate root
pub use error::{MoodbotError, Result};
pub use session::{DEFAULT_AUDIO_PATH, Moodbot, Session, SessionBuilder};

// Re-export the capture pipeline pieces front-ends wire together
pub use capture::{AudioClip, AudioSource, VoiceCapture};

// Re-export all types
pub use cache::CacheConfig;
pub use classifier::MoodClassifier;
pub use types::{
    Language, ListenOptions, MoodLabel, Reply, SentimentResult, SpokenReply, Translation,
    TurnOutcome,
};
