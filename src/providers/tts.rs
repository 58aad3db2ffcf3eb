//! Web speech synthesis client.
//!
//! Fetches MP3 audio from a `translate_tts` style endpoint. The backend
//! caps each request at a fixed character count, so longer text is split on
//! whitespace and the MP3 payloads concatenated in order.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::traits::SpeechSynthesizer;
use crate::error::{MoodbotError, Result};
use crate::types::Language;

/// Default base URL for the synthesis endpoint
const DEFAULT_BASE_URL: &str = "https://translate.google.com";

/// Longest text one synthesis request may carry.
const MAX_CHUNK_CHARS: usize = 100;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a `translate_tts` style synthesis service.
#[derive(Clone)]
pub struct WebTtsClient {
    http: Client,
    base_url: String,
}

impl WebTtsClient {
    /// Create a new synthesis client.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Render `text` as MP3 bytes in the given language.
    pub async fn fetch_speech(&self, text: &str, language: Language) -> Result<Vec<u8>> {
        let chunks = split_text(text);
        if chunks.is_empty() {
            return Err(MoodbotError::InvalidInput(
                "cannot synthesize empty text".to_string(),
            ));
        }

        let url = format!("{}/translate_tts", self.base_url);
        let total = chunks.len();
        let mut audio = Vec::new();

        for (idx, chunk) in chunks.iter().enumerate() {
            let response = self
                .http
                .get(&url)
                .query(&[
                    ("ie", "UTF-8"),
                    ("q", chunk.as_str()),
                    ("tl", language.code()),
                    ("client", "tw-ob"),
                    ("total", &total.to_string()),
                    ("idx", &idx.to_string()),
                    ("textlen", &chunk.chars().count().to_string()),
                ])
                .send()
                .await
                .map_err(|e| MoodbotError::Synthesis(format!("request failed: {e}")))?;

            self.handle_response_errors(&response)?;

            let bytes = response
                .bytes()
                .await
                .map_err(|e| MoodbotError::Synthesis(format!("failed to read audio: {e}")))?;
            audio.extend_from_slice(&bytes);
        }

        if audio.is_empty() {
            return Err(MoodbotError::Synthesis(
                "backend returned no audio".to_string(),
            ));
        }
        Ok(audio)
    }

    /// Check response status and map to appropriate error.
    fn handle_response_errors(&self, response: &reqwest::Response) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            403 => Err(MoodbotError::Synthesis(
                "synthesis backend refused the request".to_string(),
            )),
            429 => Err(MoodbotError::Synthesis(
                "rate limited by synthesis backend".to_string(),
            )),
            code => Err(MoodbotError::Synthesis(format!(
                "backend returned status {code}"
            ))),
        }
    }
}

impl Default for WebTtsClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Split text into chunks the backend will accept, preferring whitespace
/// boundaries. A single word longer than the limit is split mid-word.
fn split_text(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed <= MAX_CHUNK_CHARS {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }

        // Oversized single word: hard-split on character boundaries.
        let mut piece = String::new();
        for ch in word.chars() {
            if piece.chars().count() == MAX_CHUNK_CHARS {
                chunks.push(std::mem::take(&mut piece));
            }
            piece.push(ch);
        }
        current = piece;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

// ============================================================================
// Provider Trait Implementation
// ============================================================================

#[async_trait]
impl SpeechSynthesizer for WebTtsClient {
    fn name(&self) -> &str {
        "web-tts"
    }

    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>> {
        WebTtsClient::fetch_speech(self, text, language).await
    }
}
