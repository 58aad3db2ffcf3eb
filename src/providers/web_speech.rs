//! Web speech recognition client.
//!
//! Posts captured PCM audio to a Google Web Speech style
//! `/speech-api/v2/recognize` endpoint and extracts the top transcript from
//! the line-delimited JSON response.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::traits::SpeechToText;
use crate::capture::AudioClip;
use crate::error::{MoodbotError, Result};

/// Default base URL for the recognition endpoint
const DEFAULT_BASE_URL: &str = "http://www.google.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a Web Speech style recognition service.
///
/// The backend answers with one JSON document per line; the first line is
/// usually an empty `{"result":[]}` preamble and the real result follows.
#[derive(Clone)]
pub struct WebSpeechClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl WebSpeechClient {
    /// Create a new recognition client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into(),
        }
    }

    /// Recognize speech in a captured clip.
    ///
    /// Returns [`MoodbotError::Unrecognized`] when the backend produced no
    /// transcript for the audio.
    pub async fn recognize(&self, clip: &AudioClip, locale: &str) -> Result<String> {
        let url = format!("{}/speech-api/v2/recognize", self.base_url);

        let response = self
            .http
            .post(&url)
            .query(&[
                ("client", "chromium"),
                ("lang", locale),
                ("key", self.api_key.as_str()),
            ])
            .header(
                "Content-Type",
                format!("audio/l16; rate={}", clip.sample_rate()),
            )
            .body(clip.pcm_bytes())
            .send()
            .await
            .map_err(|e| MoodbotError::Recognition(format!("request failed: {e}")))?;

        self.handle_response_errors(&response)?;

        let body = response
            .text()
            .await
            .map_err(|e| MoodbotError::Recognition(format!("failed to read response: {e}")))?;

        parse_transcript(&body)
    }

    /// Check response status and map to appropriate error.
    fn handle_response_errors(&self, response: &reqwest::Response) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            401 | 403 => Err(MoodbotError::Recognition(format!(
                "authentication rejected ({status})"
            ))),
            429 => Err(MoodbotError::Recognition(
                "rate limited by recognition backend".to_string(),
            )),
            code => Err(MoodbotError::Recognition(format!(
                "backend returned status {code}"
            ))),
        }
    }
}

#[derive(Deserialize)]
struct RecognizeLine {
    #[serde(default)]
    result: Vec<RecognizeResult>,
}

#[derive(Deserialize)]
struct RecognizeResult {
    #[serde(default)]
    alternative: Vec<RecognizeAlternative>,
}

#[derive(Deserialize)]
struct RecognizeAlternative {
    transcript: Option<String>,
    confidence: Option<f32>,
}

/// Extract the best transcript from a line-delimited recognition response.
///
/// Lines with an empty `result` array are skipped; the first line carrying
/// results wins. Among its alternatives the highest-confidence transcript is
/// chosen, treating alternatives without a confidence as confidence 0.
fn parse_transcript(body: &str) -> Result<String> {
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parsed: RecognizeLine = serde_json::from_str(line)
            .map_err(|e| MoodbotError::Recognition(format!("malformed response: {e}")))?;

        let Some(result) = parsed.result.into_iter().next() else {
            continue;
        };

        let best = result
            .alternative
            .into_iter()
            .filter(|alt| alt.transcript.is_some())
            .max_by(|a, b| {
                let ca = a.confidence.unwrap_or(0.0);
                let cb = b.confidence.unwrap_or(0.0);
                ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
            });

        return match best.and_then(|alt| alt.transcript) {
            Some(transcript) if !transcript.is_empty() => Ok(transcript),
            _ => Err(MoodbotError::Unrecognized),
        };
    }

    Err(MoodbotError::Unrecognized)
}

// ============================================================================
// Provider Trait Implementation
// ============================================================================

#[async_trait]
impl SpeechToText for WebSpeechClient {
    fn name(&self) -> &str {
        "web-speech"
    }

    async fn transcribe(&self, clip: &AudioClip, locale: &str) -> Result<String> {
        WebSpeechClient::recognize(self, clip, locale).await
    }
}
