//! Web translation client.
//!
//! Calls a `translate_a/single` style endpoint (the `gtx` client surface)
//! and reassembles the translated text from the nested-array response.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::traits::Translator;
use crate::error::{MoodbotError, Result};
use crate::types::{Language, Translation};

/// Default base URL for the translation endpoint
const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a `gtx` style translation service.
///
/// The response is a bare JSON array: element 0 lists translated segments,
/// each segment an array whose first element is the translated chunk.
#[derive(Clone)]
pub struct WebTranslateClient {
    http: Client,
    base_url: String,
}

impl WebTranslateClient {
    /// Create a new translation client.
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

    /// Translate `text` from `source` into `target`.
    pub async fn translate_text(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<Translation> {
        let url = format!("{}/translate_a/single", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source.code()),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| MoodbotError::Translation(format!("request failed: {e}")))?;

        self.handle_response_errors(&response)?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| MoodbotError::Translation(format!("malformed response: {e}")))?;

        Ok(Translation {
            text: parse_translation(&body)?,
            source,
            target,
        })
    }

    /// Check response status and map to appropriate error.
    fn handle_response_errors(&self, response: &reqwest::Response) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            403 => Err(MoodbotError::Translation(
                "translation backend refused the request".to_string(),
            )),
            429 => Err(MoodbotError::Translation(
                "rate limited by translation backend".to_string(),
            )),
            code => Err(MoodbotError::Translation(format!(
                "backend returned status {code}"
            ))),
        }
    }
}

impl Default for WebTranslateClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Concatenate the translated chunks out of the nested-array response.
fn parse_translation(body: &Value) -> Result<String> {
    let segments = body.get(0).and_then(Value::as_array).ok_or_else(|| {
        MoodbotError::Translation("malformed response: missing segment list".to_string())
    })?;

    let mut text = String::new();
    for segment in segments {
        if let Some(chunk) = segment.get(0).and_then(Value::as_str) {
            text.push_str(chunk);
        }
    }

    if text.is_empty() {
        return Err(MoodbotError::Translation(
            "empty translation in response".to_string(),
        ));
    }
    Ok(text)
}

// ============================================================================
// Provider Trait Implementation
// ============================================================================

#[async_trait]
impl Translator for WebTranslateClient {
    fn name(&self) -> &str {
        "web-translate"
    }

    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<Translation> {
        WebTranslateClient::translate_text(self, text, source, target).await
    }
}
