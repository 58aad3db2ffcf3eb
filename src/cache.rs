//! Opt-in response cache for deterministic service calls.
//!
//! [`ResponseCache`] caches translation results and synthesized audio,
//! which are deterministic (same text + language → same output). The
//! scripted replies themselves never need caching.
//!
//! The cache sits in [`Session`](crate::Session), in front of the
//! translator and synthesizer providers. A cache hit bypasses the provider
//! call and its metrics entirely; hit/miss metrics are emitted separately.
//! Without a [`CacheConfig`] on the builder no cache is allocated.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::telemetry;
use crate::types::{Language, Translation};

/// Configuration for the response cache.
///
/// ```rust
/// # use moodbot::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(500)
///     .ttl(Duration::from_secs(600));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries. Default: 1,000.
    pub max_entries: u64,
    /// Time-to-live for cached entries. Default: 1 hour.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1_000,
            ttl: Duration::from_secs(3600),
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Cached response value — a translation or a rendered audio payload.
///
/// Audio is wrapped in `Arc` so cache reads clone a pointer, not the MP3.
#[derive(Clone, Debug)]
enum CachedResponse {
    Translation(Translation),
    Audio(Arc<Vec<u8>>),
}

/// In-memory cache for translation and synthesis results.
///
/// Uses moka's async-friendly LRU + TTL cache, keyed on a content hash of
/// (operation, language pair, text).
pub struct ResponseCache {
    cache: Cache<u64, CachedResponse>,
}

impl ResponseCache {
    /// Create a new response cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { cache }
    }

    /// Look up a cached translation.
    ///
    /// Returns `None` on cache miss. Emits cache hit/miss metrics.
    pub async fn get_translation(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Option<Translation> {
        let key = translation_key(text, source, target);
        match self.cache.get(&key).await {
            Some(CachedResponse::Translation(t)) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL, "operation" => "translate")
                    .increment(1);
                Some(t)
            }
            _ => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "operation" => "translate")
                    .increment(1);
                None
            }
        }
    }

    /// Insert a translation.
    pub async fn insert_translation(&self, text: &str, translation: Translation) {
        let key = translation_key(text, translation.source, translation.target);
        self.cache
            .insert(key, CachedResponse::Translation(translation))
            .await;
    }

    /// Look up cached synthesized audio.
    ///
    /// Returns `None` on cache miss. Emits cache hit/miss metrics.
    pub async fn get_audio(&self, text: &str, language: Language) -> Option<Arc<Vec<u8>>> {
        let key = audio_key(text, language);
        match self.cache.get(&key).await {
            Some(CachedResponse::Audio(bytes)) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL, "operation" => "synthesize")
                    .increment(1);
                Some(bytes)
            }
            _ => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "operation" => "synthesize")
                    .increment(1);
                None
            }
        }
    }

    /// Insert synthesized audio.
    pub async fn insert_audio(&self, text: &str, language: Language, bytes: Arc<Vec<u8>>) {
        let key = audio_key(text, language);
        self.cache.insert(key, CachedResponse::Audio(bytes)).await;
    }
}

fn translation_key(text: &str, source: Language, target: Language) -> u64 {
    cache_key("translate", &[source.code(), target.code(), text])
}

fn audio_key(text: &str, language: Language) -> u64 {
    cache_key("synthesize", &[language.code(), text])
}

/// Compute a cache key from operation and input strings.
///
/// Uses `DefaultHasher` (SipHash); deterministic within a process lifetime,
/// which is sufficient for an in-memory cache.
fn cache_key(operation: &str, input: &[&str]) -> u64 {
    let mut hasher = DefaultHasher::new();
    operation.hash(&mut hasher);
    for s in input {
        s.hash(&mut hasher);
    }
    hasher.finish()
}
