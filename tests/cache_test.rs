//! Tests for [`ResponseCache`] — opt-in LRU + TTL cache for translation
//! and synthesized audio.

use std::sync::Arc;
use std::time::Duration;

use moodbot::cache::{CacheConfig, ResponseCache};
use moodbot::types::{Language, Translation};

fn make_translation(text: &str) -> Translation {
    Translation {
        text: format!("[es] {text}"),
        source: Language::English,
        target: Language::Spanish,
    }
}

// =========================================================================
// CacheConfig
// =========================================================================

#[test]
fn cache_config_defaults() {
    let config = CacheConfig::default();
    assert_eq!(config.max_entries, 1_000);
    assert_eq!(config.ttl, Duration::from_secs(3600));
}

#[test]
fn cache_config_builder() {
    let config = CacheConfig::new()
        .max_entries(500)
        .ttl(Duration::from_secs(60));
    assert_eq!(config.max_entries, 500);
    assert_eq!(config.ttl, Duration::from_secs(60));
}

// =========================================================================
// Translation caching
// =========================================================================

#[tokio::test]
async fn translation_cache_miss_then_hit() {
    let cache = ResponseCache::new(&CacheConfig::default());

    // Miss
    assert!(
        cache
            .get_translation("hello", Language::English, Language::Spanish)
            .await
            .is_none()
    );

    // Insert
    let translation = make_translation("hello");
    cache
        .insert_translation("hello", translation.clone())
        .await;

    // Hit
    let cached = cache
        .get_translation("hello", Language::English, Language::Spanish)
        .await;
    assert_eq!(cached, Some(translation));
}

#[tokio::test]
async fn translation_cache_different_text_is_miss() {
    let cache = ResponseCache::new(&CacheConfig::default());

    cache
        .insert_translation("hello", make_translation("hello"))
        .await;

    assert!(
        cache
            .get_translation("world", Language::English, Language::Spanish)
            .await
            .is_none()
    );
}

#[tokio::test]
async fn translation_cache_different_target_is_miss() {
    let cache = ResponseCache::new(&CacheConfig::default());

    cache
        .insert_translation("hello", make_translation("hello"))
        .await;

    // Cached for en→es; en→fr should miss
    assert!(
        cache
            .get_translation("hello", Language::English, Language::French)
            .await
            .is_none()
    );
}

#[tokio::test]
async fn translation_cache_ttl_expiry() {
    let config = CacheConfig::new().ttl(Duration::from_millis(50));
    let cache = ResponseCache::new(&config);

    cache
        .insert_translation("hello", make_translation("hello"))
        .await;

    // Should be present immediately
    assert!(
        cache
            .get_translation("hello", Language::English, Language::Spanish)
            .await
            .is_some()
    );

    // Wait for TTL + some margin
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Should be expired
    assert!(
        cache
            .get_translation("hello", Language::English, Language::Spanish)
            .await
            .is_none()
    );
}

// =========================================================================
// Audio caching
// =========================================================================

#[tokio::test]
async fn audio_cache_miss_then_hit() {
    let cache = ResponseCache::new(&CacheConfig::default());

    assert!(cache.get_audio("hola", Language::Spanish).await.is_none());

    let bytes = Arc::new(b"mp3-bytes".to_vec());
    cache
        .insert_audio("hola", Language::Spanish, Arc::clone(&bytes))
        .await;

    let cached = cache.get_audio("hola", Language::Spanish).await;
    assert!(cached.is_some());
    assert_eq!(*cached.unwrap(), *bytes);
}

#[tokio::test]
async fn audio_cache_language_matters() {
    let cache = ResponseCache::new(&CacheConfig::default());

    cache
        .insert_audio("bonjour", Language::French, Arc::new(vec![1, 2, 3]))
        .await;

    // Same text, different voice language — must miss
    assert!(cache.get_audio("bonjour", Language::English).await.is_none());
}

#[tokio::test]
async fn audio_cache_ttl_expiry() {
    let config = CacheConfig::new().ttl(Duration::from_millis(50));
    let cache = ResponseCache::new(&config);

    cache
        .insert_audio("hola", Language::Spanish, Arc::new(vec![7]))
        .await;

    assert!(cache.get_audio("hola", Language::Spanish).await.is_some());

    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(cache.get_audio("hola", Language::Spanish).await.is_none());
}

// =========================================================================
// Builder integration (compilation tests)
// =========================================================================

#[test]
fn builder_with_response_cache_compiles() {
    let session = moodbot::Moodbot::builder()
        .response_cache(
            CacheConfig::new()
                .max_entries(100)
                .ttl(Duration::from_secs(60)),
        )
        .build();

    assert!(!session.is_ended());
}

#[test]
fn builder_without_response_cache_compiles() {
    let session = moodbot::Moodbot::builder().build();

    assert!(!session.is_ended());
}

// =========================================================================
// Metrics (no-op without recorder — just verify no panics)
// =========================================================================

#[tokio::test]
async fn metrics_emitted_without_panic() {
    // Without a metrics recorder installed, all metric calls should be no-ops
    let cache = ResponseCache::new(&CacheConfig::default());

    // Miss should emit cache_misses_total
    cache
        .get_translation("text", Language::English, Language::Spanish)
        .await;

    // Insert + hit should emit cache_hits_total
    cache
        .insert_translation("text", make_translation("text"))
        .await;
    cache
        .get_translation("text", Language::English, Language::Spanish)
        .await;

    // Audio miss + insert + hit
    cache.get_audio("text", Language::Spanish).await;
    cache
        .insert_audio("text", Language::Spanish, Arc::new(vec![0]))
        .await;
    cache.get_audio("text", Language::Spanish).await;
}

/// Runs async cache operations within a local recorder scope.
///
/// Uses `block_in_place` + `block_on` pattern to keep `with_local_recorder`
/// on the same thread (it's a thread-local recorder).
#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn metrics_with_recorder() {
    use metrics_util::MetricKind;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let cache = ResponseCache::new(&CacheConfig::default());

                // Miss
                cache
                    .get_translation("text", Language::English, Language::Spanish)
                    .await;

                // Insert + hit
                cache
                    .insert_translation("text", make_translation("text"))
                    .await;
                cache
                    .get_translation("text", Language::English, Language::Spanish)
                    .await;
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();

    let miss_count: u64 = snapshot
        .iter()
        .filter(|(key, _, _, _)| {
            key.kind() == MetricKind::Counter && key.key().name() == "moodbot_cache_misses_total"
        })
        .map(|(_, _, _, val)| match val {
            DebugValue::Counter(c) => *c,
            _ => 0,
        })
        .sum();

    let hit_count: u64 = snapshot
        .iter()
        .filter(|(key, _, _, _)| {
            key.kind() == MetricKind::Counter && key.key().name() == "moodbot_cache_hits_total"
        })
        .map(|(_, _, _, val)| match val {
            DebugValue::Counter(c) => *c,
            _ => 0,
        })
        .sum();

    assert_eq!(miss_count, 1, "expected 1 cache miss");
    assert_eq!(hit_count, 1, "expected 1 cache hit");
}
