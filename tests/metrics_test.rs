//! Tests for metrics integration.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::sync::Arc;

use async_trait::async_trait;
use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use moodbot::providers::{SentimentAnalyzer, Translator};
use moodbot::telemetry;
use moodbot::{CacheConfig, Language, Moodbot, Result, Translation};

// ============================================================================
// Mock providers
// ============================================================================

struct FixedAnalyzer(f32);

#[async_trait]
impl SentimentAnalyzer for FixedAnalyzer {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn polarity(&self, _text: &str) -> Result<f32> {
        Ok(self.0)
    }
}

struct EchoTranslator;

#[async_trait]
impl Translator for EchoTranslator {
    fn name(&self) -> &str {
        "echo"
    }

    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<Translation> {
        Ok(Translation {
            text: format!("[{}] {text}", target.code()),
            source,
            target,
        })
    }
}

// ============================================================================
// Snapshot type alias for readability
// ============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

// ============================================================================
// Helpers
// ============================================================================

/// Sum all counter values matching a given metric name.
fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Sum counter values matching a metric name and one label pair.
fn counter_with_label(snapshot: &SnapshotVec, name: &str, label: &str, value: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| {
            key.kind() == MetricKind::Counter
                && key.key().name() == name
                && key
                    .key()
                    .labels()
                    .any(|l| l.key() == label && l.value() == value)
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Check if any histogram entries exist for a given metric name.
fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

// ============================================================================
// Tests
// ============================================================================

/// Runs async code within a local recorder scope on the multi-thread runtime.
///
/// `block_in_place` ensures the sync `with_local_recorder` closure stays
/// on the current thread while `block_on` drives the inner async work.
#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn successful_turn_records_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let result = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let mut session = Moodbot::builder()
                    .analyzers(Arc::new(FixedAnalyzer(0.5)), Arc::new(FixedAnalyzer(0.5)))
                    .build();
                session.process_text("what a day").await
            })
        })
    });
    assert!(result.is_ok());

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_with_label(&snapshot, telemetry::TURNS_TOTAL, "mood", "positive"),
        1,
        "expected 1 positive turn counter"
    );
    assert_eq!(
        counter_with_label(
            &snapshot,
            telemetry::SERVICE_CALLS_TOTAL,
            "service",
            "sentiment"
        ),
        2,
        "expected one service call per analyzer"
    );
    assert!(
        has_histogram(&snapshot, telemetry::SERVICE_CALL_DURATION_SECONDS),
        "expected a duration histogram entry"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn invalid_input_records_error_turn() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let result = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let mut session = Moodbot::builder().build();
                session.process_text("   ").await
            })
        })
    });
    assert!(result.is_err());

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_with_label(&snapshot, telemetry::TURNS_TOTAL, "status", "error"),
        1
    );
    assert_eq!(
        counter_total(&snapshot, telemetry::SERVICE_CALLS_TOTAL),
        0,
        "no analyzer should run for rejected input"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn translation_turns_record_service_and_cache_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let mut session = Moodbot::builder()
                    .analyzers(Arc::new(FixedAnalyzer(0.5)), Arc::new(FixedAnalyzer(0.5)))
                    .translator(Arc::new(EchoTranslator))
                    .language(Language::Spanish)
                    .response_cache(CacheConfig::new())
                    .build();
                session.process_text("what a day").await.unwrap();
                session.process_text("what a day").await.unwrap();
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_with_label(
            &snapshot,
            telemetry::SERVICE_CALLS_TOTAL,
            "service",
            "translate"
        ),
        1,
        "second turn should be served from cache"
    );
    assert_eq!(
        counter_with_label(
            &snapshot,
            telemetry::CACHE_MISSES_TOTAL,
            "operation",
            "translate"
        ),
        1
    );
    assert_eq!(
        counter_with_label(
            &snapshot,
            telemetry::CACHE_HITS_TOTAL,
            "operation",
            "translate"
        ),
        1
    );
}

#[tokio::test]
async fn metrics_are_noop_without_recorder() {
    // Verify no panics when no recorder is installed.
    let mut session = Moodbot::builder()
        .analyzers(Arc::new(FixedAnalyzer(0.5)), Arc::new(FixedAnalyzer(0.5)))
        .build();
    let _outcome = session.process_text("what a day").await.unwrap();
}
