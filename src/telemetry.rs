//! Telemetry metric name constants.
//!
//! Centralised metric names for moodbot operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `moodbot_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `service` — collaborator invoked ("sentiment", "speech", "translate",
//!   "synthesize")
//! - `provider` — provider name (e.g. "web-speech", "lexicon")
//! - `status` — outcome: "ok" or "error"
//! - `mood` — classified label: "positive" | "negative" | "neutral"

/// Total chat turns processed by a session.
///
/// Labels: `mood`, `status` ("ok" | "error").
pub const TURNS_TOTAL: &str = "moodbot_turns_total";

/// Total calls made to external service providers.
///
/// Labels: `service`, `provider`, `status` ("ok" | "error").
pub const SERVICE_CALLS_TOTAL: &str = "moodbot_service_calls_total";

/// Service call duration in seconds.
///
/// Labels: `service`, `provider`.
pub const SERVICE_CALL_DURATION_SECONDS: &str = "moodbot_service_call_duration_seconds";

/// Total response cache hits.
///
/// Labels: `operation` ("translate" | "synthesize").
pub const CACHE_HITS_TOTAL: &str = "moodbot_cache_hits_total";

/// Total response cache misses.
///
/// Labels: `operation` ("translate" | "synthesize").
pub const CACHE_MISSES_TOTAL: &str = "moodbot_cache_misses_total";

/// Record one external service call: counter plus duration histogram.
pub(crate) fn record_service_call(
    service: &'static str,
    provider: &str,
    started: std::time::Instant,
    ok: bool,
) {
    let status = if ok { "ok" } else { "error" };
    metrics::counter!(
        SERVICE_CALLS_TOTAL,
        "service" => service,
        "provider" => provider.to_string(),
        "status" => status,
    )
    .increment(1);
    metrics::histogram!(
        SERVICE_CALL_DURATION_SECONDS,
        "service" => service,
        "provider" => provider.to_string(),
    )
    .record(started.elapsed().as_secs_f64());
}
