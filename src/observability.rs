//! Observability features: metrics and tracing.
//!
//! Sluice exposes the following metrics:
//!
//! | Metric | Type | Description |
//! |--------|------|-------------|
//! | `sluice_collects_total` | Counter | Completed `collect` evaluations |
//! | `sluice_elements_emitted` | Counter | Elements appended to an output |
//! | `sluice_elements_dropped` | Counter | Elements rejected by a filter stage |
//! | `sluice_collect_duration_ns` | Histogram | Wall time per `collect` call |
//!
//! Tracing spans are emitted per `collect` call; filter rejections and take
//! short-circuits are trace/debug events inside that span.
//!
//! # Example
//!
//! ```rust,ignore
//! use sluice::observability::init_metrics;
//!
//! // Initialize metric descriptions (call once at startup).
//! init_metrics();
//! // Install a metrics exporter (prometheus, statsd, ...) to collect them.
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use metrics::{Unit, counter, histogram};
use tracing::{Level, Span, span};

/// Whether metrics have been initialized.
static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

// Metric names as constants for consistency
const COLLECTS_TOTAL: &str = "sluice_collects_total";
const ELEMENTS_EMITTED: &str = "sluice_elements_emitted";
const ELEMENTS_DROPPED: &str = "sluice_elements_dropped";
const COLLECT_DURATION_NS: &str = "sluice_collect_duration_ns";

/// Initialize metrics descriptions.
///
/// Call this once at application startup before using any metrics.
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_metrics() {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        return; // Already initialized
    }

    metrics::describe_counter!(
        COLLECTS_TOTAL,
        Unit::Count,
        "Total number of completed collect evaluations"
    );
    metrics::describe_counter!(
        ELEMENTS_EMITTED,
        Unit::Count,
        "Total number of elements appended to collected outputs"
    );
    metrics::describe_counter!(
        ELEMENTS_DROPPED,
        Unit::Count,
        "Total number of elements rejected by filter stages"
    );
    metrics::describe_histogram!(
        COLLECT_DURATION_NS,
        Unit::Nanoseconds,
        "Wall time of a single collect evaluation"
    );
}

/// Create a span for one `collect` evaluation.
#[inline]
pub fn span_collect(stages: usize, source_len: usize) -> Span {
    span!(
        Level::DEBUG,
        "collect",
        stages = stages,
        source_len = source_len
    )
}

/// Record a completed `collect` evaluation.
#[inline]
pub fn record_collect(emitted: usize, dropped: usize, duration: Duration) {
    counter!(COLLECTS_TOTAL).increment(1);
    counter!(ELEMENTS_EMITTED).increment(emitted as u64);
    counter!(ELEMENTS_DROPPED).increment(dropped as u64);
    histogram!(COLLECT_DURATION_NS).record(duration.as_nanos() as f64);
}
