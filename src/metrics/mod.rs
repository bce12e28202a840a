// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    REQUESTS_TOTAL,
    REQUEST_DURATION,
    UPSTREAM_CALLS,
    UPSTREAM_DURATION,
    CACHE_OPERATIONS,
};

/// Helper to record request metrics
pub fn record_request(outcome: &str, status_code: u16, duration_secs: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[outcome, &status_code.to_string()])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[outcome])
        .observe(duration_secs);
}

/// Helper to record Sheets API call metrics
pub fn record_upstream_call(result: &str, duration_secs: f64) {
    UPSTREAM_CALLS.with_label_values(&[result]).inc();
    UPSTREAM_DURATION
        .with_label_values(&[result])
        .observe(duration_secs);
}

/// Helper to record response cache operations
pub fn record_cache_hit() {
    CACHE_OPERATIONS.with_label_values(&["hit"]).inc();
}

pub fn record_cache_miss() {
    CACHE_OPERATIONS.with_label_values(&["miss"]).inc();
}

pub fn record_cache_store() {
    CACHE_OPERATIONS.with_label_values(&["store"]).inc();
}
