//! Metrics collection and Prometheus export.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the metrics recorder.
///
/// This must be called once at startup before any metrics are recorded.
/// Panics if called more than once.
pub fn init_metrics() {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("failed to set metrics handle: already initialized");
    }
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

/// `outcome` is one of `found`, `not_found` or `error`.
pub fn record_lookup(resource: &'static str, outcome: &'static str, elapsed: Duration) {
    counter!("catalog_lookups_total", "resource" => resource, "outcome" => outcome).increment(1);
    histogram!("catalog_lookup_duration_seconds", "resource" => resource, "outcome" => outcome)
        .record(elapsed.as_secs_f64());
}
