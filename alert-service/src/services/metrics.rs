//! Prometheus metrics for the alert relay.

use crate::models::AlertKind;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Call once at process start.
pub fn init_metrics() {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("metrics recorder already initialized");
    }
}

/// Render all recorded metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# metrics recorder not initialized\n".to_string())
}

/// Record one dispatch attempt by alert kind and outcome.
pub fn record_dispatch(kind: AlertKind, status: &'static str) {
    metrics::counter!(
        "alerts_dispatched_total",
        "kind" => kind.to_string(),
        "status" => status
    )
    .increment(1);
}

/// Record one call to the push delivery API.
pub fn record_provider_call(provider: &'static str, status: &'static str) {
    metrics::counter!(
        "provider_calls_total",
        "provider" => provider,
        "status" => status
    )
    .increment(1);
}
