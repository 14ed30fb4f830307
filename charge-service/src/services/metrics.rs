//! Metrics collection for charge-service.
//!
//! HTTP request metrics go through the `metrics` recorder installed here;
//! calculation and backend counters live in a separate Prometheus registry and
//! are appended to the same scrape output.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{IntCounterVec, Opts, Registry};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();
pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static CHARGE_CALCULATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static BACKEND_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize metrics collection. Safe to call more than once.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "Prometheus recorder not installed");
            None
        }
    });

    PROMETHEUS_REGISTRY.get_or_init(|| {
        let registry = Registry::new();

        let calculations = IntCounterVec::new(
            Opts::new(
                "charge_calculations_total",
                "Total charge breakdowns computed, by call site",
            ),
            &["source"],
        )
        .expect("Failed to create charge_calculations_total metric");

        let backend_requests = IntCounterVec::new(
            Opts::new(
                "charge_backend_requests_total",
                "Total backend lookups by resource and outcome",
            ),
            &["resource", "outcome"],
        )
        .expect("Failed to create charge_backend_requests_total metric");

        registry
            .register(Box::new(calculations.clone()))
            .expect("Failed to register charge_calculations_total");
        registry
            .register(Box::new(backend_requests.clone()))
            .expect("Failed to register charge_backend_requests_total");

        CHARGE_CALCULATIONS_TOTAL.set(calculations).ok();
        BACKEND_REQUESTS_TOTAL.set(backend_requests).ok();

        registry
    });
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .and_then(|handle| handle.as_ref())
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = PROMETHEUS_REGISTRY.get() {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).ok();
        if let Ok(custom_metrics) = String::from_utf8(buffer) {
            output.push_str(&custom_metrics);
        }
    }

    output
}

/// Record one charge calculation (`preview` or `invoice_prefill`).
pub fn record_calculation(source: &str) {
    if let Some(counter) = CHARGE_CALCULATIONS_TOTAL.get() {
        counter.with_label_values(&[source]).inc();
    }
}

/// Record a backend lookup outcome (`ok`, `not_found`, `error`).
pub fn record_backend_request(resource: &str, outcome: &str) {
    if let Some(counter) = BACKEND_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[resource, outcome]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent_and_counters_render() {
        init_metrics();
        init_metrics();

        record_calculation("preview");
        record_backend_request("pelleting_batch", "not_found");

        let output = get_metrics();
        assert!(output.contains("charge_calculations_total"));
        assert!(output.contains("charge_backend_requests_total"));
    }
}
