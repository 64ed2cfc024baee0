//! Metrics collection and exposition.
//!
//! # Metrics
//! - `edge_requests_total` (counter): requests handled by the pipeline, by outcome and status
//! - `edge_request_duration_seconds` (histogram): time to final response, by outcome
//! - `edge_bypassed_total` (counter): requests that skipped the pipeline
//! - `edge_upstream_errors_total` (counter): failed renders
//! - `edge_config_reloads_total` (counter): reload attempts, by result
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op
//! - Labels are bounded (outcome kind and status, never path)

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a request that went through the pipeline.
pub fn record_request(outcome: &'static str, status: u16, start: Instant) {
    counter!(
        "edge_requests_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("edge_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_bypass() {
    counter!("edge_bypassed_total").increment(1);
}

pub fn record_upstream_error() {
    counter!("edge_upstream_errors_total").increment(1);
}

pub fn record_config_reload(success: bool) {
    let result = if success { "success" } else { "failure" };
    counter!("edge_config_reloads_total", "result" => result).increment(1);
}
