//! Metrics collection and exposition.
//!
//! # Metrics
//! - `urlshort_requests_total` (counter): requests by status
//! - `urlshort_request_duration_seconds` (histogram): latency distribution
//! - `urlshort_resolutions_total` (counter): lookups by source and outcome
//! - `urlshort_store_seeded_total` (counter): entries written per namespace
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - The Prometheus exporter serves its own scrape endpoint

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(status: u16, start: Instant) {
    let status = status.to_string();
    counter!("urlshort_requests_total", "status" => status).increment(1);
    histogram!("urlshort_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// `outcome` is one of `hit`, `miss` or `error`.
pub fn record_resolution(source: &str, outcome: &'static str) {
    counter!(
        "urlshort_resolutions_total",
        "source" => source.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_seeded(namespace: &str, count: usize) {
    counter!("urlshort_store_seeded_total", "namespace" => namespace.to_string()).increment(count as u64);
}
