//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Count every request by interception outcome
//! - Track how long intercepted requests take to resolve
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `prerender_requests_total` (counter): requests by outcome
//!   (`skipped`, `served`, `cached`, `fallback`)
//! - `prerender_fetch_duration_seconds` (histogram): time from interception
//!   to a relayable response, by outcome
//!
//! # Design Decisions
//! - Metric updates are atomic increments; the skip path costs one counter
//!   bump
//! - Exporter install failure is logged and tolerated, never fatal

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
///
/// Must run inside the tokio runtime; the exporter serves scrapes from a
/// background task.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(err) => tracing::error!(error = %err, "Failed to install metrics exporter"),
    }
}

/// Count a request the classifier passed through untouched.
pub fn record_skipped() {
    counter!("prerender_requests_total", "outcome" => "skipped").increment(1);
}

/// Count an intercepted request and record how long it took to resolve.
///
/// `outcome` is one of `served` (fetched from the rendering service),
/// `cached` (answered by the before-render hook) or `fallback` (fetch or
/// decode failed, normal handling took over).
pub fn record_intercepted(outcome: &'static str, start: Instant) {
    counter!("prerender_requests_total", "outcome" => outcome).increment(1);
    histogram!("prerender_fetch_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
