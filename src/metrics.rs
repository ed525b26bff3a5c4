//! Prometheus metrics for the status endpoint.
//!
//! This module provides metrics for:
//! - Status request count and latency
//! - Player source failures
//! - Players online in the last served snapshot

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{debug, info};

use crate::error::StatusError;

// === Metric Name Constants ===

/// Status request latency metric name.
pub const METRIC_REQUEST_LATENCY: &str = "status_request_latency_ms";
/// Status requests counter metric name.
pub const METRIC_REQUESTS: &str = "status_requests_total";
/// Player source failures counter metric name.
pub const METRIC_SOURCE_FAILURES: &str = "player_source_failures_total";
/// Players online gauge metric name.
pub const METRIC_PLAYERS_ONLINE: &str = "players_online";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_REQUEST_LATENCY,
        "Status request latency in milliseconds"
    );
    describe_counter!(METRIC_REQUESTS, "Total number of status requests served");
    describe_counter!(
        METRIC_SOURCE_FAILURES,
        "Total number of failed player list snapshots"
    );
    describe_gauge!(
        METRIC_PLAYERS_ONLINE,
        "Players in the most recently served snapshot"
    );

    debug!("Metrics initialized");
}

/// Install the Prometheus exporter listening on `addr`.
pub fn install_exporter(addr: SocketAddr) -> Result<(), StatusError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| StatusError::Metrics(e.to_string()))?;
    info!("Prometheus exporter listening on {}", addr);
    Ok(())
}

/// Record status request latency.
pub fn record_request_latency(start: Instant, format: &str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_REQUEST_LATENCY, "format" => format.to_string()).record(latency_ms);
}

/// Increment status requests counter.
pub fn inc_requests(format: &str) {
    counter!(METRIC_REQUESTS, "format" => format.to_string()).increment(1);
}

/// Increment player source failures counter.
pub fn inc_source_failures(source: &'static str) {
    counter!(METRIC_SOURCE_FAILURES, "source" => source).increment(1);
}

/// Set the players online gauge.
pub fn set_players_online(count: usize) {
    gauge!(METRIC_PLAYERS_ONLINE).set(count as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_recorder_is_noop() {
        init_metrics();
        let start = Instant::now();
        inc_requests("text");
        inc_source_failures("mock");
        set_players_online(3);
        record_request_latency(start, "text");
    }
}
