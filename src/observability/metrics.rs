//! # Metrics Collection
//!
//! Prometheus exporter and the portal's named metrics.

use std::net::SocketAddr;

use ::tracing::{info, warn};
use metrics::{counter, describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::config::ObservabilityConfig;
use crate::errors::{Error, Result};

/// Records portal-specific events
#[derive(Debug, Clone, Default)]
pub struct MetricsRecorder;

impl MetricsRecorder {
    pub fn new() -> Self {
        Self
    }

    /// Record authentication attempt outcome
    pub fn record_authentication(&self, status: &str) {
        let labels = [("status", status.to_string())];
        counter!("portal_authentications_total", &labels).increment(1);
    }

    /// Record a permission denial
    pub fn record_permission_denied(&self, permission: &str) {
        let labels = [("permission", permission.to_string())];
        counter!("portal_permission_denied_total", &labels).increment(1);
    }

    pub fn register_http_metrics(&self) {
        describe_counter!("http_requests_total", Unit::Count, "HTTP requests by method, path, status");
        describe_histogram!(
            "http_request_duration_seconds",
            Unit::Seconds,
            "HTTP request latency by method and path"
        );
    }

    pub fn register_auth_metrics(&self) {
        describe_counter!(
            "portal_authentications_total",
            Unit::Count,
            "Bearer authentication attempts by outcome"
        );
        describe_counter!(
            "portal_permission_denied_total",
            Unit::Count,
            "Operations rejected by the permission gate"
        );
    }
}

/// Install the Prometheus exporter on the configured port.
pub async fn init_metrics(config: &ObservabilityConfig) -> Result<()> {
    let metrics_addr = match config.metrics_bind_address() {
        Some(addr) => addr,
        None => {
            warn!("Metrics disabled: no bind address configured");
            return Ok(());
        }
    };

    let socket_addr: SocketAddr = metrics_addr.parse().map_err(|e| {
        Error::config(format!("Invalid metrics bind address '{}': {}", metrics_addr, e))
    })?;

    PrometheusBuilder::new()
        .with_http_listener(socket_addr)
        .add_global_label("service", &config.service_name)
        .install()
        .map_err(|e| Error::config(format!("Failed to initialize metrics exporter: {}", e)))?;

    let recorder = MetricsRecorder::new();
    recorder.register_http_metrics();
    recorder.register_auth_metrics();

    info!(
        metrics_addr = %metrics_addr,
        service_name = %config.service_name,
        "Metrics collection initialized"
    );

    Ok(())
}
