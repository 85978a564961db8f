//! # HTTP Request Tracing Middleware
//!
//! Wraps every request in an `http_request` span and records request counters
//! and latency histograms for Prometheus.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use metrics::{counter, histogram};
use tracing::Instrument;

use crate::request_span;

/// Axum middleware tracing one HTTP request.
pub async fn trace_http_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let uri = request.uri().path().to_string();
    let start = Instant::now();

    let span = request_span!(method, uri);
    let response = next.run(request).instrument(span.clone()).await;

    let status_code = response.status().as_u16();
    let elapsed = start.elapsed();

    span.in_scope(|| {
        if status_code >= 500 {
            tracing::error!(status_code, elapsed_ms = elapsed.as_millis() as u64, "request failed");
        } else {
            tracing::debug!(status_code, elapsed_ms = elapsed.as_millis() as u64, "request completed");
        }
    });

    let path_label = normalize_path_for_metrics(&uri);

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path_label.clone(),
        "status" => status_code.to_string()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path_label
    )
    .record(elapsed.as_secs_f64());

    response
}

/// Normalize path for metrics to avoid high cardinality
///
/// Identifiers following a portal collection segment become `:id`.
pub(crate) fn normalize_path_for_metrics(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let mut normalized = Vec::with_capacity(segments.len());

    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            normalized.push(*segment);
            continue;
        }

        let prev_is_collection = i > 0
            && matches!(
                segments.get(i - 1).copied(),
                Some("apis") | Some("applications") | Some("pages") | Some("plans")
            );

        if prev_is_collection {
            normalized.push(":id");
        } else {
            normalized.push(*segment);
        }
    }

    normalized.join("/")
}
