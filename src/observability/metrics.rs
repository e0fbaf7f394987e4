//! Metrics collection and exposition.
//!
//! # Metrics
//! - `docgate_rate_limited_total` (counter): limiter rejections by operation
//! - `docgate_validation_rejected_total` (counter): upload rejections by reason
//! - `docgate_uploads_accepted_total` (counter): accepted uploads
//! - `docgate_documents_served_total` (counter): downloads/previews served

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on its own listener.
///
/// Failure to install is logged, not fatal: the gateway keeps serving
/// without metrics.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_rate_limited(operation: &'static str) {
    metrics::counter!("docgate_rate_limited_total", "operation" => operation).increment(1);
}

pub fn record_validation_rejected(reason: &'static str) {
    metrics::counter!("docgate_validation_rejected_total", "reason" => reason).increment(1);
}

pub fn record_upload_accepted() {
    metrics::counter!("docgate_uploads_accepted_total").increment(1);
}

pub fn record_document_served(operation: &'static str) {
    metrics::counter!("docgate_documents_served_total", "operation" => operation).increment(1);
}
