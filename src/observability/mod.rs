//! Observability: structured logging and Prometheus metrics.

pub mod logging;
pub mod metrics;
