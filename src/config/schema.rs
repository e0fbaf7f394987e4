//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Defaults encode the gateway's contract values: the per-operation quota
//! table and the 10 MiB upload ceiling.

use serde::{Deserialize, Serialize};

use crate::validation::MAX_FILE_SIZE;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Per-operation rate limit quotas.
    pub limits: RateLimitConfig,

    /// Upload validation settings.
    pub validation: ValidationConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Quota for one operation class.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct OperationLimitConfig {
    /// Window duration in seconds.
    pub window_secs: u64,

    /// Maximum requests per identifier within one window.
    pub max_requests: u32,
}

/// Rate limit quotas per operation class.
///
/// Defaults are the gateway contract: upload 10/15min, download 30/5min,
/// preview 50/1min, general 100/1min.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub upload: OperationLimitConfig,
    pub download: OperationLimitConfig,
    pub preview: OperationLimitConfig,
    pub general: OperationLimitConfig,

    /// Interval between sweeps of expired window entries, in seconds.
    pub sweep_interval_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            upload: OperationLimitConfig {
                window_secs: 15 * 60,
                max_requests: 10,
            },
            download: OperationLimitConfig {
                window_secs: 5 * 60,
                max_requests: 30,
            },
            preview: OperationLimitConfig {
                window_secs: 60,
                max_requests: 50,
            },
            general: OperationLimitConfig {
                window_secs: 60,
                max_requests: 100,
            },
            sweep_interval_secs: 60,
        }
    }
}

/// Upload validation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum accepted document size in bytes.
    pub max_file_size_bytes: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: MAX_FILE_SIZE,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Whether to start the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Exporter bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
