//! Semantic configuration validation.
//!
//! Serde handles the syntax; this module checks value ranges and address
//! formats, and returns every problem found rather than only the first.

use std::fmt;
use std::net::SocketAddr;

use super::schema::{GatewayConfig, OperationLimitConfig};

/// One semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a configuration, collecting all errors.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".to_string(),
            message: format!("not a valid socket address: {:?}", config.listener.bind_address),
        });
    }

    let quotas = [
        ("limits.upload", &config.limits.upload),
        ("limits.download", &config.limits.download),
        ("limits.preview", &config.limits.preview),
        ("limits.general", &config.limits.general),
    ];
    for (field, quota) in quotas {
        check_quota(field, quota, &mut errors);
    }

    if config.limits.sweep_interval_secs == 0 {
        errors.push(ValidationError {
            field: "limits.sweep_interval_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    if config.validation.max_file_size_bytes == 0 {
        errors.push(ValidationError {
            field: "validation.max_file_size_bytes".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address".to_string(),
            message: format!(
                "not a valid socket address: {:?}",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_quota(field: &str, quota: &OperationLimitConfig, errors: &mut Vec<ValidationError>) {
    if quota.window_secs == 0 {
        errors.push(ValidationError {
            field: format!("{field}.window_secs"),
            message: "must be greater than zero".to_string(),
        });
    }
    if quota.max_requests == 0 {
        errors.push(ValidationError {
            field: format!("{field}.max_requests"),
            message: "must be greater than zero".to_string(),
        });
    }
}
