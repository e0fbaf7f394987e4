//! Top-level error types for the gateway binary.

use thiserror::Error;

/// Errors that can abort gateway startup.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration loading or validation failed.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::loader::ConfigError),

    /// I/O errors (listener bind, signal handling).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
