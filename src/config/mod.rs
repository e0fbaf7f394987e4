//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared by value/Arc with all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults so an empty file is a valid config
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every problem, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::{
    GatewayConfig, ListenerConfig, ObservabilityConfig, OperationLimitConfig, RateLimitConfig,
    TimeoutConfig, ValidationConfig,
};
