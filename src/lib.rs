//! Docgate - gateway safeguard for sensitive document uploads.
//!
//! Every sensitive document operation passes through two gates before a
//! handler touches it: a per-user, per-operation rate limiter and a
//! content-authenticity validator that checks the uploaded bytes against
//! the magic-number signature of the declared type.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod ratelimit;
pub mod store;
pub mod validation;

pub use config::GatewayConfig;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
