//! Request middleware.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → headers.rs (security response headers on the way out)
//!     → auth.rs (resolve caller identity, 401 if absent)
//!     → rate_limit.rs (per-operation quota, 429 with retry-after)
//!     → handler
//! ```
//!
//! # Design Decisions
//! - Fail closed: no identity means no access, never IP-based fallback
//! - Rate limit rejections are routine events: logged and counted, not errors

pub mod auth;
pub mod headers;
pub mod rate_limit;
