//! Per-user fixed-window rate limiting for document operations.
//!
//! # Data Flow
//! ```text
//! Inbound request (authenticated identity)
//!     → limiter.rs (pick the OperationLimiter for the operation class)
//!     → window.rs (fixed-window counter keyed by identifier)
//!     → Decision (allow, or deny with retry-after)
//! ```
//!
//! # Design Decisions
//! - Fixed-window counters, not a sliding log: O(1) per request, accepted
//!   under-throttling across a window boundary (abuse prevention, not
//!   precise quota accounting)
//! - Stale entries are lazily replaced on access and additionally removed
//!   by a periodic sweeper, bounding memory to recently active identifiers
//! - State is in-process only; swapping in an external atomic-increment
//!   store stays behind the same `is_allowed` contract

pub mod limiter;
pub mod window;

pub use limiter::{spawn_sweeper, LimiterSet, Operation, OperationLimiter};
pub use window::{Decision, RateWindow};
