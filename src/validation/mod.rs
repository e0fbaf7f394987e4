//! Content-authenticity validation for uploaded documents.
//!
//! # Data Flow
//! ```text
//! Upload payload (bytes + declared type + size + filename)
//!     → validator.rs (ordered checks, cheapest and most severe first)
//!     → signatures.rs (magic-number registry lookup + byte comparison)
//!     → ValidationOutcome (accepted or rejected, plus advisory warnings)
//! ```
//!
//! # Design Decisions
//! - The declared type is untrusted until corroborated by the leading bytes
//! - Rejections (size, type, signature) are hard gates; filename hygiene
//!   issues are advisory warnings surfaced for audit logging only
//! - The validator is a pure function: no shared state, identical inputs
//!   always produce identical outcomes

pub mod signatures;
pub mod validator;

pub use signatures::SignatureEntry;
pub use validator::{
    validate, validate_with_limit, RejectReason, ValidationOutcome, ValidationWarning,
    MAX_FILE_SIZE,
};
