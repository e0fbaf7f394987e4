//! Ordered content checks for document uploads.

use serde::Serialize;
use thiserror::Error;

use super::signatures;

/// Maximum accepted document size: 10 MiB.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Hard rejection reasons. None of these are retryable with the same file.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    #[error("file size exceeds the configured limit")]
    SizeExceeded,
    #[error("file type is not allowed for sensitive documents")]
    TypeNotAllowed,
    #[error("file content does not match declared file type")]
    SignatureMismatch,
}

impl RejectReason {
    /// Machine-readable code for response bodies and metrics labels.
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::SizeExceeded => "size_exceeded",
            RejectReason::TypeNotAllowed => "type_not_allowed",
            RejectReason::SignatureMismatch => "signature_mismatch",
        }
    }
}

/// Advisory findings. Never escalated to rejections; surfaced to audit
/// logging so operators can see suspicious-but-accepted uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationWarning {
    /// Filename contains traversal markers or path separators.
    UnsafeFilename,
    /// Filename extension does not match the declared type.
    ExtensionMismatch,
}

/// Result of one validation call. Produced fresh per call, never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub rejection: Option<RejectReason>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationOutcome {
    pub fn accepted(&self) -> bool {
        self.rejection.is_none()
    }

    fn rejected(reason: RejectReason) -> Self {
        Self {
            rejection: Some(reason),
            warnings: Vec::new(),
        }
    }
}

/// Validate an upload against the default 10 MiB ceiling.
pub fn validate(
    buffer: &[u8],
    declared_type: &str,
    declared_size: u64,
    filename: &str,
) -> ValidationOutcome {
    validate_with_limit(buffer, declared_type, declared_size, filename, MAX_FILE_SIZE)
}

/// Validate an upload with an explicit size ceiling.
///
/// Checks run in severity order and short-circuit on the first failure:
///
/// 1. declared size within the ceiling, otherwise [`RejectReason::SizeExceeded`]
///    (no signature work is wasted on oversized payloads)
/// 2. declared type on the fixed allow-list, otherwise
///    [`RejectReason::TypeNotAllowed`]
/// 3. leading bytes match the registered signature, otherwise
///    [`RejectReason::SignatureMismatch`] - the type-spoofing case
/// 4. filename free of traversal markers and path separators, otherwise a
///    [`ValidationWarning::UnsafeFilename`] warning
/// 5. filename extension consistent with the declared type, otherwise a
///    [`ValidationWarning::ExtensionMismatch`] warning
///
/// Warnings never flip acceptance.
pub fn validate_with_limit(
    buffer: &[u8],
    declared_type: &str,
    declared_size: u64,
    filename: &str,
    max_size: u64,
) -> ValidationOutcome {
    if declared_size > max_size {
        return ValidationOutcome::rejected(RejectReason::SizeExceeded);
    }

    let Some(entry) = signatures::lookup(declared_type) else {
        return ValidationOutcome::rejected(RejectReason::TypeNotAllowed);
    };

    if !entry.matches(buffer) {
        return ValidationOutcome::rejected(RejectReason::SignatureMismatch);
    }

    let mut warnings = Vec::new();

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        warnings.push(ValidationWarning::UnsafeFilename);
    }

    let lowered = filename.to_lowercase();
    let extension = lowered.rsplit('.').next().unwrap_or("");
    if !extension.is_empty() && !entry.extensions.contains(&extension) {
        warnings.push(ValidationWarning::ExtensionMismatch);
    }

    ValidationOutcome {
        rejection: None,
        warnings,
    }
}
