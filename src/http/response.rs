//! Protocol-level responses for gateway outcomes.
//!
//! The core components return structured outcomes; this module translates
//! them into HTTP status codes and JSON bodies.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::ratelimit::Operation;
use crate::validation::RejectReason;

pub fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Unauthorized" })),
    )
        .into_response()
}

/// 429 with a machine-readable body and a `Retry-After` header.
pub fn too_many_requests(operation: Operation, retry_after_secs: u64) -> Response {
    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(json!({
            "message": format!("Too many {} requests", operation.as_str()),
            "retryAfter": retry_after_secs,
            "type": "RATE_LIMIT_EXCEEDED",
        })),
    )
        .into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, retry_after_secs.into());
    response
}

/// 400 carrying the validator's rejection reason.
pub fn validation_rejected(reason: RejectReason) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "message": reason.to_string(),
            "code": reason.code(),
        })),
    )
        .into_response()
}

pub fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
}

pub fn document_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Document not found" })),
    )
        .into_response()
}

pub fn preview_not_supported() -> Response {
    (
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
        Json(json!({ "message": "Preview is not available for this document type" })),
    )
        .into_response()
}
