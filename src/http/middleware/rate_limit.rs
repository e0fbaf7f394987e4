//! Per-operation rate limiting middleware.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::http::middleware::auth::UserContext;
use crate::http::response;
use crate::observability::metrics;
use crate::ratelimit::OperationLimiter;

/// Consult the bound [`OperationLimiter`] before forwarding the request.
///
/// Requires the identity middleware to have run; a request that somehow
/// reaches a limited route without identity is rejected, not throttled by
/// some fallback key.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<OperationLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(ctx) = request.extensions().get::<UserContext>().cloned() else {
        return response::unauthorized();
    };

    let decision = limiter.is_allowed(&ctx.user_id);
    if decision.allowed {
        return next.run(request).await;
    }

    let retry_after_secs = decision.retry_after_secs();
    warn!(
        operation = limiter.operation().as_str(),
        user = %ctx.user_id,
        retry_after_secs,
        "SECURITY: rate limit exceeded"
    );
    metrics::record_rate_limited(limiter.operation().as_str());

    response::too_many_requests(limiter.operation(), retry_after_secs)
}
