//! Caller identity middleware.
//!
//! The upstream authentication layer asserts the caller's identity in the
//! `X-User-Id` header. Rate limiting needs a stable identity to throttle
//! fairly, so requests without one are rejected outright.

use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::response;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity attached to authenticated requests.
#[derive(Clone, Debug)]
pub struct UserContext {
    pub user_id: String,
}

pub async fn identity_middleware(mut req: Request<Body>, next: Next) -> Response {
    let user_id = match req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
    {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return response::unauthorized(),
    };

    req.extensions_mut().insert(UserContext { user_id });
    next.run(req).await
}
