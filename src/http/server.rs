//! HTTP server setup and document handlers.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, body limit, identity, limiters)
//! - Translate validator/limiter outcomes into HTTP responses
//! - Serve accepted documents with hardened download/preview headers

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::GatewayConfig;
use crate::http::middleware::{auth, headers, rate_limit};
use crate::http::response;
use crate::observability::metrics;
use crate::ratelimit::LimiterSet;
use crate::store::{DocumentStore, StoredDocument};
use crate::validation::{self, signatures};

/// Transport body ceiling sits above the validation ceiling so the
/// validator owns the size decision for anything near the limit.
const BODY_LIMIT_SLACK: u64 = 64 * 1024;

/// Filename header supplied by the upload client.
const FILENAME_HEADER: &str = "x-filename";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub max_file_size: u64,
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    /// Create a new server from configuration and shared subsystems.
    pub fn new(config: &GatewayConfig, limiters: Arc<LimiterSet>, store: Arc<DocumentStore>) -> Self {
        let state = AppState {
            store,
            max_file_size: config.validation.max_file_size_bytes,
        };
        let router = Self::build_router(config, state, limiters);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState, limiters: Arc<LimiterSet>) -> Router {
        let limited = |limiter: &Arc<crate::ratelimit::OperationLimiter>| {
            middleware::from_fn_with_state(limiter.clone(), rate_limit::rate_limit_middleware)
        };

        let documents = Router::new()
            .route(
                "/documents/upload",
                post(upload_document).layer(limited(&limiters.upload)),
            )
            .route(
                "/documents",
                get(list_documents).layer(limited(&limiters.general)),
            )
            .route(
                "/documents/{id}/download",
                get(download_document).layer(limited(&limiters.download)),
            )
            .route(
                "/documents/{id}/preview",
                get(preview_document).layer(limited(&limiters.preview)),
            )
            // Identity resolution runs before any limiter consults its map.
            .layer(middleware::from_fn(auth::identity_middleware))
            .with_state(state.clone());

        let body_limit = state.max_file_size.saturating_add(BODY_LIMIT_SLACK) as usize;

        Router::new()
            .route("/healthz", get(health))
            .merge(documents)
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            // The explicit limit layer owns the transport ceiling; axum's
            // built-in 2 MB default would otherwise preempt the validator.
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(body_limit))
            .layer(middleware::from_fn(headers::security_headers_middleware))
    }

    /// Serve until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> std::io::Result<()> {
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn upload_document(
    State(state): State<AppState>,
    Extension(ctx): Extension<auth::UserContext>,
    request_headers: HeaderMap,
    body: Bytes,
) -> Response {
    if body.is_empty() {
        return response::bad_request("No file uploaded");
    }

    let declared_type = header_str(&request_headers, header::CONTENT_TYPE.as_str())
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_string();
    let filename = header_str(&request_headers, FILENAME_HEADER).to_string();

    let outcome = validation::validate_with_limit(
        &body,
        &declared_type,
        body.len() as u64,
        &filename,
        state.max_file_size,
    );

    if let Some(reason) = outcome.rejection {
        warn!(
            user = %ctx.user_id,
            declared_type,
            reason = reason.code(),
            "Upload rejected"
        );
        metrics::record_validation_rejected(reason.code());
        return response::validation_rejected(reason);
    }

    if !outcome.warnings.is_empty() {
        // Advisory only; the upload is accepted but operators should see it.
        warn!(
            user = %ctx.user_id,
            filename,
            warnings = ?outcome.warnings,
            "SECURITY: warnings for accepted upload"
        );
    }

    let size = body.len();
    let id = state
        .store
        .insert(&filename, &declared_type, &ctx.user_id, body.to_vec());
    metrics::record_upload_accepted();
    info!(
        user = %ctx.user_id,
        document = %id,
        declared_type,
        size,
        "AUDIT: document uploaded"
    );

    (
        StatusCode::CREATED,
        Json(json!({
            "message": "File uploaded successfully",
            "document": { "id": id },
            "warnings": outcome.warnings,
        })),
    )
        .into_response()
}

async fn list_documents(
    State(state): State<AppState>,
    Extension(ctx): Extension<auth::UserContext>,
) -> Response {
    Json(state.store.list(&ctx.user_id)).into_response()
}

async fn download_document(
    State(state): State<AppState>,
    Extension(ctx): Extension<auth::UserContext>,
    Path(id): Path<Uuid>,
) -> Response {
    let Some(doc) = state.store.get(&id, &ctx.user_id) else {
        return response::document_not_found();
    };

    metrics::record_document_served("download");
    info!(user = %ctx.user_id, document = %id, "AUDIT: document downloaded");
    serve_document(doc, false)
}

async fn preview_document(
    State(state): State<AppState>,
    Extension(ctx): Extension<auth::UserContext>,
    Path(id): Path<Uuid>,
) -> Response {
    let Some(doc) = state.store.get(&id, &ctx.user_id) else {
        return response::document_not_found();
    };

    let previewable = signatures::lookup(&doc.content_type)
        .map(|entry| entry.previewable)
        .unwrap_or(false);
    if !previewable {
        return response::preview_not_supported();
    }

    metrics::record_document_served("preview");
    info!(user = %ctx.user_id, document = %id, "AUDIT: document previewed");
    serve_document(doc, true)
}

/// Serve document bytes with hardened headers.
fn serve_document(doc: StoredDocument, inline: bool) -> Response {
    let disposition = format!(
        "{}; filename=\"{}\"",
        if inline { "inline" } else { "attachment" },
        doc.filename
    );

    let mut response_headers = HeaderMap::new();
    response_headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&doc.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    response_headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );

    (StatusCode::OK, response_headers, doc.data).into_response()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}
