//! Server router definition.
//!
//! The following routes are supported:
//!
//! - GET: `/health`
//! - POST: `/message`

use crate::{
    config::Mode,
    notification::{router::notification_router, signature::WebhookSecret},
    spark::api::SparkClient,
};
use axum::{http::StatusCode, routing::get, Router};
use tower_http::trace::{self, TraceLayer};
use tracing::Level;

/// Dependencies shared by routes across requests. Nothing in here is mutable.
#[derive(Clone)]
pub struct Deps {
    pub client: SparkClient,
    pub webhook_secret: Option<WebhookSecret>,
    pub mode: Mode,
}

/// Instantiate a new router with tracing.
pub fn new(deps: Deps) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(
            trace::DefaultMakeSpan::new()
                .level(Level::INFO)
                .include_headers(deps.mode == Mode::Development),
        )
        .on_response(trace::DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .merge(notification_router())
        .layer(trace_layer)
        // Exclude the health check route from tracing.
        .route("/health", get(|| async { StatusCode::OK }))
        .with_state(deps)
}
