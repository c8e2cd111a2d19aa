//! Notification subrouter definition.
//!
//! The following subroute is supported:
//!
//! - POST: `/message`

use super::{event::decode, handler::handle, signature::*};
use crate::router::Deps;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use axum_extra::{headers, TypedHeader};
use tracing::{debug, warn};

/// Instantiate a new notification subrouter.
pub fn notification_router() -> Router<Deps> {
    Router::new().route("/message", post(msg_handler))
}

/// Handler for the POST subroute `/message`.
///
/// If a webhook secret is configured, an `X-Spark-Signature` header
/// containing the HMAC SHA1 signature of the request body, signed with the
/// secret, must be present.
///
/// Accepts a [Notification][super::event::Notification] in
/// `application/json` format. Any other content type is refused with a 415,
/// and a missing `Content-Type` header with a 400 by the extractor.
async fn msg_handler(
    State(deps): State<Deps>,
    TypedHeader(content_type): TypedHeader<headers::ContentType>,
    headers: HeaderMap,
    // We can't parse this yet as we may need to compare signatures.
    body_bytes: Bytes,
) -> Result<StatusCode, Response> {
    if !content_type.to_string().starts_with("application/json") {
        return Err((
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Requests must have `Content-Type: application/json`",
        )
            .into_response());
    }

    if let Some(secret) = &deps.webhook_secret {
        validate_request_signature(secret, &body_bytes, &headers).map_err(|e| {
            let msg = match e {
                SignatureError::Missing => "Missing webhook signature",
                SignatureError::Invalid => "Invalid webhook signature",
            };
            warn!("{}", msg);

            StatusCode::UNAUTHORIZED.into_response()
        })?;
    }

    let event = decode(&body_bytes).map_err(|e| {
        warn!("{}", e);

        e.into_response()
    })?;

    debug!("Got bot message notification: {:?}", event);

    handle(&deps.client, event)
        .await
        .map(|_| StatusCode::OK)
        .map_err(IntoResponse::into_response)
}
