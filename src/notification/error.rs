use crate::spark::{
    error::SparkError,
    message::{MessageId, PersonId},
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Sum type representing every way handling a single notification can fail.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Failed to deserialize notification: {0}")]
    MalformedEvent(String),
    #[error("Failed to fetch message {id}: {source}")]
    UpstreamFetch { id: MessageId, source: SparkError },
    #[error("Failed to send reply to {recipient}: {source}")]
    UpstreamSend {
        recipient: PersonId,
        source: SparkError,
    },
}

impl HandlerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::MalformedEvent(_) => StatusCode::UNPROCESSABLE_ENTITY,
            HandlerError::UpstreamFetch { .. } | HandlerError::UpstreamSend { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
