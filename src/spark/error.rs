use reqwest::StatusCode;
use thiserror::Error;

/// Sum type representing every way a call to the messaging API can fail.
#[derive(Debug, Error)]
pub enum SparkError {
    #[error("Messaging API request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Messaging API returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl SparkError {
    /// The HTTP status returned by the API, if it got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SparkError::RequestFailed(e) => e.status(),
            SparkError::Status { status, .. } => Some(*status),
        }
    }
}
