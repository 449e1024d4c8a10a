use reqwest::StatusCode;
use thiserror::Error;

/// Failures while reporting the tokens found in a single message. None of
/// them are retried; the caller logs and moves on to the next event.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize token payload: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to send request to the gists API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("gists API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode gists API response ({status}): {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to send reply: {0:#}")]
    Reply(anyhow::Error),
}

impl ReportError {
    /// HTTP status observed from the gists API, if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ReportError::Status { status, .. } | ReportError::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }
}
