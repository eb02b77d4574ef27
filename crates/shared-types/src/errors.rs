//! Errors raised by the Prometheus-facing collaborators.

use thiserror::Error;

/// Failure talking to the metrics source or the reload endpoint.
///
/// Carries enough detail to reproduce Prometheus' own message; callers wrap
/// it with the operation that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("{0}")]
    Transport(String),

    /// Non-success status without a decodable API envelope.
    #[error("unexpected status code {status}, body: {body}")]
    Status { status: u16, body: String },

    /// The API answered with `status: "error"`.
    #[error("{error_type}: {error}")]
    Api { error_type: String, error: String },

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid prometheus url: {0}")]
    InvalidUrl(String),
}

impl SourceError {
    /// True when the failure happened before any response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
