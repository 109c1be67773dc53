//! Delivery failure taxonomy.

use thiserror::Error;

/// Failure of the transport capability.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The context deadline passed before a response arrived.
    #[error("request timed out")]
    Timeout,

    /// The context was cancelled while the request was in flight.
    #[error("request cancelled")]
    Cancelled,

    #[error("transport error: {0}")]
    Other(String),
}

/// Why a wire delivery was handed to the backup reporter.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The payload could not be serialized.
    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// The HTTP request could not be built.
    #[error("failed to build request: {0}")]
    Request(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be drained.
    #[error("failed to drain response body: {0}")]
    Drain(reqwest::Error),

    /// The sink answered with something other than 200 OK.
    #[error("could not report to bugsnag: sink responded with status {0}")]
    Status(u16),
}
