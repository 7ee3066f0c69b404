//! Error types for the events API client.
//!
//! # Design
//! Errors are passed through, not translated. A transport failure reaches the
//! caller as the same `TransportError` value the transport produced, wrapped
//! only by `ApiError::Transport`. Whether a non-2xx status is an error at all
//! is the transport's decision.

use std::sync::Arc;

/// Failure executing an `HttpRequest`.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection, TLS or timeout failure reported by reqwest.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status and the transport is
    /// configured to raise on it.
    #[error("HTTP {status} {status_text}: {body}")]
    Status {
        status: u16,
        status_text: String,
        headers: Vec<(String, String)>,
        body: String,
    },

    /// The reqwest client could not be built. Reported on every request
    /// made through that transport.
    #[error("HTTP client unavailable: {0}")]
    ClientInit(Arc<reqwest::Error>),

    /// Failure reported by a custom `Transport` implementation.
    #[error("transport error: {0}")]
    Other(String),
}

/// Errors returned by `ApiClient` operations and `EventsClient::parse_*`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body did not match the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}
