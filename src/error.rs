//! Error types for the Shrimpy client library.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// The main error type for all Shrimpy client operations.
#[derive(Error, Debug)]
pub enum ShrimpyError {
    /// Missing or invalid client configuration (base URL, key or secret).
    ///
    /// Raised before any request is attempted.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The API secret is not valid base64, so no signature can be produced.
    #[error("API secret must be valid base64: {0}")]
    InvalidSecretEncoding(#[source] base64::DecodeError),

    /// An exchange name that cannot be used as a single URL path segment.
    #[error("Invalid exchange name: {0:?}")]
    InvalidExchange(String),

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with a status other than the expected one.
    #[error("Unexpected response status {status}: {body}")]
    UnexpectedStatus {
        /// Status code actually returned
        status: StatusCode,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("Malformed response: {source}. Body: {body}")]
    MalformedResponse {
        /// Underlying decode failure
        #[source]
        source: serde_json::Error,
        /// Raw response body
        body: String,
    },

    /// The API understood the request and declined it (`{"success": false}`).
    #[error("Operation rejected by Shrimpy: {operation}")]
    OperationRejected {
        /// Name of the rejected operation, e.g. `rebalance_account`
        operation: &'static str,
    },

    /// The request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Failures below the HTTP status layer.
#[derive(Error, Debug)]
pub enum TransportError {
    /// DNS, connection, TLS or body read failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure raised from the middleware stack
    #[error("HTTP request failed: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// The configured per-request timeout elapsed
    #[error("Request timed out after {0:?}")]
    TimedOut(Duration),

    /// The caller cancelled the request
    #[error("Request cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for ShrimpyError {
    fn from(err: reqwest::Error) -> Self {
        ShrimpyError::Transport(TransportError::Http(err))
    }
}

impl From<reqwest_middleware::Error> for ShrimpyError {
    fn from(err: reqwest_middleware::Error) -> Self {
        ShrimpyError::Transport(TransportError::Middleware(err))
    }
}

impl ShrimpyError {
    /// Check if the request failed before a response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, ShrimpyError::Transport(_))
    }

    /// Check if the API declined an otherwise well-formed request.
    pub fn is_rejected(&self) -> bool {
        matches!(self, ShrimpyError::OperationRejected { .. })
    }

    /// Check if the response could not be decoded, which usually means API drift.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ShrimpyError::MalformedResponse { .. })
    }

    /// Check if the error is caused by client configuration rather than the call.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ShrimpyError::Configuration(_) | ShrimpyError::InvalidSecretEncoding(_)
        )
    }

    /// HTTP status returned by the API, if the error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ShrimpyError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
