//! Progress delivery errors.
//!
//! These are observed (logged, published as delivery events) and then
//! dropped. Nothing retries on them.

use thiserror::Error;

use crate::traits::HttpError;

/// A progress report that did not reach the collector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// Could not connect to the collector.
    #[error("Connection failed to '{url}': {message}")]
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    #[error("Request to '{url}' timed out")]
    Timeout { url: String },

    /// Collector answered with a non-2xx status.
    #[error("Collector returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// Payload could not be serialized.
    #[error("Failed to encode payload: {0}")]
    Encode(String),

    /// Anything else the transport reported.
    #[error("Delivery failed: {0}")]
    Other(String),
}

impl DeliveryError {
    /// Map a transport-level HTTP error for the given request URL.
    pub fn from_http(err: HttpError, url: &str) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => DeliveryError::ConnectionFailed {
                url: url.to_string(),
                message,
            },
            HttpError::Timeout(_) => DeliveryError::Timeout {
                url: url.to_string(),
            },
            other @ (HttpError::InvalidRequest(_) | HttpError::Other(_)) => {
                DeliveryError::Other(other.to_string())
            }
        }
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            DeliveryError::ConnectionFailed { .. } => "E_NET_CONN",
            DeliveryError::Timeout { .. } => "E_NET_TIMEOUT",
            DeliveryError::HttpStatus { .. } => "E_NET_HTTP",
            DeliveryError::Encode(_) => "E_ENCODE",
            DeliveryError::Other(_) => "E_NET_OTHER",
        }
    }
}
