//! HTTP posting capability used by the progress transport.
//!
//! The seam is a single JSON POST. A completed exchange is `Ok` whatever the
//! status; `HttpError` is reserved for requests that never got an answer.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, lossily decoded, for logs.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A request that produced no response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The request could not be built (bad URL, bad header).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("HTTP error: {0}")]
    Other(String),
}

/// Posts JSON documents.
///
/// # Example
///
/// ```ignore
/// use readmark::traits::HttpClient;
///
/// async fn ping<C: HttpClient>(client: &C) -> bool {
///     client
///         .post_json("http://127.0.0.1:5000/progress", "{}".to_string())
///         .await
///         .map(|r| r.is_success())
///         .unwrap_or(false)
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST `body` with `Content-Type: application/json`.
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, HttpError>;
}
