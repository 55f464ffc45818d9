//! Reqwest-based HTTP client adapter.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

use crate::traits::{HttpClient, HttpError, HttpResponse};

/// [`HttpClient`] backed by a `reqwest::Client`.
///
/// # Example
///
/// ```ignore
/// use readmark::adapters::ReqwestHttpClient;
///
/// let client = ReqwestHttpClient::with_timeout(Duration::from_secs(10))?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Client with reqwest's defaults (no request timeout).
    pub fn new() -> Self {
        Self::default()
    }

    /// Client whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(classify)?;
        Ok(Self { client })
    }
}

/// Map a reqwest failure onto the seam's error kinds.
fn classify(err: reqwest::Error) -> HttpError {
    let message = err.to_string();
    if err.is_timeout() {
        HttpError::Timeout(message)
    } else if err.is_connect() {
        HttpError::ConnectionFailed(message)
    } else if err.is_builder() {
        HttpError::InvalidRequest(message)
    } else {
        HttpError::Other(message)
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, HttpError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(classify)?;
        Ok(HttpResponse::new(status, body))
    }
}
