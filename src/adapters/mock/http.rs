//! Mock HTTP client.
//!
//! Every POST gets the same configured outcome; bodies are kept for
//! inspection.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::{Arc, Mutex};

use crate::traits::{HttpClient, HttpError, HttpResponse};

/// A POST seen by [`MockHttpClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPost {
    pub url: String,
    pub body: String,
}

impl RecordedPost {
    /// Body parsed as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// [`HttpClient`] answering every request with one canned outcome
/// (200 with an empty body unless configured).
///
/// Clones share the outcome and the request log.
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    outcome: Arc<Mutex<Result<HttpResponse, HttpError>>>,
    posts: Arc<Mutex<Vec<RecordedPost>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            outcome: Arc::new(Mutex::new(Ok(HttpResponse::new(200, Bytes::new())))),
            posts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer with `status` and `body`.
    pub fn respond_with(&self, status: u16, body: &'static str) {
        *self.outcome.lock().unwrap() = Ok(HttpResponse::new(status, body));
    }

    /// Fail every request with `err`.
    pub fn fail_with(&self, err: HttpError) {
        *self.outcome.lock().unwrap() = Err(err);
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().unwrap().clone()
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, HttpError> {
        self.posts.lock().unwrap().push(RecordedPost {
            url: url.to_string(),
            body,
        });
        self.outcome.lock().unwrap().clone()
    }
}
