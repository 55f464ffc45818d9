//! HTTP progress transport.
//!
//! Posts each [`ReportPayload`] as JSON to `<base_url><path>`. Only the
//! status decides success; a rejection body is kept for the debug log.

use async_trait::async_trait;

use crate::domain::ReportPayload;
use crate::error::DeliveryError;
use crate::traits::{Delivery, HttpClient, ProgressTransport};

/// [`ProgressTransport`] over any [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpProgressTransport<C> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> HttpProgressTransport<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for an endpoint path.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl<C: HttpClient> ProgressTransport for HttpProgressTransport<C> {
    async fn send(&self, path: &str, payload: &ReportPayload) -> Result<Delivery, DeliveryError> {
        let url = self.url_for(path);
        let body =
            serde_json::to_string(payload).map_err(|e| DeliveryError::Encode(e.to_string()))?;

        let response = self
            .client
            .post_json(&url, body)
            .await
            .map_err(|e| DeliveryError::from_http(e, &url))?;

        if !response.is_success() {
            tracing::debug!(
                "Collector rejected page {} with {}: {}",
                payload.page_number,
                response.status,
                response.body_text()
            );
            return Err(DeliveryError::HttpStatus {
                status: response.status,
            });
        }

        Ok(Delivery {
            status: response.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockHttpClient;
    use crate::traits::HttpError;

    #[test]
    fn test_url_for_joins_paths() {
        let transport = HttpProgressTransport::new(MockHttpClient::new(), "http://reader.local/");
        assert_eq!(transport.base_url(), "http://reader.local");
        assert_eq!(transport.url_for("/progress"), "http://reader.local/progress");
        assert_eq!(transport.url_for("progress"), "http://reader.local/progress");
    }

    #[tokio::test]
    async fn test_send_posts_payload() {
        let client = MockHttpClient::new();
        client.respond_with(200, r#"{"status":"ok"}"#);
        let transport = HttpProgressTransport::new(client.clone(), "http://reader.local");

        let delivery = transport
            .send("/progress", &ReportPayload::new(3, 9, 14))
            .await
            .unwrap();
        assert_eq!(delivery.status, 200);

        let posts = client.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].url, "http://reader.local/progress");
        assert_eq!(
            posts[0].json(),
            serde_json::json!({"manga_id": 3, "chapter_id": 9, "page_number": 14})
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let client = MockHttpClient::new();
        client.respond_with(400, r#"{"error":"missing or invalid page_number"}"#);
        let transport = HttpProgressTransport::new(client, "http://reader.local");

        let result = transport.send("/progress", &ReportPayload::new(1, 1, 1)).await;
        assert_eq!(result, Err(DeliveryError::HttpStatus { status: 400 }));
    }

    #[tokio::test]
    async fn test_transport_error_is_mapped() {
        let client = MockHttpClient::new();
        client.fail_with(HttpError::ConnectionFailed("refused".to_string()));
        let transport = HttpProgressTransport::new(client, "http://reader.local");

        let result = transport.send("/progress", &ReportPayload::new(1, 1, 1)).await;
        assert!(matches!(
            result,
            Err(DeliveryError::ConnectionFailed { ref url, .. }) if url == "http://reader.local/progress"
        ));
    }
}
