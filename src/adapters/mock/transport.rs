//! Mock progress transport.
//!
//! Records every send at call time, before any gating, so tests can count
//! transport calls while deliveries are still pending.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use crate::domain::ReportPayload;
use crate::error::DeliveryError;
use crate::traits::{Delivery, ProgressTransport};

/// A send observed by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentReport {
    pub path: String,
    pub payload: ReportPayload,
}

/// Configurable in-memory [`ProgressTransport`].
///
/// - [`MockTransport::fail_page`] makes sends for a page fail.
/// - [`MockTransport::gated`] holds every send until [`MockTransport::release`]
///   hands out permits, simulating a slow network.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    sent: Arc<Mutex<Vec<SentReport>>>,
    failing_pages: Arc<Mutex<HashSet<u32>>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose sends block until released.
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::default()
        }
    }

    /// Let `n` pending (or future) sends complete.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    /// Fail every send for `page_number`.
    pub fn fail_page(&self, page_number: u32) {
        self.failing_pages.lock().unwrap().insert(page_number);
    }

    /// All sends so far, in call order.
    pub fn sent(&self) -> Vec<SentReport> {
        self.sent.lock().unwrap().clone()
    }

    /// Page numbers of all sends so far, in call order.
    pub fn sent_pages(&self) -> Vec<u32> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.payload.page_number)
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl ProgressTransport for MockTransport {
    async fn send(&self, path: &str, payload: &ReportPayload) -> Result<Delivery, DeliveryError> {
        self.sent.lock().unwrap().push(SentReport {
            path: path.to_string(),
            payload: *payload,
        });

        if let Some(gate) = &self.gate {
            match gate.acquire().await {
                Ok(permit) => permit.forget(),
                Err(_) => return Err(DeliveryError::Other("gate closed".to_string())),
            }
        }

        if self
            .failing_pages
            .lock()
            .unwrap()
            .contains(&payload.page_number)
        {
            return Err(DeliveryError::ConnectionFailed {
                url: path.to_string(),
                message: "simulated failure".to_string(),
            });
        }

        Ok(Delivery { status: 200 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_records_and_succeeds() {
        let transport = MockTransport::new();
        let result = transport.send("/progress", &ReportPayload::new(1, 2, 3)).await;
        assert_eq!(result, Ok(Delivery { status: 200 }));
        assert_eq!(transport.sent_pages(), vec![3]);
        assert_eq!(transport.sent()[0].path, "/progress");
    }

    #[tokio::test]
    async fn test_failing_page() {
        let transport = MockTransport::new();
        transport.fail_page(7);
        assert!(transport.send("/progress", &ReportPayload::new(1, 2, 7)).await.is_err());
        assert!(transport.send("/progress", &ReportPayload::new(1, 2, 8)).await.is_ok());
    }

    #[tokio::test]
    async fn test_gated_send_waits_for_release() {
        let transport = MockTransport::gated();
        let pending = {
            let transport = transport.clone();
            tokio::spawn(async move { transport.send("/progress", &ReportPayload::new(1, 2, 3)).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(transport.call_count(), 1);
        assert!(!pending.is_finished());

        transport.release(1);
        assert!(pending.await.unwrap().is_ok());
    }
}
