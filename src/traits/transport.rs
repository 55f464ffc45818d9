//! Progress transport capability.
//!
//! The reporter only knows how to hand a payload and an endpoint path to a
//! [`ProgressTransport`]; how it reaches the collector is up to the adapter.

use async_trait::async_trait;

use crate::domain::ReportPayload;
use crate::error::DeliveryError;

/// Successful delivery acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    /// Status returned by the collector.
    pub status: u16,
}

/// Sends a single progress report.
///
/// Implementations must not retry: the reporter treats each call as the only
/// attempt for that payload.
#[async_trait]
pub trait ProgressTransport: Send + Sync {
    async fn send(&self, path: &str, payload: &ReportPayload) -> Result<Delivery, DeliveryError>;
}
