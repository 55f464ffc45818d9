//! Deduplicated, fire-and-forget progress reporting.
//!
//! `report` compares against the last dispatched page and, for a new value,
//! commits it as the last sent page before spawning the send. The send runs
//! as a detached task; its outcome goes to the log and, if subscribed, to
//! the delivery event channel. It is never awaited by the reporter and never
//! rolls back `last_sent_page`.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, Notify};

use super::aggregator::ProgressSink;
use crate::domain::ReportPayload;
use crate::error::DeliveryError;
use crate::traits::ProgressTransport;

/// Default collector path.
pub const PROGRESS_PATH: &str = "/progress";

/// Outcome of one detached send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryEvent {
    Delivered { page_number: u32, status: u16 },
    Failed { page_number: u32, error: DeliveryError },
}

impl DeliveryEvent {
    pub fn page_number(&self) -> u32 {
        match self {
            DeliveryEvent::Delivered { page_number, .. } => *page_number,
            DeliveryEvent::Failed { page_number, .. } => *page_number,
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryEvent::Delivered { .. })
    }
}

/// Sender half for delivery events.
pub type DeliveryEventSender = broadcast::Sender<DeliveryEvent>;

/// Create a delivery event channel with the specified capacity.
pub fn create_delivery_channel(
    capacity: usize,
) -> (DeliveryEventSender, broadcast::Receiver<DeliveryEvent>) {
    broadcast::channel(capacity)
}

/// Count of sends that have been spawned and not yet finished.
#[derive(Debug, Default)]
struct InFlight {
    count: AtomicUsize,
    idle: Notify,
}

struct InFlightGuard(Arc<InFlight>);

impl InFlightGuard {
    fn acquire(in_flight: &Arc<InFlight>) -> Self {
        in_flight.count.fetch_add(1, Ordering::AcqRel);
        Self(Arc::clone(in_flight))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.0.count.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

/// Reports the current page for one document section.
pub struct ProgressReporter {
    document_id: u64,
    section_id: u64,
    path: String,
    transport: Arc<dyn ProgressTransport>,
    last_sent_page: Option<u32>,
    dispatched: u64,
    events: Option<DeliveryEventSender>,
    in_flight: Arc<InFlight>,
}

impl ProgressReporter {
    pub fn new(document_id: u64, section_id: u64, transport: Arc<dyn ProgressTransport>) -> Self {
        Self {
            document_id,
            section_id,
            path: PROGRESS_PATH.to_string(),
            transport,
            last_sent_page: None,
            dispatched: 0,
            events: None,
            in_flight: Arc::new(InFlight::default()),
        }
    }

    /// Builder: override the collector path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Builder: publish delivery outcomes on `events`.
    pub fn with_events(mut self, events: DeliveryEventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Report `page_number` unless it is the page last sent. Page 0 is not a
    /// page number and is ignored.
    ///
    /// Returns without waiting on I/O. Must be called from within a tokio
    /// runtime; without one the report is logged and dropped.
    pub fn report(&mut self, page_number: u32) {
        if page_number == 0 {
            tracing::debug!("Ignoring report for page 0");
            return;
        }
        if self.last_sent_page == Some(page_number) {
            return;
        }

        self.last_sent_page = Some(page_number);
        self.dispatched += 1;

        let payload = ReportPayload::new(self.document_id, self.section_id, page_number);
        self.dispatch(payload);
    }

    fn dispatch(&self, payload: ReportPayload) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!(
                    "No async runtime, dropping progress report for page {}",
                    payload.page_number
                );
                return;
            }
        };

        let transport = Arc::clone(&self.transport);
        let path = self.path.clone();
        let events = self.events.clone();
        let guard = InFlightGuard::acquire(&self.in_flight);

        tracing::debug!(
            "Sending progress: document {} section {} page {}",
            payload.document_id,
            payload.section_id,
            payload.page_number
        );

        handle.spawn(async move {
            let _guard = guard;
            let event = match transport.send(&path, &payload).await {
                Ok(delivery) => DeliveryEvent::Delivered {
                    page_number: payload.page_number,
                    status: delivery.status,
                },
                Err(error) => {
                    tracing::warn!(
                        code = error.error_code(),
                        "Failed to send reading progress for page {}: {}",
                        payload.page_number,
                        error
                    );
                    DeliveryEvent::Failed {
                        page_number: payload.page_number,
                        error,
                    }
                }
            };
            if let Some(events) = events {
                // No subscribers is fine.
                let _ = events.send(event);
            }
        });
    }

    pub fn last_sent_page(&self) -> Option<u32> {
        self.last_sent_page
    }

    /// Number of sends issued so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.count.load(Ordering::Acquire)
    }

    /// Wait until every spawned send has finished.
    ///
    /// For hosts tearing down a session; the reporting path never calls it.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.in_flight.idle.notified();
            if self.in_flight.count.load(Ordering::Acquire) == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl ProgressSink for ProgressReporter {
    fn report(&mut self, page_number: u32) {
        ProgressReporter::report(self, page_number);
    }
}

impl fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("document_id", &self.document_id)
            .field("section_id", &self.section_id)
            .field("path", &self.path)
            .field("last_sent_page", &self.last_sent_page)
            .field("dispatched", &self.dispatched)
            .finish_non_exhaustive()
    }
}
