//! Tracking session: one document section being read.
//!
//! Owns the visibility state and the report state for the lifetime of the
//! view. Batches are fed in one at a time, either directly through
//! [`TrackingSession::on_visibility_batch`] or from a channel by
//! [`TrackingSession::run`], which is the single consumer that serializes
//! observation callbacks.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;

use super::aggregator::VisibilityAggregator;
use super::reporter::{DeliveryEventSender, ProgressReporter};
use crate::domain::{RawTransition, ReaderDocument, VisibilityBatch, VisibilityTransition};
use crate::error::BootstrapError;
use crate::startup::{bootstrap_session, SessionContext, TrackerConfig};
use crate::traits::ProgressTransport;

/// Counters for a finished (or running) session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub batches: u64,
    /// Transitions naming elements outside the tracked set
    pub skipped_transitions: u64,
    pub reports_dispatched: u64,
    pub last_sent_page: Option<u32>,
}

#[derive(Debug)]
pub struct TrackingSession {
    context: SessionContext,
    aggregator: VisibilityAggregator,
    reporter: ProgressReporter,
    batches: u64,
    skipped_transitions: u64,
}

impl TrackingSession {
    /// Bootstrap from `document` and build the session.
    ///
    /// An `Err` means tracking does not start for this view; callers are
    /// expected to log it quietly and continue.
    pub fn start(
        document: &ReaderDocument,
        config: &TrackerConfig,
        transport: Arc<dyn ProgressTransport>,
    ) -> Result<Self, BootstrapError> {
        let context = bootstrap_session(document)?;
        Ok(Self::from_context(context, config, transport))
    }

    pub fn from_context(
        context: SessionContext,
        config: &TrackerConfig,
        transport: Arc<dyn ProgressTransport>,
    ) -> Self {
        let reporter = ProgressReporter::new(context.document_id, context.section_id, transport)
            .with_path(config.progress_path.clone());
        tracing::info!(
            "Tracking document {} section {} ({} pages)",
            context.document_id,
            context.section_id,
            context.pages.len()
        );
        Self {
            context,
            aggregator: VisibilityAggregator::with_threshold(config.visibility_threshold),
            reporter,
            batches: 0,
            skipped_transitions: 0,
        }
    }

    /// Builder: publish delivery outcomes on `events`.
    pub fn with_events(mut self, events: DeliveryEventSender) -> Self {
        self.reporter = self.reporter.with_events(events);
        self
    }

    /// Apply one observation batch and report the resulting current page.
    pub fn on_visibility_batch(&mut self, batch: &[RawTransition]) -> Option<u32> {
        let transitions = self.resolve(batch);
        self.batches += 1;
        self.aggregator
            .on_visibility_batch(&transitions, &mut self.reporter)
    }

    fn resolve(&mut self, batch: &[RawTransition]) -> Vec<VisibilityTransition> {
        let mut transitions = Vec::with_capacity(batch.len());
        for raw in batch {
            match self.context.page(&raw.element) {
                Some(element) => transitions.push(VisibilityTransition::new(
                    element.clone(),
                    raw.intersecting,
                    raw.intersection_ratio,
                )),
                None => {
                    self.skipped_transitions += 1;
                    tracing::debug!("Skipping transition for untracked element {}", raw.element);
                }
            }
        }
        transitions
    }

    /// Consume batches until every sender is dropped.
    pub async fn run(&mut self, mut batches: mpsc::Receiver<VisibilityBatch>) -> SessionSummary {
        while let Some(batch) = batches.recv().await {
            self.on_visibility_batch(&batch);
        }
        let summary = self.summary();
        tracing::info!(
            "Session ended after {} batches, {} reports, last page {:?}",
            summary.batches,
            summary.reports_dispatched,
            summary.last_sent_page
        );
        summary
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            batches: self.batches,
            skipped_transitions: self.skipped_transitions,
            reports_dispatched: self.reporter.dispatched(),
            last_sent_page: self.reporter.last_sent_page(),
        }
    }

    pub fn current_page(&self) -> Option<u32> {
        self.aggregator.current_page()
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn aggregator(&self) -> &VisibilityAggregator {
        &self.aggregator
    }

    pub fn reporter(&self) -> &ProgressReporter {
        &self.reporter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockTransport;
    use crate::domain::{Element, DOCUMENT_ID_ATTR, PAGE_NUMBER_ATTR, ROOT_ELEMENT_ID, SECTION_ID_ATTR};

    fn document(pages: &[&str]) -> ReaderDocument {
        let root = pages.iter().fold(
            Element::new(ROOT_ELEMENT_ID)
                .with_attribute(DOCUMENT_ID_ATTR, "2")
                .with_attribute(SECTION_ID_ATTR, "5"),
            |root, number| {
                root.with_child(
                    Element::new(format!("page-{}", number)).with_attribute(PAGE_NUMBER_ATTR, *number),
                )
            },
        );
        ReaderDocument::new(vec![root])
    }

    fn session(transport: &MockTransport, pages: &[&str]) -> TrackingSession {
        TrackingSession::start(
            &document(pages),
            &TrackerConfig::default(),
            Arc::new(transport.clone()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_start_fails_without_pages() {
        let result = TrackingSession::start(
            &document(&[]),
            &TrackerConfig::default(),
            Arc::new(MockTransport::new()),
        );
        assert_eq!(result.err(), Some(BootstrapError::NoPages));
    }

    #[tokio::test]
    async fn test_untracked_elements_are_skipped() {
        let transport = MockTransport::new();
        let mut session = session(&transport, &["1", "2"]);

        let current = session.on_visibility_batch(&[
            RawTransition::new("advert", true, 1.0),
            RawTransition::new("page-2", true, 0.9),
        ]);
        session.reporter().wait_idle().await;

        assert_eq!(current, Some(2));
        assert_eq!(session.summary().skipped_transitions, 1);
        assert_eq!(transport.sent_pages(), vec![2]);
    }

    #[tokio::test]
    async fn test_run_consumes_until_closed() {
        let transport = MockTransport::new();
        let mut session = session(&transport, &["1", "2", "3"]);
        let (tx, rx) = mpsc::channel(4);

        tx.send(vec![RawTransition::new("page-1", true, 1.0)]).await.unwrap();
        tx.send(vec![
            RawTransition::new("page-1", true, 0.6),
            RawTransition::new("page-2", true, 0.6),
        ])
        .await
        .unwrap();
        tx.send(vec![RawTransition::new("page-1", false, 0.0)]).await.unwrap();
        drop(tx);

        let summary = session.run(rx).await;
        session.reporter().wait_idle().await;

        assert_eq!(
            summary,
            SessionSummary {
                batches: 3,
                skipped_transitions: 0,
                reports_dispatched: 2,
                last_sent_page: Some(2),
            }
        );
        assert_eq!(transport.sent_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_configured_path_and_threshold() {
        let transport = MockTransport::new();
        let config = TrackerConfig::default()
            .with_progress_path("/v2/progress")
            .with_visibility_threshold(0.8);
        let mut session =
            TrackingSession::start(&document(&["1"]), &config, Arc::new(transport.clone())).unwrap();

        assert_eq!(session.on_visibility_batch(&[RawTransition::new("page-1", true, 0.7)]), None);
        assert_eq!(session.on_visibility_batch(&[RawTransition::new("page-1", true, 0.8)]), Some(1));
        session.reporter().wait_idle().await;
        assert_eq!(transport.sent()[0].path, "/v2/progress");
    }
}
