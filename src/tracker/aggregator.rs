//! Visibility aggregation.
//!
//! Keeps one boolean per page number seen so far and derives the current
//! page: the highest page number that is sufficiently visible right now.

use std::collections::BTreeMap;

use crate::domain::{VisibilityTransition, VISIBILITY_THRESHOLD};

/// Receiver of computed current-page values. The aggregator only ever
/// passes positive page numbers.
pub trait ProgressSink {
    fn report(&mut self, page_number: u32);
}

/// Per-page visibility state for one tracking session.
///
/// Entries are never removed: a page that scrolls out of view is recorded
/// as not visible rather than forgotten.
#[derive(Debug, Clone)]
pub struct VisibilityAggregator {
    threshold: f64,
    visible_pages: BTreeMap<u32, bool>,
}

impl VisibilityAggregator {
    pub fn new() -> Self {
        Self::with_threshold(VISIBILITY_THRESHOLD)
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            visible_pages: BTreeMap::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Apply a batch of transitions and return the resulting current page.
    ///
    /// Transitions whose element has no valid page number are skipped. The
    /// current page is computed once, after the whole batch.
    pub fn apply(&mut self, transitions: &[VisibilityTransition]) -> Option<u32> {
        for transition in transitions {
            let Some(page_number) = transition.element.page_number() else {
                tracing::debug!(
                    "Skipping transition for element {} with page number {:?}",
                    transition.element.id,
                    transition.element.raw_page_number
                );
                continue;
            };
            self.visible_pages
                .insert(page_number, transition.is_sufficiently_visible(self.threshold));
        }
        self.current_page()
    }

    /// Apply a batch and forward the current page, if any, to `sink`.
    ///
    /// When nothing is visible the sink is not called, so earlier progress
    /// stands.
    pub fn on_visibility_batch<S>(
        &mut self,
        transitions: &[VisibilityTransition],
        sink: &mut S,
    ) -> Option<u32>
    where
        S: ProgressSink + ?Sized,
    {
        let current = self.apply(transitions);
        if let Some(page_number) = current {
            sink.report(page_number);
        }
        current
    }

    /// Highest sufficiently visible page number.
    pub fn current_page(&self) -> Option<u32> {
        self.visible_pages
            .iter()
            .rev()
            .find(|(_, visible)| **visible)
            .map(|(page, _)| *page)
    }

    /// Last recorded visibility for a page, `None` if never observed.
    pub fn is_visible(&self, page_number: u32) -> Option<bool> {
        self.visible_pages.get(&page_number).copied()
    }

    /// Number of distinct pages observed so far.
    pub fn observed_pages(&self) -> usize {
        self.visible_pages.len()
    }
}

impl Default for VisibilityAggregator {
    fn default() -> Self {
        Self::new()
    }
}
