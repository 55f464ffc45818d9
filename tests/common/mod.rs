//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use readmark::adapters::MockTransport;
use readmark::domain::{
    Element, RawTransition, ReaderDocument, DOCUMENT_ID_ATTR, PAGE_NUMBER_ATTR, ROOT_ELEMENT_ID,
    SECTION_ID_ATTR,
};
use readmark::startup::TrackerConfig;
use readmark::tracker::TrackingSession;

pub const DOCUMENT_ID: u64 = 7;
pub const SECTION_ID: u64 = 42;

/// Element id used for a page number in [`reader_document`].
pub fn page_id(page: &str) -> String {
    format!("page-{}", page)
}

/// A reader document with one element per entry in `pages`, using the
/// entry as the raw `data-page-number` value.
pub fn reader_document(pages: &[&str]) -> ReaderDocument {
    let root = pages.iter().fold(
        Element::new(ROOT_ELEMENT_ID)
            .with_attribute(DOCUMENT_ID_ATTR, DOCUMENT_ID.to_string())
            .with_attribute(SECTION_ID_ATTR, SECTION_ID.to_string()),
        |root, page| root.with_child(Element::new(page_id(page)).with_attribute(PAGE_NUMBER_ATTR, *page)),
    );
    ReaderDocument::new(vec![Element::new("body").with_child(root)])
}

/// A session over pages 1..=n backed by `transport`.
pub fn session_with_pages(transport: &MockTransport, n: u32) -> TrackingSession {
    let numbers: Vec<String> = (1..=n).map(|p| p.to_string()).collect();
    let pages: Vec<&str> = numbers.iter().map(String::as_str).collect();
    TrackingSession::start(
        &reader_document(&pages),
        &TrackerConfig::default(),
        Arc::new(transport.clone()),
    )
    .expect("test document should bootstrap")
}

pub fn visible(page: u32, ratio: f64) -> RawTransition {
    RawTransition::new(page_id(&page.to_string()), true, ratio)
}

pub fn hidden(page: u32) -> RawTransition {
    RawTransition::new(page_id(&page.to_string()), false, 0.0)
}
