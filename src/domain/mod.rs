//! Domain objects for reading progress tracking.
//!
//! ## Domain Objects
//!
//! - [`ReaderDocument`] / [`Element`] - The element tree the tracker observes
//! - [`PageElement`] - A tracked page element and its page number attribute
//! - [`VisibilityTransition`] - One element moving in or out of view
//! - [`ReportPayload`] - The record sent to the progress collector

pub mod document;
pub mod payload;
pub mod visibility;

pub use document::{
    parse_page_number, parse_positive_id, Element, ElementId, PageElement, ReaderDocument,
    DOCUMENT_ID_ATTR, PAGE_NUMBER_ATTR, ROOT_ELEMENT_ID, SECTION_ID_ATTR,
};
pub use payload::ReportPayload;
pub use visibility::{
    is_sufficiently_visible, RawTransition, VisibilityBatch, VisibilityTransition,
    VISIBILITY_THRESHOLD,
};
