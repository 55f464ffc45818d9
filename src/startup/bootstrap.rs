//! Session bootstrap: read ids and the page set from the reader document.

use std::collections::HashMap;

use crate::domain::{
    parse_positive_id, ElementId, PageElement, ReaderDocument, DOCUMENT_ID_ATTR,
    ROOT_ELEMENT_ID, SECTION_ID_ATTR,
};
use crate::error::BootstrapError;

/// Everything a session needs from the document, read once at start.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    pub document_id: u64,
    pub section_id: u64,
    /// Tracked page elements, in document order
    pub pages: Vec<PageElement>,
    by_id: HashMap<ElementId, usize>,
}

impl SessionContext {
    pub fn new(document_id: u64, section_id: u64, pages: Vec<PageElement>) -> Self {
        let by_id = pages
            .iter()
            .enumerate()
            .map(|(index, page)| (page.id.clone(), index))
            .collect();
        Self {
            document_id,
            section_id,
            pages,
            by_id,
        }
    }

    /// Look up a tracked page element by id.
    pub fn page(&self, id: &ElementId) -> Option<&PageElement> {
        self.by_id.get(id).map(|index| &self.pages[*index])
    }
}

/// Read a [`SessionContext`] from `document`.
///
/// Fails when the root is missing, either id attribute is absent or not a
/// positive integer, or the root holds no page elements.
pub fn bootstrap_session(document: &ReaderDocument) -> Result<SessionContext, BootstrapError> {
    let root = document.root().ok_or_else(|| BootstrapError::MissingRoot {
        id: ROOT_ELEMENT_ID.to_string(),
    })?;

    let read_id = |name: &'static str| -> Result<u64, BootstrapError> {
        let raw = root
            .attribute(name)
            .ok_or(BootstrapError::MissingAttribute { name })?;
        parse_positive_id(raw).ok_or_else(|| BootstrapError::InvalidAttribute {
            name,
            value: raw.to_string(),
        })
    };

    let document_id = read_id(DOCUMENT_ID_ATTR)?;
    let section_id = read_id(SECTION_ID_ATTR)?;

    let pages = root.page_elements();
    if pages.is_empty() {
        return Err(BootstrapError::NoPages);
    }

    Ok(SessionContext::new(document_id, section_id, pages))
}
