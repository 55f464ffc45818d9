//! Reader document model.
//!
//! A small stand-in for the rendered page: elements with an id, string
//! attributes and children. The tracker never creates or mutates elements,
//! it only looks up the reader root, its identifier attributes and the page
//! elements underneath it.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReadmarkResult;

/// Id of the container holding the reader pages.
pub const ROOT_ELEMENT_ID: &str = "reader-root";
/// Root attribute carrying the document (manga) id.
pub const DOCUMENT_ID_ATTR: &str = "data-manga-id";
/// Root attribute carrying the section (chapter) id.
pub const SECTION_ID_ATTR: &str = "data-chapter-id";
/// Attribute marking an element as a page, holding its page number.
pub const PAGE_NUMBER_ATTR: &str = "data-page-number";

/// Opaque element identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A node of the reader document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(id),
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder: set an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder: append a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Attribute value, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Find this element or a descendant by id (depth-first, document order).
    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id.as_str() == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// All descendants in document order, excluding `self`.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut stack: Vec<&Element> = self.children.iter().rev().collect();
        while let Some(el) = stack.pop() {
            out.push(el);
            stack.extend(el.children.iter().rev());
        }
        out
    }

    /// Descendants carrying a page number attribute, in document order.
    ///
    /// The attribute only has to be present; its value is checked later,
    /// when a transition for the element is applied.
    pub fn page_elements(&self) -> Vec<PageElement> {
        self.descendants()
            .into_iter()
            .filter_map(|el| {
                el.attribute(PAGE_NUMBER_ATTR).map(|raw| PageElement {
                    id: el.id.clone(),
                    raw_page_number: raw.to_string(),
                })
            })
            .collect()
    }
}

/// The whole rendered document: a forest of top-level elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReaderDocument {
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl ReaderDocument {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Parse a document from its JSON form.
    pub fn from_json(json: &str) -> ReadmarkResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a document from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> ReadmarkResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Look up an element anywhere in the document.
    pub fn find_element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find_map(|el| el.find(id))
    }

    /// The reader root container, if rendered.
    pub fn root(&self) -> Option<&Element> {
        self.find_element(ROOT_ELEMENT_ID)
    }
}

/// A page element in the tracked set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageElement {
    pub id: ElementId,
    /// Raw `data-page-number` value as rendered.
    pub raw_page_number: String,
}

impl PageElement {
    pub fn new(id: impl Into<String>, raw_page_number: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(id),
            raw_page_number: raw_page_number.into(),
        }
    }

    /// Page number, or `None` if the attribute is not a positive integer.
    pub fn page_number(&self) -> Option<u32> {
        parse_page_number(&self.raw_page_number)
    }
}

/// Parse a page number attribute. Zero, negatives, and non-numeric input are rejected.
pub fn parse_page_number(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

/// Parse a document or section id attribute.
pub fn parse_positive_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|n| *n > 0)
}
