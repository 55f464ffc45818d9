//! Progress report wire payload.

use serde::{Deserialize, Serialize};

/// Body of a `POST /progress` request.
///
/// Field names on the wire follow the collector's manga/chapter vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPayload {
    #[serde(rename = "manga_id")]
    pub document_id: u64,
    #[serde(rename = "chapter_id")]
    pub section_id: u64,
    pub page_number: u32,
}

impl ReportPayload {
    pub fn new(document_id: u64, section_id: u64, page_number: u32) -> Self {
        Self {
            document_id,
            section_id,
            page_number,
        }
    }
}
