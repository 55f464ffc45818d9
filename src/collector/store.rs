//! In-memory progress store.
//!
//! One record per reader and document: reporting progress in another
//! section of the same document replaces the record.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Latest reading position for a reader in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingProgress {
    pub reader_id: u64,
    #[serde(rename = "manga_id")]
    pub document_id: u64,
    #[serde(rename = "chapter_id")]
    pub section_id: u64,
    pub last_page_number: u32,
    pub updated_at: DateTime<Utc>,
}

/// Shared handle to the store. Clones see the same records.
#[derive(Debug, Clone, Default)]
pub struct ProgressStore {
    records: Arc<RwLock<HashMap<(u64, u64), ReadingProgress>>>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the page a reader reached in a document section.
    pub async fn save_progress(
        &self,
        reader_id: u64,
        document_id: u64,
        section_id: u64,
        page_number: u32,
    ) -> ReadingProgress {
        let record = ReadingProgress {
            reader_id,
            document_id,
            section_id,
            last_page_number: page_number,
            updated_at: Utc::now(),
        };
        self.records
            .write()
            .await
            .insert((reader_id, document_id), record.clone());
        record
    }

    /// Latest record for a reader in a document, whatever the section.
    pub async fn last_read(&self, reader_id: u64, document_id: u64) -> Option<ReadingProgress> {
        self.records
            .read()
            .await
            .get(&(reader_id, document_id))
            .cloned()
    }

    /// Latest record if it belongs to `section_id`.
    pub async fn get_progress(
        &self,
        reader_id: u64,
        document_id: u64,
        section_id: u64,
    ) -> Option<ReadingProgress> {
        self.last_read(reader_id, document_id)
            .await
            .filter(|record| record.section_id == section_id)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
