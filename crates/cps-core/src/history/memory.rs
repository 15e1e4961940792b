//! In-memory history store.
//!
//! Holds the same serialized blob the file store writes, so decoding and
//! corruption behave identically.

use super::{decode_blob, encode_blob, HistoryRecord, HistoryStore};
use crate::logging::event_names;

#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    blob: Option<String>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw blob, valid or not.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Vec<HistoryRecord> {
        let Some(raw) = self.blob.as_deref() else {
            return Vec::new();
        };
        decode_blob(raw).unwrap_or_else(|err| {
            tracing::warn!(
                event = event_names::HISTORY_LOAD_FAILED,
                error = %err,
                "history unreadable, starting empty"
            );
            Vec::new()
        })
    }

    fn append(&mut self, record: HistoryRecord) {
        let mut records = self.load();
        records.push(record);
        match encode_blob(&records) {
            Ok(blob) => self.blob = Some(blob),
            Err(err) => tracing::warn!(
                event = event_names::HISTORY_WRITE_FAILED,
                error = %err,
                "failed to save history record"
            ),
        }
    }

    fn clear(&mut self) {
        self.blob = None;
    }
}
