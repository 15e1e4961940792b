//! File-backed history store.

use super::{decode_blob, encode_blob, HistoryError, HistoryRecord, HistoryStore};
use crate::logging::event_names;
use std::io::Write;
use std::path::{Path, PathBuf};

/// History kept as one JSON array in a single file.
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(HistoryError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        Ok(decode_blob(&raw)?)
    }

    fn write(&self, records: &[HistoryRecord]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        let content = encode_blob(records)?;
        let file_name = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("history.json");
        let tmp_path = self
            .path
            .with_file_name(format!("{}.tmp.{}", file_name, std::process::id()));
        {
            let mut file = std::fs::File::create(&tmp_path).map_err(io_error(&tmp_path))?;
            file.write_all(content.as_bytes())
                .map_err(io_error(&tmp_path))?;
            let _ = file.sync_all();
        }
        std::fs::rename(&tmp_path, &self.path).map_err(io_error(&self.path))?;
        Ok(())
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> HistoryError {
    let path = path.to_path_buf();
    move |source| HistoryError::Io { path, source }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> Vec<HistoryRecord> {
        self.read().unwrap_or_else(|err| {
            tracing::warn!(
                event = event_names::HISTORY_LOAD_FAILED,
                path = %self.path.display(),
                error = %err,
                "history unreadable, starting empty"
            );
            Vec::new()
        })
    }

    fn append(&mut self, record: HistoryRecord) {
        let mut records = self.load();
        records.push(record);
        if let Err(err) = self.write(&records) {
            tracing::warn!(
                event = event_names::HISTORY_WRITE_FAILED,
                path = %self.path.display(),
                error = %err,
                "failed to save history record"
            );
        }
    }

    fn clear(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(
                    event = event_names::HISTORY_CLEARED,
                    path = %self.path.display(),
                    "history cleared"
                );
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(
                    event = event_names::HISTORY_WRITE_FAILED,
                    path = %self.path.display(),
                    error = %err,
                    "failed to clear history"
                );
            }
        }
    }
}
