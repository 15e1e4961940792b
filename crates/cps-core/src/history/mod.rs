//! Local history of completed sessions.
//!
//! History is a single JSON array stored under the `chestpain_sim_history_v1`
//! key. Reads never fail: a missing or unparsable blob is an empty history.
//! Writes are fire-and-forget; failures are logged and dropped.

pub mod file;
pub mod memory;

pub use file::FileHistoryStore;
pub use memory::MemoryHistoryStore;

use chrono::{DateTime, Utc};
use cps_common::{Diagnosis, DiagnosisScores};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Summary of one completed session.
///
/// Field names are camelCase, matching the stored blob layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Trainee name, `anonymous` when none was given.
    pub user: String,
    pub case: Diagnosis,
    /// Rubric total in [60, 100].
    pub score: u8,
    pub feedback_count: usize,
    pub evidence_count: usize,
    pub posterior: DiagnosisScores,
    pub timestamp: DateTime<Utc>,
}

/// Persistence backend for history records.
pub trait HistoryStore {
    /// All stored records, oldest first. Empty on any read problem.
    fn load(&self) -> Vec<HistoryRecord>;

    /// Append one record. Failures are logged, never returned.
    fn append(&mut self, record: HistoryRecord);

    /// Remove every stored record.
    fn clear(&mut self);
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("history blob is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn decode_blob(raw: &str) -> Result<Vec<HistoryRecord>, serde_json::Error> {
    serde_json::from_str(raw)
}

pub fn encode_blob(records: &[HistoryRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(records)
}

/// Aggregate view shown in the history panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub count: usize,
    /// Mean score rounded to the nearest integer; 0 for an empty history.
    pub average_score: u32,
    /// Newest first.
    pub records: Vec<HistoryRecord>,
}

pub fn summarize(mut records: Vec<HistoryRecord>) -> HistorySummary {
    let count = records.len();
    let average_score = if count == 0 {
        0
    } else {
        let total: u64 = records.iter().map(|r| u64::from(r.score)).sum();
        (total as f64 / count as f64).round() as u32
    };
    records.reverse();
    HistorySummary {
        count,
        average_score,
        records,
    }
}

#[cfg(test)]
pub(crate) fn sample_record(user: &str, score: u8) -> HistoryRecord {
    use chrono::TimeZone;
    HistoryRecord {
        user: user.to_string(),
        case: Diagnosis::AorticDissection,
        score,
        feedback_count: 2,
        evidence_count: 1,
        posterior: DiagnosisScores::uniform(),
        timestamp: Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_camel_case_fields() {
        let json = serde_json::to_value(sample_record("kim", 90)).unwrap();
        assert_eq!(json["feedbackCount"], 2);
        assert_eq!(json["evidenceCount"], 1);
        assert_eq!(json["case"], "AoD");
        assert_eq!(json["timestamp"], "2026-10-18T09:30:00Z");
        assert!(json["posterior"]["Boerhaave"].is_number());
    }

    #[test]
    fn decodes_camel_case_blob() {
        let raw = r#"[{"user":"a","case":"PE","score":85,"feedbackCount":3,"evidenceCount":2,
            "posterior":{"AMI":0.1,"AoD":0.1,"PE":0.6,"TPT":0.1,"Boerhaave":0.1},
            "timestamp":"2026-10-01T12:00:00.000Z"}]"#;
        let records = decode_blob(raw).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].case, Diagnosis::PulmonaryEmbolism);
        assert_eq!(records[0].score, 85);
    }

    #[test]
    fn summary_is_newest_first_with_rounded_mean() {
        let summary = summarize(vec![
            sample_record("first", 100),
            sample_record("second", 85),
            sample_record("third", 60),
        ]);
        assert_eq!(summary.count, 3);
        // 245 / 3 = 81.67
        assert_eq!(summary.average_score, 82);
        assert_eq!(summary.records[0].user, "third");
        assert_eq!(summary.records[2].user, "first");
    }

    #[test]
    fn empty_summary() {
        let summary = summarize(Vec::new());
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average_score, 0);
        assert!(summary.records.is_empty());
    }
}
