//! Action log entries.

use cps_common::Observation;
use serde::{Deserialize, Serialize};

/// Tone recorded for an entry when none is given.
pub const DEFAULT_TONE: u8 = 3;

/// One logged action or utterance, with its deficiency counters and any
/// findings it reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogEntry {
    pub utterance: String,
    pub tags: Vec<String>,
    pub delay_sec: u32,
    pub missed_differentials: u32,
    pub missing_actions: u32,
    /// 0 = harsh. `None` means tone was not assessed.
    pub tone_score: Option<u8>,
    pub evidence: Vec<Observation>,
}

impl LogEntry {
    /// A plain entry: no deficiencies, default tone.
    pub fn new(utterance: impl Into<String>) -> Self {
        Self {
            utterance: utterance.into(),
            tone_score: Some(DEFAULT_TONE),
            ..Default::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_delay_sec(mut self, delay_sec: u32) -> Self {
        self.delay_sec = delay_sec;
        self
    }

    pub fn with_missed_differentials(mut self, count: u32) -> Self {
        self.missed_differentials = count;
        self
    }

    pub fn with_missing_actions(mut self, count: u32) -> Self {
        self.missing_actions = count;
        self
    }

    pub fn with_tone(mut self, tone: Option<u8>) -> Self {
        self.tone_score = tone;
        self
    }

    pub fn with_evidence(mut self, evidence: Vec<Observation>) -> Self {
        self.evidence = evidence;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Append-only sequence of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionLog {
    entries: Vec<LogEntry>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All findings in log order.
    pub fn evidence(&self) -> Vec<Observation> {
        self.entries
            .iter()
            .flat_map(|e| e.evidence.iter().cloned())
            .collect()
    }

    /// Only a case switch or reset may drop entries.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_defaults() {
        let e = LogEntry::new("Attach the monitor.");
        assert_eq!(e.tone_score, Some(DEFAULT_TONE));
        assert_eq!(e.delay_sec, 0);
        assert!(e.tags.is_empty());
        assert!(e.evidence.is_empty());
    }

    #[test]
    fn deserializes_sparse_entry() {
        let e: LogEntry = serde_json::from_str(r#"{"utterance":"x","tags":["ecg"]}"#).unwrap();
        assert!(e.has_tag("ecg"));
        assert_eq!(e.tone_score, None);
        assert_eq!(e.missing_actions, 0);
    }

    #[test]
    fn evidence_flattens_in_order() {
        let mut log = ActionLog::new();
        log.push(LogEntry::new("a").with_evidence(vec![Observation::positive("ecg_ste")]));
        log.push(LogEntry::new("b"));
        log.push(LogEntry::new("c").with_evidence(vec![
            Observation::negative("echo_flap"),
            Observation::positive("ddimer_high"),
        ]));
        let keys: Vec<_> = log.evidence().into_iter().map(|o| o.key).collect();
        assert_eq!(keys, vec!["ecg_ste", "echo_flap", "ddimer_high"]);
        assert_eq!(log.len(), 3);
    }
}
