//! Structured event vocabulary.
//!
//! Events carry a stable dotted name and the session id so a JSONL log can
//! be grouped per training session.

/// Standard event names used in logging.
pub mod event_names {
    pub const RUN_STARTED: &str = "run.started";
    pub const CATALOG_LOADED: &str = "catalog.loaded";

    pub const SESSION_STARTED: &str = "session.started";
    pub const SESSION_RESET: &str = "session.reset";
    pub const ACTION_PERFORMED: &str = "action.performed";
    pub const EVIDENCE_APPLIED: &str = "evidence.applied";
    pub const DIAGNOSIS_CONFIRMED: &str = "diagnosis.confirmed";

    pub const HISTORY_LOAD_FAILED: &str = "history.load_failed";
    pub const HISTORY_WRITE_FAILED: &str = "history.write_failed";
    pub const HISTORY_CLEARED: &str = "history.cleared";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_are_dotted() {
        for name in [
            event_names::SESSION_STARTED,
            event_names::EVIDENCE_APPLIED,
            event_names::DIAGNOSIS_CONFIRMED,
            event_names::HISTORY_LOAD_FAILED,
        ] {
            assert_eq!(name.split('.').count(), 2, "{name}");
        }
    }
}
