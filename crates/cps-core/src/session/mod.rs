//! Training session state.
//!
//! A [`Session`] holds everything a trainee changes: the selected case, the
//! elapsed time, the append-only action log and whether the diagnosis has
//! been confirmed. Everything displayed (posterior, risk, acuity, feedback,
//! score) is derived from that state by [`Session::snapshot`].

pub mod log;

pub use log::{ActionLog, LogEntry, DEFAULT_TONE};

use crate::actions::{action_menu, find_action, ScriptedAction};
use crate::engine::{
    effective_acuity, estimate_risk, evaluate, explain, score, EvidenceContribution, Issue,
    Phase, RubricScore,
};
use crate::history::{HistoryRecord, HistoryStore};
use crate::logging::event_names;
use chrono::{DateTime, Utc};
use cps_common::{AcuityLevel, Diagnosis, DiagnosisScores, Error, Observation, Result, SessionId};
use cps_config::{CaseDefinition, Catalog};
use serde::Serialize;

/// User name recorded when none was entered.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Tag on the log entry appended by a confirmation.
pub const DEFINITIVE_TAG: &str = "definitive";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiagnosisState {
    Pending,
    /// Confirmed with the case's definitive method tag.
    Confirmed { method: String },
}

impl DiagnosisState {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, DiagnosisState::Confirmed { .. })
    }
}

/// Derived view of a session at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub case: Diagnosis,
    pub case_name: String,
    pub user: String,
    pub elapsed_minutes: f64,
    pub baseline_acuity: AcuityLevel,
    pub acuity: AcuityLevel,
    pub phase: Phase,
    pub risk: u8,
    pub prior: DiagnosisScores,
    pub posterior: DiagnosisScores,
    pub leading: Diagnosis,
    pub evidence: Vec<Observation>,
    pub evidence_breakdown: Vec<EvidenceContribution>,
    pub feedback: Vec<Issue>,
    pub score: RubricScore,
    pub diagnosis: DiagnosisState,
    pub log: Vec<LogEntry>,
}

/// One trainee working one case.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    catalog: &'a Catalog,
    id: SessionId,
    case: Diagnosis,
    case_def: &'a CaseDefinition,
    user: String,
    elapsed_minutes: f64,
    log: ActionLog,
    diagnosis: DiagnosisState,
    prior: DiagnosisScores,
    posterior_history: Vec<DiagnosisScores>,
}

impl<'a> Session<'a> {
    /// Start a session on `case`. Fails if the catalog has no such case.
    pub fn new(catalog: &'a Catalog, case: Diagnosis) -> Result<Self> {
        let case_def = lookup_case(catalog, case)?;
        let mut session = Self {
            catalog,
            id: SessionId::new(),
            case,
            case_def,
            user: String::new(),
            elapsed_minutes: 0.0,
            log: ActionLog::new(),
            diagnosis: DiagnosisState::Pending,
            prior: DiagnosisScores::uniform(),
            posterior_history: Vec::new(),
        };
        session.record_posterior();
        tracing::info!(
            event = event_names::SESSION_STARTED,
            session_id = %session.id,
            case = %case,
            "session started"
        );
        Ok(session)
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn case(&self) -> Diagnosis {
        self.case
    }

    pub fn case_definition(&self) -> &'a CaseDefinition {
        self.case_def
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn set_user(&mut self, user: impl Into<String>) {
        self.user = user.into();
    }

    pub fn elapsed_minutes(&self) -> f64 {
        self.elapsed_minutes
    }

    /// Negative or non-finite values are stored as 0.
    pub fn set_elapsed_minutes(&mut self, minutes: f64) {
        self.elapsed_minutes = if minutes.is_finite() { minutes.max(0.0) } else { 0.0 };
    }

    pub fn log(&self) -> &[LogEntry] {
        self.log.entries()
    }

    pub fn diagnosis(&self) -> &DiagnosisState {
        &self.diagnosis
    }

    /// Posterior after every change to the log, oldest first.
    pub fn posterior_history(&self) -> &[DiagnosisScores] {
        &self.posterior_history
    }

    /// All findings logged so far.
    pub fn evidence(&self) -> Vec<Observation> {
        self.log.evidence()
    }

    pub fn actions(&self) -> Vec<ScriptedAction> {
        action_menu(self.case_def, self.case)
    }

    pub fn append(&mut self, entry: LogEntry) {
        if !entry.evidence.is_empty() {
            tracing::debug!(
                event = event_names::EVIDENCE_APPLIED,
                session_id = %self.id,
                findings = %entry
                    .evidence
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
                "evidence applied"
            );
        }
        self.log.push(entry);
        self.record_posterior();
    }

    /// Append the entry of the scripted action `action_id`.
    pub fn perform(&mut self, action_id: &str) -> Result<()> {
        let action = find_action(self.case_def, self.case, action_id).ok_or_else(|| {
            Error::UnknownAction {
                case: self.case.to_string(),
                action: action_id.to_string(),
            }
        })?;
        tracing::debug!(
            event = event_names::ACTION_PERFORMED,
            session_id = %self.id,
            action = %action.id,
            "action performed"
        );
        self.append(action.entry);
        Ok(())
    }

    /// Switch to another case, discarding the log, time and confirmation.
    pub fn select_case(&mut self, case: Diagnosis) -> Result<()> {
        self.case_def = lookup_case(self.catalog, case)?;
        self.case = case;
        self.reset();
        Ok(())
    }

    /// Clear the log, time and confirmation; keep case and user.
    pub fn reset(&mut self) {
        self.log.clear();
        self.elapsed_minutes = 0.0;
        self.diagnosis = DiagnosisState::Pending;
        self.record_posterior();
        tracing::info!(
            event = event_names::SESSION_RESET,
            session_id = %self.id,
            case = %self.case,
            "session reset"
        );
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let evidence = self.log.evidence();
        let combined = explain(self.catalog, &self.prior, &evidence);
        let assessment = estimate_risk(self.log.entries(), self.elapsed_minutes);
        let feedback = evaluate(self.log.entries());
        let score = score(&feedback);

        SessionSnapshot {
            session_id: self.id.to_string(),
            case: self.case,
            case_name: self.case_def.name.clone(),
            user: self.user.clone(),
            elapsed_minutes: self.elapsed_minutes,
            baseline_acuity: self.case_def.acuity,
            acuity: effective_acuity(self.case_def.acuity, assessment.risk),
            phase: assessment.phase,
            risk: assessment.risk,
            prior: self.prior,
            posterior: combined.posterior,
            leading: combined.leading,
            evidence,
            evidence_breakdown: combined.contributions,
            feedback,
            score,
            diagnosis: self.diagnosis.clone(),
            log: self.log.entries().to_vec(),
        }
    }

    /// Confirm the diagnosis and save a history record.
    ///
    /// The record reflects the session before the definitive entry is
    /// appended. A second call does nothing and returns `None`.
    pub fn confirm_diagnosis(
        &mut self,
        store: &mut dyn HistoryStore,
        now: DateTime<Utc>,
    ) -> Option<HistoryRecord> {
        if self.diagnosis.is_confirmed() {
            return None;
        }

        let before = self.snapshot();
        let user = if self.user.trim().is_empty() {
            ANONYMOUS_USER.to_string()
        } else {
            self.user.clone()
        };
        let record = HistoryRecord {
            user,
            case: self.case,
            score: before.score.total,
            feedback_count: before.feedback.len(),
            evidence_count: before.evidence.len(),
            posterior: before.posterior,
            timestamp: now,
        };

        let case_def = self.case_def;
        let definitive = &case_def.definitive;
        self.diagnosis = DiagnosisState::Confirmed {
            method: definitive.tag.clone(),
        };
        self.append(
            LogEntry::new(format!("[Diagnosis confirmed] {}", definitive.confirmation_text))
                .with_tags([DEFINITIVE_TAG]),
        );

        store.append(record.clone());
        tracing::info!(
            event = event_names::DIAGNOSIS_CONFIRMED,
            session_id = %self.id,
            case = %self.case,
            method = %definitive.tag,
            score = record.score,
            "diagnosis confirmed"
        );
        Some(record)
    }

    fn record_posterior(&mut self) {
        let evidence = self.log.evidence();
        let posterior = explain(self.catalog, &self.prior, &evidence).posterior;
        self.posterior_history.push(posterior);
    }
}

fn lookup_case(catalog: &Catalog, case: Diagnosis) -> Result<&CaseDefinition> {
    catalog
        .case(case)
        .ok_or_else(|| Error::UnknownCase(case.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistoryStore;
    use chrono::TimeZone;
    use cps_config::builtin_catalog;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap()
    }

    #[test]
    fn fresh_session_snapshot() {
        let session = Session::new(builtin_catalog(), Diagnosis::AorticDissection).unwrap();
        let snap = session.snapshot();
        assert_eq!(snap.risk, 6);
        assert_eq!(snap.phase, Phase::InitialResuscitation);
        assert_eq!(snap.acuity, AcuityLevel::Resuscitation);
        assert_eq!(snap.score.total, 100);
        assert!(snap.feedback.is_empty());
        assert_eq!(snap.diagnosis, DiagnosisState::Pending);
        assert_eq!(session.posterior_history().len(), 1);
    }

    #[test]
    fn unknown_case_in_catalog_is_error() {
        let mut catalog = builtin_catalog().clone();
        catalog.cases.remove(&Diagnosis::Boerhaave);
        let err = Session::new(&catalog, Diagnosis::Boerhaave).unwrap_err();
        assert!(matches!(err, Error::UnknownCase(_)));
    }

    #[test]
    fn perform_appends_and_tracks_posterior() {
        let mut session = Session::new(builtin_catalog(), Diagnosis::AorticDissection).unwrap();
        session.perform("oxygen").unwrap();
        session.perform("echo_flap_pos").unwrap();
        assert_eq!(session.log().len(), 2);
        assert_eq!(session.posterior_history().len(), 3);
        let snap = session.snapshot();
        assert_eq!(snap.leading, Diagnosis::AorticDissection);
        assert_eq!(snap.evidence, vec![Observation::positive("echo_flap")]);
    }

    #[test]
    fn perform_unknown_action_is_error() {
        let mut session = Session::new(builtin_catalog(), Diagnosis::Ami).unwrap();
        let err = session.perform("decompression").unwrap_err();
        assert!(matches!(err, Error::UnknownAction { .. }));
        assert!(session.log().is_empty());
    }

    #[test]
    fn deterioration_forces_level_one() {
        let mut session = Session::new(builtin_catalog(), Diagnosis::Ami).unwrap();
        // 6 + 2*7 + 1 = 21, capped
        for _ in 0..7 {
            session.perform("silent_delay").unwrap();
        }
        let snap = session.snapshot();
        assert_eq!(snap.risk, 20);
        assert_eq!(snap.phase, Phase::AcuteDeterioration);
        assert_eq!(snap.baseline_acuity, AcuityLevel::Emergent);
        assert_eq!(snap.acuity, AcuityLevel::Resuscitation);
    }

    #[test]
    fn confirm_records_state_before_definitive_entry() {
        let mut store = MemoryHistoryStore::new();
        let mut session = Session::new(builtin_catalog(), Diagnosis::AorticDissection)
            .unwrap()
            .with_user("Dr. Sato");
        session.perform("check_allergy").unwrap();
        session.perform("echo_flap_pos").unwrap();

        let record = session.confirm_diagnosis(&mut store, now()).unwrap();
        assert_eq!(record.user, "Dr. Sato");
        assert_eq!(record.case, Diagnosis::AorticDissection);
        assert_eq!(record.feedback_count, 1);
        assert_eq!(record.score, 95);
        assert_eq!(record.evidence_count, 1);
        assert_eq!(record.timestamp, now());

        assert_eq!(session.log().len(), 3);
        assert!(session.log()[2].has_tag(DEFINITIVE_TAG));
        assert_eq!(
            session.diagnosis(),
            &DiagnosisState::Confirmed {
                method: "cta".to_string()
            }
        );
        assert_eq!(store.load(), vec![record]);
    }

    #[test]
    fn confirm_is_idempotent() {
        let mut store = MemoryHistoryStore::new();
        let mut session = Session::new(builtin_catalog(), Diagnosis::PulmonaryEmbolism).unwrap();
        assert!(session.confirm_diagnosis(&mut store, now()).is_some());
        assert!(session.confirm_diagnosis(&mut store, now()).is_none());
        assert_eq!(store.load().len(), 1);
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn empty_user_is_anonymous() {
        let mut store = MemoryHistoryStore::new();
        let mut session = Session::new(builtin_catalog(), Diagnosis::Ami)
            .unwrap()
            .with_user("   ");
        let record = session.confirm_diagnosis(&mut store, now()).unwrap();
        assert_eq!(record.user, ANONYMOUS_USER);
    }

    #[test]
    fn select_case_resets_state() {
        let mut store = MemoryHistoryStore::new();
        let mut session = Session::new(builtin_catalog(), Diagnosis::Ami).unwrap();
        session.set_elapsed_minutes(12.0);
        session.perform("ecg_ste_pos").unwrap();
        session.confirm_diagnosis(&mut store, now());

        session.select_case(Diagnosis::TensionPneumothorax).unwrap();
        assert_eq!(session.case(), Diagnosis::TensionPneumothorax);
        assert!(session.log().is_empty());
        assert_eq!(session.elapsed_minutes(), 0.0);
        assert_eq!(session.diagnosis(), &DiagnosisState::Pending);
        assert!(session.perform("decompression").is_ok());
    }

    #[test]
    fn negative_elapsed_is_stored_as_zero() {
        let mut session = Session::new(builtin_catalog(), Diagnosis::Ami).unwrap();
        session.set_elapsed_minutes(-3.0);
        assert_eq!(session.elapsed_minutes(), 0.0);
        session.set_elapsed_minutes(f64::INFINITY);
        assert_eq!(session.elapsed_minutes(), 0.0);
    }
}
