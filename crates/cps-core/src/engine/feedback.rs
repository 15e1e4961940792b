//! Deficiency detection over the action log.
//!
//! Every log entry is checked independently; one entry can raise several
//! issues. Acknowledgments (e.g. a contrast-allergy check) are emitted as
//! issues too and count toward the rubric like any other entry.

use crate::session::LogEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Delays strictly longer than this (seconds) are flagged.
pub const DELAY_THRESHOLD_SEC: u32 = 300;

/// More than this many missed differentials in one entry is flagged.
pub const MISSED_DIFFERENTIAL_THRESHOLD: u32 = 2;

/// Tone scores below this are flagged.
pub const TONE_FLOOR: u8 = 1;

pub const ALLERGY_CHECK_TAG: &str = "check_allergy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    InitialCare,
    ClinicalJudgement,
    Communication,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueCategory::InitialCare => write!(f, "initial care"),
            IssueCategory::ClinicalJudgement => write!(f, "clinical judgement"),
            IssueCategory::Communication => write!(f, "communication"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    DelayedIntervention,
    MissingActions,
    MissedDifferentials,
    AllergyChecked,
    HarshTone,
}

impl IssueKind {
    pub fn category(&self) -> IssueCategory {
        match self {
            IssueKind::DelayedIntervention | IssueKind::MissingActions => IssueCategory::InitialCare,
            IssueKind::MissedDifferentials | IssueKind::AllergyChecked => {
                IssueCategory::ClinicalJudgement
            }
            IssueKind::HarshTone => IssueCategory::Communication,
        }
    }

    fn improvement(&self) -> &'static str {
        match self {
            IssueKind::DelayedIntervention => {
                "Declare roles and run oxygen, monitor, pressure line and bloods in parallel."
            }
            IssueKind::MissingActions => {
                "Work the ABCDE checklist: observe, intervene, reassess."
            }
            IssueKind::MissedDifferentials => {
                "Keep the five killer chest pains in view and call them out before ordering tests."
            }
            IssueKind::AllergyChecked => "Check renal function (Cre/eGFR) as well before contrast.",
            IssueKind::HarshTone => {
                "Soften sentence endings and use reassuring words (it's okay, slowly)."
            }
        }
    }
}

/// One feedback item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub category: IssueCategory,
    pub description: String,
    pub improvement: String,
}

impl Issue {
    fn new(kind: IssueKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            category: kind.category(),
            description: description.into(),
            improvement: kind.improvement().to_string(),
        }
    }

    /// False for acknowledgments of good practice.
    pub fn is_deficiency(&self) -> bool {
        self.kind != IssueKind::AllergyChecked
    }
}

/// Scan the log and emit issues in log order.
pub fn evaluate(log: &[LogEntry]) -> Vec<Issue> {
    let mut issues = Vec::new();
    for entry in log {
        if entry.delay_sec > DELAY_THRESHOLD_SEC {
            issues.push(Issue::new(
                IssueKind::DelayedIntervention,
                "Initial intervention delayed by more than 5 minutes",
            ));
        }
        if entry.missing_actions > 0 {
            issues.push(Issue::new(
                IssueKind::MissingActions,
                format!("Missed initial actions ({})", entry.missing_actions),
            ));
        }
        if entry.missed_differentials > MISSED_DIFFERENTIAL_THRESHOLD {
            issues.push(Issue::new(
                IssueKind::MissedDifferentials,
                "Lethal differentials (AMI/AoD/PE/TPT/Boerhaave) not considered",
            ));
        }
        if entry.has_tag(ALLERGY_CHECK_TAG) {
            issues.push(Issue::new(
                IssueKind::AllergyChecked,
                "Contrast allergy checked before imaging",
            ));
        }
        if entry.tone_score.is_some_and(|tone| tone < TONE_FLOOR) {
            issues.push(Issue::new(
                IssueKind::HarshTone,
                "Harsh tone of voice made the patient anxious",
            ));
        }
    }
    issues
}
