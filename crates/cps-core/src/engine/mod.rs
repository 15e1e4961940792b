//! The pure computations that derive display state from the action log.
//!
//! Every function here is deterministic and recomputed from scratch on
//! each call; nothing is cached between calls.

pub mod combiner;
pub mod feedback;
pub mod risk;
pub mod rubric;

pub use combiner::{combine, explain, CombineResult, EvidenceContribution};
pub use feedback::{evaluate, Issue, IssueCategory, IssueKind};
pub use risk::{effective_acuity, estimate_risk, DeficiencyTotals, Phase, RiskAssessment};
pub use rubric::{grade_for, score, Grade, RubricScore};
