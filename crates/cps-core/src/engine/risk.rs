//! Deterioration risk, phase and acuity estimation.
//!
//! Risk grows exponentially with elapsed time and linearly with logged
//! deficiencies:
//!
//! ```text
//! risk = round(6 * 1.05^minutes + 2 * missing_actions + 3 * missed_differentials
//!              + (total_delay >= 5 min ? 1 : 0))   capped at 20
//! ```

use crate::session::LogEntry;
use cps_common::AcuityLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BASE_RISK: f64 = 6.0;
pub const GROWTH_PER_MINUTE: f64 = 1.05;
pub const MISSING_ACTION_WEIGHT: f64 = 2.0;
pub const MISSED_DIFFERENTIAL_WEIGHT: f64 = 3.0;
pub const DELAY_PENALTY: f64 = 1.0;
pub const DELAY_PENALTY_MINUTES: f64 = 5.0;
pub const MAX_RISK: u8 = 20;

/// Risk at or above this forces acute deterioration and the most urgent acuity.
pub const DETERIORATION_THRESHOLD: u8 = 18;

pub const TREATMENT_PHASE_MINUTES: f64 = 60.0;
pub const DIAGNOSIS_PHASE_MINUTES: f64 = 30.0;

/// Coarse stage of the encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    InitialResuscitation,
    Diagnosis,
    Treatment,
    AcuteDeterioration,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::InitialResuscitation => "initial resuscitation",
            Phase::Diagnosis => "diagnosis",
            Phase::Treatment => "treatment",
            Phase::AcuteDeterioration => "acute deterioration",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Deficiencies summed over the whole log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeficiencyTotals {
    pub missed_differentials: u64,
    pub delay_sec: u64,
    pub missing_actions: u64,
}

impl DeficiencyTotals {
    pub fn from_log(log: &[LogEntry]) -> Self {
        log.iter().fold(Self::default(), |acc, entry| Self {
            missed_differentials: acc.missed_differentials + u64::from(entry.missed_differentials),
            delay_sec: acc.delay_sec + u64::from(entry.delay_sec),
            missing_actions: acc.missing_actions + u64::from(entry.missing_actions),
        })
    }

    pub fn delay_minutes(&self) -> f64 {
        self.delay_sec as f64 / 60.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub phase: Phase,
    /// Integer risk in [0, 20].
    pub risk: u8,
    pub totals: DeficiencyTotals,
}

impl RiskAssessment {
    pub fn is_deteriorating(&self) -> bool {
        self.risk >= DETERIORATION_THRESHOLD
    }
}

/// Estimate risk and phase from the log and elapsed minutes.
///
/// Negative or non-finite elapsed times count as 0.
pub fn estimate_risk(log: &[LogEntry], elapsed_minutes: f64) -> RiskAssessment {
    let minutes = if elapsed_minutes.is_finite() {
        elapsed_minutes.max(0.0)
    } else {
        0.0
    };
    let totals = DeficiencyTotals::from_log(log);

    let delay_penalty = if totals.delay_minutes() >= DELAY_PENALTY_MINUTES {
        DELAY_PENALTY
    } else {
        0.0
    };
    let raw = BASE_RISK * GROWTH_PER_MINUTE.powf(minutes)
        + MISSING_ACTION_WEIGHT * totals.missing_actions as f64
        + MISSED_DIFFERENTIAL_WEIGHT * totals.missed_differentials as f64
        + delay_penalty;
    let risk = raw.round().clamp(0.0, f64::from(MAX_RISK)) as u8;

    RiskAssessment {
        phase: phase_for(risk, minutes),
        risk,
        totals,
    }
}

/// Deterioration overrides everything; otherwise the 60-minute check runs
/// before the 30-minute one.
fn phase_for(risk: u8, minutes: f64) -> Phase {
    if risk >= DETERIORATION_THRESHOLD {
        Phase::AcuteDeterioration
    } else if minutes >= TREATMENT_PHASE_MINUTES {
        Phase::Treatment
    } else if minutes >= DIAGNOSIS_PHASE_MINUTES {
        Phase::Diagnosis
    } else {
        Phase::InitialResuscitation
    }
}

/// Baseline acuity unless the patient is deteriorating.
pub fn effective_acuity(baseline: AcuityLevel, risk: u8) -> AcuityLevel {
    if risk >= DETERIORATION_THRESHOLD {
        AcuityLevel::MOST_URGENT
    } else {
        baseline
    }
}
