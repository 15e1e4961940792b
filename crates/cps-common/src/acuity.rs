//! Triage acuity levels (JTAS 1-5, 1 = most urgent).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Five-level triage acuity.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum AcuityLevel {
    /// Level 1: immediate intervention.
    Resuscitation = 1,
    /// Level 2: within 10 minutes.
    Emergent = 2,
    /// Level 3: within 30 minutes.
    #[default]
    Urgent = 3,
    /// Level 4: within 60 minutes.
    LessUrgent = 4,
    /// Level 5: within 120 minutes.
    NonUrgent = 5,
}

impl AcuityLevel {
    /// The most urgent level, forced when a patient deteriorates.
    pub const MOST_URGENT: AcuityLevel = AcuityLevel::Resuscitation;

    pub fn level(&self) -> u8 {
        *self as u8
    }

    /// Short badge label, e.g. `JTAS 2`.
    pub fn label(&self) -> String {
        format!("JTAS {}", self.level())
    }

    pub fn description(&self) -> &'static str {
        match self {
            AcuityLevel::Resuscitation => "most severe (treat immediately)",
            AcuityLevel::Emergent => "emergent (within 10 minutes)",
            AcuityLevel::Urgent => "urgent (within 30 minutes)",
            AcuityLevel::LessUrgent => "less urgent (within 60 minutes)",
            AcuityLevel::NonUrgent => "non-urgent (within 120 minutes)",
        }
    }

    /// Target time to physician assessment, in minutes.
    pub fn target_minutes(&self) -> u32 {
        match self {
            AcuityLevel::Resuscitation => 0,
            AcuityLevel::Emergent => 10,
            AcuityLevel::Urgent => 30,
            AcuityLevel::LessUrgent => 60,
            AcuityLevel::NonUrgent => 120,
        }
    }
}

impl TryFrom<u8> for AcuityLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AcuityLevel::Resuscitation),
            2 => Ok(AcuityLevel::Emergent),
            3 => Ok(AcuityLevel::Urgent),
            4 => Ok(AcuityLevel::LessUrgent),
            5 => Ok(AcuityLevel::NonUrgent),
            other => Err(format!("acuity level must be 1-5, got {}", other)),
        }
    }
}

impl From<AcuityLevel> for u8 {
    fn from(level: AcuityLevel) -> Self {
        level.level()
    }
}

impl fmt::Display for AcuityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
