//! Case catalog and likelihood-ratio table types.
//!
//! These types match the catalog.json file layout:
//!
//! ```json
//! {
//!   "schema_version": "1.0.0",
//!   "cases": { "AoD": { "name": "...", "acuity": 1, ... } },
//!   "likelihood_ratios": {
//!     "echo_flap": { "AoD": { "positive": 20.0, "negative": 0.1 } }
//!   }
//! }
//! ```

use cps_common::{AcuityLevel, Diagnosis, Sign};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete simulator catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    pub cases: BTreeMap<Diagnosis, CaseDefinition>,

    pub likelihood_ratios: BTreeMap<String, LikelihoodRow>,
}

/// Static description of one training case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDefinition {
    pub name: String,
    pub summary: String,

    /// Pre-arrival report from the ambulance crew.
    #[serde(default)]
    pub hotline: String,

    /// Baseline triage acuity before any deterioration.
    #[serde(default)]
    pub acuity: AcuityLevel,

    /// Essential action identifiers; drive which scripted actions are offered.
    #[serde(default)]
    pub essentials: Vec<String>,

    pub definitive: DefinitiveDiagnosis,
}

impl CaseDefinition {
    pub fn requires(&self, essential: &str) -> bool {
        self.essentials.iter().any(|e| e == essential)
    }
}

/// The test or procedure that confirms the diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitiveDiagnosis {
    /// Button label, e.g. "Confirm with contrast CT".
    pub label: String,
    /// Tag recorded as the confirmation method.
    pub tag: String,
    /// Text logged when the diagnosis is confirmed.
    pub confirmation_text: String,
}

/// Positive/negative likelihood ratios for one finding and one diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LikelihoodRatio {
    pub positive: f64,
    pub negative: f64,
}

impl LikelihoodRatio {
    /// A ratio that leaves the odds unchanged.
    pub const NEUTRAL: LikelihoodRatio = LikelihoodRatio {
        positive: 1.0,
        negative: 1.0,
    };

    pub const fn new(positive: f64, negative: f64) -> Self {
        Self { positive, negative }
    }

    pub fn for_sign(&self, sign: Sign) -> f64 {
        match sign {
            Sign::Positive => self.positive,
            Sign::Negative => self.negative,
        }
    }
}

impl Default for LikelihoodRatio {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Per-diagnosis ratios for a single finding. Absent diagnoses are neutral.
pub type LikelihoodRow = BTreeMap<Diagnosis, LikelihoodRatio>;

impl Catalog {
    pub fn case(&self, dx: Diagnosis) -> Option<&CaseDefinition> {
        self.cases.get(&dx)
    }

    /// Display name for a diagnosis, falling back to the built-in English name.
    pub fn name_of(&self, dx: Diagnosis) -> &str {
        self.case(dx)
            .map(|c| c.name.as_str())
            .unwrap_or_else(|| dx.default_name())
    }

    pub fn row(&self, finding: &str) -> Option<&LikelihoodRow> {
        self.likelihood_ratios.get(finding)
    }

    /// Likelihood ratio for `finding` observed with `sign` under `dx`.
    ///
    /// `None` when the finding is unknown. Known findings without an entry
    /// for `dx` are neutral (1.0).
    pub fn ratio(&self, finding: &str, dx: Diagnosis, sign: Sign) -> Option<f64> {
        self.row(finding).map(|row| {
            row.get(&dx)
                .copied()
                .unwrap_or(LikelihoodRatio::NEUTRAL)
                .for_sign(sign)
        })
    }

    pub fn findings(&self) -> impl Iterator<Item = &str> {
        self.likelihood_ratios.keys().map(String::as_str)
    }
}
