//! The fixed diagnosis domain.
//!
//! Five life-threatening causes of chest pain. The serialized names (`AMI`,
//! `AoD`, `PE`, `TPT`, `Boerhaave`) are stable: they key the catalog file,
//! the likelihood-ratio table and persisted history records.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five candidate diagnoses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Diagnosis {
    /// Acute myocardial infarction.
    #[serde(rename = "AMI")]
    Ami,
    /// Aortic dissection.
    #[serde(rename = "AoD")]
    AorticDissection,
    /// Pulmonary embolism.
    #[serde(rename = "PE")]
    PulmonaryEmbolism,
    /// Tension pneumothorax.
    #[serde(rename = "TPT")]
    TensionPneumothorax,
    /// Spontaneous esophageal rupture.
    #[serde(rename = "Boerhaave")]
    Boerhaave,
}

impl Diagnosis {
    /// All diagnoses in canonical order.
    pub const ALL: [Diagnosis; 5] = [
        Diagnosis::Ami,
        Diagnosis::AorticDissection,
        Diagnosis::PulmonaryEmbolism,
        Diagnosis::TensionPneumothorax,
        Diagnosis::Boerhaave,
    ];

    /// Stable short code used in files and on the command line.
    pub fn code(&self) -> &'static str {
        match self {
            Diagnosis::Ami => "AMI",
            Diagnosis::AorticDissection => "AoD",
            Diagnosis::PulmonaryEmbolism => "PE",
            Diagnosis::TensionPneumothorax => "TPT",
            Diagnosis::Boerhaave => "Boerhaave",
        }
    }

    /// Fallback display name when no catalog entry is available.
    pub fn default_name(&self) -> &'static str {
        match self {
            Diagnosis::Ami => "Acute myocardial infarction",
            Diagnosis::AorticDissection => "Aortic dissection",
            Diagnosis::PulmonaryEmbolism => "Pulmonary embolism",
            Diagnosis::TensionPneumothorax => "Tension pneumothorax",
            Diagnosis::Boerhaave => "Boerhaave syndrome",
        }
    }

    fn index(&self) -> usize {
        match self {
            Diagnosis::Ami => 0,
            Diagnosis::AorticDissection => 1,
            Diagnosis::PulmonaryEmbolism => 2,
            Diagnosis::TensionPneumothorax => 3,
            Diagnosis::Boerhaave => 4,
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Diagnosis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Diagnosis::ALL
            .iter()
            .copied()
            .find(|d| d.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown diagnosis: {}", s))
    }
}

/// One value per diagnosis (probabilities, log-odds, contributions).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DiagnosisScores {
    #[serde(rename = "AMI")]
    pub ami: f64,
    #[serde(rename = "AoD")]
    pub aortic_dissection: f64,
    #[serde(rename = "PE")]
    pub pulmonary_embolism: f64,
    #[serde(rename = "TPT")]
    pub tension_pneumothorax: f64,
    #[serde(rename = "Boerhaave")]
    pub boerhaave: f64,
}

impl DiagnosisScores {
    /// Same value for every diagnosis.
    pub fn splat(value: f64) -> Self {
        Self::from_array([value; 5])
    }

    /// Uniform probability over the five diagnoses.
    pub fn uniform() -> Self {
        Self::splat(1.0 / Diagnosis::ALL.len() as f64)
    }

    /// Build from values in [`Diagnosis::ALL`] order.
    pub fn from_array(values: [f64; 5]) -> Self {
        Self {
            ami: values[0],
            aortic_dissection: values[1],
            pulmonary_embolism: values[2],
            tension_pneumothorax: values[3],
            boerhaave: values[4],
        }
    }

    /// Values in [`Diagnosis::ALL`] order.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.ami,
            self.aortic_dissection,
            self.pulmonary_embolism,
            self.tension_pneumothorax,
            self.boerhaave,
        ]
    }

    pub fn get(&self, dx: Diagnosis) -> f64 {
        self.as_array()[dx.index()]
    }

    pub fn set(&mut self, dx: Diagnosis, value: f64) {
        let mut values = self.as_array();
        values[dx.index()] = value;
        *self = Self::from_array(values);
    }

    /// Apply `f` to every value.
    pub fn map(&self, f: impl Fn(Diagnosis, f64) -> f64) -> Self {
        let mut out = *self;
        for dx in Diagnosis::ALL {
            out.set(dx, f(dx, self.get(dx)));
        }
        out
    }

    /// (diagnosis, value) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Diagnosis, f64)> + '_ {
        Diagnosis::ALL.into_iter().map(move |dx| (dx, self.get(dx)))
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Diagnosis with the largest value. Ties resolve to canonical order.
    pub fn leading(&self) -> (Diagnosis, f64) {
        self.iter()
            .fold((Diagnosis::Ami, f64::NEG_INFINITY), |best, (dx, v)| {
                if v > best.1 {
                    (dx, v)
                } else {
                    best
                }
            })
    }
}
