//! Built-in case catalog and teaching likelihood ratios.
//!
//! The ratios are representative teaching values, not a validated clinical
//! model.

use crate::catalog::{CaseDefinition, Catalog, DefinitiveDiagnosis, LikelihoodRatio, LikelihoodRow};
use crate::CONFIG_SCHEMA_VERSION;
use cps_common::{AcuityLevel, Diagnosis};
use std::collections::BTreeMap;
use std::sync::OnceLock;

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

/// The process-wide built-in catalog.
pub fn builtin_catalog() -> &'static Catalog {
    BUILTIN.get_or_init(default_catalog)
}

/// Build a fresh copy of the built-in catalog.
pub fn default_catalog() -> Catalog {
    Catalog {
        schema_version: CONFIG_SCHEMA_VERSION.to_string(),
        description: Some("Five killer chest pain: AMI / AoD / PE / TPT / Boerhaave".to_string()),
        cases: default_cases(),
        likelihood_ratios: default_likelihood_ratios(),
    }
}

fn case(
    name: &str,
    summary: &str,
    hotline: &str,
    acuity: AcuityLevel,
    essentials: &[&str],
    definitive: (&str, &str, &str),
) -> CaseDefinition {
    CaseDefinition {
        name: name.to_string(),
        summary: summary.to_string(),
        hotline: hotline.to_string(),
        acuity,
        essentials: essentials.iter().map(|s| s.to_string()).collect(),
        definitive: DefinitiveDiagnosis {
            label: definitive.0.to_string(),
            tag: definitive.1.to_string(),
            confirmation_text: definitive.2.to_string(),
        },
    }
}

fn default_cases() -> BTreeMap<Diagnosis, CaseDefinition> {
    BTreeMap::from([
        (
            Diagnosis::Ami,
            case(
                "Acute myocardial infarction (AMI)",
                "Retrosternal pressure with cold sweat and nausea, radiating to the left shoulder and arm. \
                 History of hypertension, diabetes and smoking.",
                "Suspected ST elevation. BP 96/58, HR 110, SpO2 94%.",
                AcuityLevel::Emergent,
                &["oxygen", "monitor", "line", "bloods", "ecg", "echo"],
                (
                    "Confirm by cardiac catheterization (prepare PCI)",
                    "cath",
                    "STEMI confirmed on catheterization; proceed to emergency PCI.",
                ),
            ),
        ),
        (
            Diagnosis::AorticDissection,
            case(
                "Aortic dissection (Stanford A)",
                "Tearing pain radiating to the back, arm blood pressure differential, pallor and cold sweat.",
                "Right 100/60, left 70/50, HR 108, SpO2 95%.",
                AcuityLevel::Resuscitation,
                &["oxygen", "monitor", "line_pressure", "bloods", "echo"],
                (
                    "Confirm with contrast CT (call cardiac surgery)",
                    "cta",
                    "Type A dissection confirmed on contrast CT; emergency surgery with cardiovascular surgery.",
                ),
            ),
        ),
        (
            Diagnosis::PulmonaryEmbolism,
            case(
                "Pulmonary embolism (PE)",
                "Sudden dyspnea and chest pain. Lower-limb edema. Recent long-distance travel.",
                "BP 88/52, HR 124, SpO2 88% (improves on O2), RR 30.",
                AcuityLevel::Resuscitation,
                &["oxygen", "monitor", "line", "bloods_ddimer", "echo_rv"],
                (
                    "Confirm with CT pulmonary angiography (anticoagulation / catheter)",
                    "ctpa",
                    "PE confirmed on CTPA; consider anticoagulation or thrombectomy.",
                ),
            ),
        ),
        (
            Diagnosis::TensionPneumothorax,
            case(
                "Tension pneumothorax (TPT)",
                "Sudden chest pain and dyspnea. Absent breath sounds on the affected side, tracheal deviation, \
                 hyperresonance.",
                "BP 80/50, HR 128, SpO2 86%, RR 32.",
                AcuityLevel::Resuscitation,
                &["oxygen", "monitor", "needle_decompression", "bloods_abg"],
                (
                    "Confirm by chest drain after decompression",
                    "decompression",
                    "Improved after needle decompression; chest drain placed.",
                ),
            ),
        ),
        (
            Diagnosis::Boerhaave,
            case(
                "Spontaneous esophageal rupture (Boerhaave)",
                "Severe chest pain, dyspnea and subcutaneous emphysema immediately after vomiting.",
                "BP 90/58, HR 110, SpO2 90%, T 37.8C.",
                AcuityLevel::Emergent,
                &["oxygen", "monitor", "line", "bloods", "xray", "ct_esoph"],
                (
                    "Confirm contrast leak on CT (emergency surgery)",
                    "ct_esoph",
                    "Contrast leak on CT; emergency thoracic / GI surgery.",
                ),
            ),
        ),
    ])
}

fn row(ratios: [(f64, f64); 5]) -> LikelihoodRow {
    Diagnosis::ALL
        .into_iter()
        .zip(ratios)
        .map(|(dx, (pos, neg))| (dx, LikelihoodRatio::new(pos, neg)))
        .collect()
}

fn default_likelihood_ratios() -> BTreeMap<String, LikelihoodRow> {
    // Columns: AMI, AoD, PE, TPT, Boerhaave
    BTreeMap::from([
        (
            "ecg_ste".to_string(),
            row([(13.0, 0.2), (1.0, 1.0), (1.0, 1.0), (1.0, 1.0), (1.0, 1.0)]),
        ),
        (
            "echo_flap".to_string(),
            row([(0.7, 1.2), (20.0, 0.1), (1.0, 1.0), (1.0, 1.0), (1.0, 1.0)]),
        ),
        (
            "ddimer_high".to_string(),
            row([(1.2, 0.9), (2.0, 0.5), (2.6, 0.3), (1.0, 1.0), (1.3, 0.9)]),
        ),
        (
            "echo_rv_strain".to_string(),
            row([(0.8, 1.1), (0.9, 1.1), (5.0, 0.5), (1.0, 1.0), (1.0, 1.0)]),
        ),
        (
            "xray_pneumothorax".to_string(),
            row([(0.5, 1.1), (0.7, 1.0), (0.8, 1.0), (15.0, 0.2), (0.8, 1.0)]),
        ),
        (
            "ct_esoph_leak".to_string(),
            row([(0.5, 1.1), (0.8, 1.0), (0.8, 1.0), (0.9, 1.0), (25.0, 0.1)]),
        ),
    ])
}
