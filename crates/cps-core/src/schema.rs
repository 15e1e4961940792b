//! JSON Schema generation for persisted and exchanged types.
//!
//! ```bash
//! cps schema                 # HistoryRecord
//! cps schema --type Observation
//! cps schema --list
//! ```

use crate::history::HistoryRecord;
use cps_common::{AcuityLevel, Diagnosis, DiagnosisScores, Observation, Sign};
use schemars::schema_for;
use serde_json::Value;
use std::collections::BTreeMap;

/// Type whose schema `cps schema` prints by default.
pub const DEFAULT_SCHEMA: &str = "HistoryRecord";

/// Available schema types with their descriptions.
pub fn available_schemas() -> Vec<(&'static str, &'static str)> {
    vec![
        ("HistoryRecord", "Summary of one completed session in the history store"),
        ("Diagnosis", "One of the five lethal chest pain diagnoses"),
        ("DiagnosisScores", "Per-diagnosis probability vector"),
        ("Observation", "A logged finding with its sign"),
        ("Sign", "Finding direction (+1 present, -1 absent)"),
        ("AcuityLevel", "JTAS triage level 1-5"),
    ]
}

/// Generate JSON Schema for a type by name.
pub fn generate_schema(type_name: &str) -> Option<Value> {
    let schema = match type_name {
        "HistoryRecord" => schema_for!(HistoryRecord),
        "Diagnosis" => schema_for!(Diagnosis),
        "DiagnosisScores" => schema_for!(DiagnosisScores),
        "Observation" => schema_for!(Observation),
        "Sign" => schema_for!(Sign),
        "AcuityLevel" => schema_for!(AcuityLevel),
        _ => return None,
    };
    Some(schema.to_value())
}

pub fn generate_all_schemas() -> BTreeMap<String, Value> {
    available_schemas()
        .into_iter()
        .filter_map(|(name, _)| generate_schema(name).map(|s| (name.to_string(), s)))
        .collect()
}
