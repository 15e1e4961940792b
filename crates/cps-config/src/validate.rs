//! Catalog validation errors and semantic validation.

use crate::catalog::{Catalog, LikelihoodRatio};
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Essential-action identifiers understood by the scripted action menu.
pub const KNOWN_ESSENTIALS: &[&str] = &[
    "oxygen",
    "monitor",
    "line",
    "line_pressure",
    "bloods",
    "bloods_ddimer",
    "bloods_abg",
    "ecg",
    "echo",
    "echo_rv",
    "xray",
    "ct_esoph",
    "needle_decompression",
];

/// Catalog validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::SemanticError(_) => 63,
            ValidationError::MissingField(_) => 64,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

/// Validate a catalog semantically.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult<()> {
    if catalog.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: catalog.schema_version.clone(),
        });
    }

    if catalog.cases.is_empty() {
        return Err(ValidationError::SemanticError(
            "catalog must define at least one case".to_string(),
        ));
    }

    for (dx, case) in &catalog.cases {
        if case.name.trim().is_empty() {
            return Err(ValidationError::MissingField(format!("cases.{}.name", dx)));
        }
        if case.definitive.tag.trim().is_empty() {
            return Err(ValidationError::MissingField(format!(
                "cases.{}.definitive.tag",
                dx
            )));
        }
        for essential in &case.essentials {
            if !KNOWN_ESSENTIALS.contains(&essential.as_str()) {
                return Err(ValidationError::InvalidValue {
                    field: format!("cases.{}.essentials", dx),
                    message: format!("unknown essential action '{}'", essential),
                });
            }
        }
    }

    for (finding, row) in &catalog.likelihood_ratios {
        if finding.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "likelihood_ratios".to_string(),
                message: "finding key must not be empty".to_string(),
            });
        }
        for (dx, ratio) in row {
            validate_ratio(&format!("likelihood_ratios.{}.{}", finding, dx), ratio)?;
        }
    }

    Ok(())
}

/// Likelihood ratios must be finite and strictly positive.
fn validate_ratio(field: &str, ratio: &LikelihoodRatio) -> ValidationResult<()> {
    for (name, value) in [("positive", ratio.positive), ("negative", ratio.negative)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: format!("{}.{}", field, name),
                message: format!("Must be finite and > 0, got {}", value),
            });
        }
    }
    Ok(())
}
