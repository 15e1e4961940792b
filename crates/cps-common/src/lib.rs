//! Chest pain simulator common types, IDs, and errors.
//!
//! This crate provides foundational types shared across the workspace:
//! - The fixed diagnosis domain and per-diagnosis score vectors
//! - Triage acuity levels
//! - Binary evidence observations
//! - Session identifiers
//! - The unified error type and output formats

pub mod acuity;
pub mod diagnosis;
pub mod error;
pub mod evidence;
pub mod id;
pub mod output;

pub use acuity::AcuityLevel;
pub use diagnosis::{Diagnosis, DiagnosisScores};
pub use error::{Error, ErrorCategory, ErrorPayload, Result};
pub use evidence::{Observation, Sign};
pub use id::SessionId;
pub use output::OutputFormat;
