//! Error types for the chest pain simulator.
//!
//! The engine itself never fails: unknown findings are skipped, missing
//! likelihood ratios are neutral and unreadable history degrades to an
//! empty list. Errors exist only at the edges (catalog loading and command
//! line input), and carry:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Remediation hints for humans

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for simulator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Catalog file errors (cases, likelihood ratios, schema).
    Config,
    /// Invalid user input (unknown case or action).
    Input,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for the simulator.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid case catalog: {0}")]
    InvalidCatalog(String),

    // Input errors (20-29)
    #[error("unknown case: {0}")]
    UnknownCase(String),

    #[error("unknown action '{action}' for case {case}")]
    UnknownAction { case: String, action: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Input errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidCatalog(_) => 11,
            Error::UnknownCase(_) => 20,
            Error::UnknownAction { .. } => 21,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidCatalog(_) => ErrorCategory::Config,
            Error::UnknownCase(_) | Error::UnknownAction { .. } => ErrorCategory::Input,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) | Error::InvalidCatalog(_) => {
                "Check the catalog file, or remove it to use the built-in cases"
            }
            Error::UnknownCase(_) => "Run 'cps cases' to list available cases",
            Error::UnknownAction { .. } => "Run 'cps actions --case <CASE>' to list action ids",
            Error::Io(_) => "Check that the file path exists and is writable",
            Error::Json(_) => "The file is not valid JSON for this schema",
        }
    }
}

/// Serializable error payload for machine-readable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: u32,
    pub category: ErrorCategory,
    pub message: String,
    pub remediation: String,
}

impl From<&Error> for ErrorPayload {
    fn from(err: &Error) -> Self {
        Self {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            remediation: err.remediation().to_string(),
        }
    }
}
