//! Chest Pain Simulator Core Library
//!
//! This library provides the core functionality for the training simulator:
//! - Bayesian evidence combination over the five candidate diagnoses
//! - Deterioration risk, phase and acuity estimation
//! - Feedback detection and rubric scoring
//! - The session state container and scripted action menu
//! - Local history persistence
//! - Logging and exit codes for the `cps` binary
//!
//! The binary entry point is in `main.rs`.

pub mod actions;
pub mod engine;
pub mod exit_codes;
pub mod history;
pub mod logging;
pub mod output;
pub mod schema;
pub mod session;

pub use engine::{combine, effective_acuity, estimate_risk, evaluate, score};
pub use history::{FileHistoryStore, HistoryRecord, HistoryStore, MemoryHistoryStore};
pub use session::{LogEntry, Session, SessionSnapshot};
