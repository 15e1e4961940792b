//! Chest pain simulator configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for the case catalog and likelihood-ratio table
//! - The built-in catalog used when no file is configured
//! - Path resolution (CLI → env → XDG → defaults)
//! - Semantic validation
//! - Catalog snapshots for session provenance

pub mod catalog;
pub mod defaults;
pub mod load;
pub mod resolve;
pub mod snapshot;
pub mod validate;

pub use catalog::{CaseDefinition, Catalog, DefinitiveDiagnosis, LikelihoodRatio, LikelihoodRow};
pub use defaults::builtin_catalog;
pub use load::{load_catalog, CatalogOptions, ConfigError, ResolvedCatalog};
pub use resolve::{resolve_catalog_path, resolve_history_path, ConfigSource};
pub use snapshot::CatalogSnapshot;
pub use validate::{validate_catalog, ValidationError, ValidationResult};

/// Schema version for catalog files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
