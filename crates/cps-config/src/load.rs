//! Catalog loading with provenance.

use crate::catalog::Catalog;
use crate::defaults::default_catalog;
use crate::resolve::{resolve_catalog_path, ConfigSource};
use crate::validate::{validate_catalog, ValidationError};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during catalog loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid JSON in catalog file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Semantic validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ConfigError> for cps_common::Error {
    fn from(err: ConfigError) -> Self {
        let message = err.to_string();
        match err {
            ConfigError::ValidationError(_) | ConfigError::ParseError { .. } => {
                cps_common::Error::InvalidCatalog(message)
            }
            ConfigError::IoError { .. } => cps_common::Error::Config(message),
        }
    }
}

/// Catalog resolution options.
#[derive(Debug, Default, Clone)]
pub struct CatalogOptions {
    /// Explicit catalog file path (highest priority).
    pub catalog_path: Option<PathBuf>,
}

/// Loaded catalog with provenance information.
#[derive(Debug, Clone)]
pub struct ResolvedCatalog {
    pub catalog: Catalog,
    /// Path to the catalog file (None if using the built-in catalog).
    pub path: Option<PathBuf>,
    /// SHA-256 hash of the file content (None if using the built-in catalog).
    pub hash: Option<String>,
    pub source: ConfigSource,
}

/// Load the catalog with the standard resolution order, then validate it.
pub fn load_catalog(options: &CatalogOptions) -> Result<ResolvedCatalog, ConfigError> {
    let (path, source) = resolve_catalog_path(options.catalog_path.as_deref());
    match path {
        Some(path) => {
            let (catalog, hash) = read_catalog_file(&path)?;
            Ok(ResolvedCatalog {
                catalog,
                path: Some(path),
                hash: Some(hash),
                source,
            })
        }
        None => Ok(ResolvedCatalog {
            catalog: default_catalog(),
            path: None,
            hash: None,
            source,
        }),
    }
}

/// Read, parse and validate a catalog file. Returns the catalog and the
/// hex SHA-256 of its content.
pub fn read_catalog_file(path: &Path) -> Result<(Catalog, String), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog: Catalog =
        serde_json::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
    validate_catalog(&catalog)?;
    Ok((catalog, sha256_hex(content.as_bytes())))
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
