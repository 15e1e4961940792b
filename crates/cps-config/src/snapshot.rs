//! Catalog snapshots for session provenance.
//!
//! A snapshot records which catalog a session was scored against, so a
//! history entry can be traced back to the ratios that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::load::{sha256_hex, ResolvedCatalog};

/// A frozen summary of the active catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// When this snapshot was taken.
    pub timestamp: DateTime<Utc>,

    pub schema_version: String,

    /// Path where the catalog was loaded from.
    #[serde(default)]
    pub path: Option<String>,

    /// Source of the catalog (CLI, env, XDG, builtin).
    pub source: String,

    /// SHA-256 of the catalog content. For the built-in catalog this is the
    /// hash of its canonical JSON form.
    pub hash: String,

    pub case_count: usize,
    pub finding_count: usize,
}

impl CatalogSnapshot {
    pub fn from_resolved(resolved: &ResolvedCatalog) -> Self {
        let hash = resolved.hash.clone().unwrap_or_else(|| {
            let canonical = serde_json::to_string(&resolved.catalog).unwrap_or_default();
            sha256_hex(canonical.as_bytes())
        });
        Self {
            timestamp: Utc::now(),
            schema_version: resolved.catalog.schema_version.clone(),
            path: resolved.path.as_ref().map(|p| p.display().to_string()),
            source: resolved.source.to_string(),
            hash,
            case_count: resolved.catalog.cases.len(),
            finding_count: resolved.catalog.likelihood_ratios.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_catalog;
    use crate::resolve::ConfigSource;

    #[test]
    fn builtin_snapshot_hashes_canonical_json() {
        let resolved = ResolvedCatalog {
            catalog: default_catalog(),
            path: None,
            hash: None,
            source: ConfigSource::BuiltinDefault,
        };
        let a = CatalogSnapshot::from_resolved(&resolved);
        let b = CatalogSnapshot::from_resolved(&resolved);
        assert_eq!(a.hash, b.hash);
        assert_eq!(a.hash.len(), 64);
        assert_eq!(a.case_count, 5);
        assert_eq!(a.finding_count, 6);
        assert_eq!(a.source, "builtin default");
        assert!(a.path.is_none());
    }
}
