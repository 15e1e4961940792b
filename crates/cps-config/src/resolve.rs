//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI arguments → environment variables → XDG paths → defaults.

use std::path::{Path, PathBuf};

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_CATALOG_PATH: &str = "CPS_CATALOG";
pub const ENV_CONFIG_DIR: &str = "CPS_CONFIG_DIR";
pub const ENV_HISTORY_PATH: &str = "CPS_HISTORY";

/// Standard catalog file name.
pub const CATALOG_FILENAME: &str = "catalog.json";

/// Fixed storage key for the history blob; also its file name.
pub const HISTORY_KEY: &str = "chestpain_sim_history_v1";

/// Application name for XDG directories.
const APP_NAME: &str = "chest-pain-sim";

/// Resolve the catalog path using the process environment.
///
/// Resolution order:
/// 1. Explicit CLI path (if it exists)
/// 2. `CPS_CATALOG`
/// 3. `CPS_CONFIG_DIR` + `catalog.json`
/// 4. XDG config directory (~/.config/chest-pain-sim/catalog.json)
/// 5. Built-in catalog (None)
pub fn resolve_catalog_path(cli_path: Option<&Path>) -> (Option<PathBuf>, ConfigSource) {
    resolve_catalog_path_with(
        cli_path,
        |name| std::env::var(name).ok(),
        xdg_config_dir(),
    )
}

/// Resolution with injectable environment lookup and XDG directory.
pub fn resolve_catalog_path_with(
    cli_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
    xdg_dir: Option<PathBuf>,
) -> (Option<PathBuf>, ConfigSource) {
    if let Some(path) = cli_path {
        if path.exists() {
            return (Some(path.to_path_buf()), ConfigSource::CliArgument);
        }
    }

    if let Some(env_path) = env(ENV_CATALOG_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return (Some(path), ConfigSource::Environment);
        }
    }

    if let Some(config_dir) = env(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(CATALOG_FILENAME);
        if path.exists() {
            return (Some(path), ConfigSource::Environment);
        }
    }

    if let Some(dir) = xdg_dir {
        let path = dir.join(CATALOG_FILENAME);
        if path.exists() {
            return (Some(path), ConfigSource::XdgConfig);
        }
    }

    (None, ConfigSource::BuiltinDefault)
}

/// Resolve where the history blob lives.
///
/// Resolution order: CLI path → `CPS_HISTORY` → XDG data directory →
/// current directory. The file does not need to exist yet.
pub fn resolve_history_path(cli_path: Option<&Path>) -> PathBuf {
    resolve_history_path_with(cli_path, |name| std::env::var(name).ok(), xdg_data_dir())
}

/// History resolution with injectable environment lookup and data directory.
pub fn resolve_history_path_with(
    cli_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
    data_dir: Option<PathBuf>,
) -> PathBuf {
    let file_name = format!("{}.json", HISTORY_KEY);
    if let Some(path) = cli_path {
        return path.to_path_buf();
    }
    if let Some(env_path) = env(ENV_HISTORY_PATH) {
        if !env_path.trim().is_empty() {
            return PathBuf::from(env_path);
        }
    }
    match data_dir {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Get the XDG config directory for the simulator.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the XDG data directory for the simulator.
pub fn xdg_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(APP_NAME))
}
