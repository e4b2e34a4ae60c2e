//! Configuration file discovery and loading.

use crate::config::schema::DaktariConfig;
use crate::error::{DaktariError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = ".daktari.yml";

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. A `.daktari.yml` file (primary indicator)
/// 2. A `.git` directory (fallback)
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_FILE).is_file() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<DaktariConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DaktariError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DaktariError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a config.
///
/// `source_path` is only used for error reporting.
pub fn parse_config(content: &str, source_path: &Path) -> Result<DaktariConfig> {
    serde_yaml::from_str(content).map_err(|e| DaktariError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// Without an override, loads `.daktari.yml` from `project_root`.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<DaktariConfig> {
    let path = match config_override {
        Some(path) => path.to_path_buf(),
        None => project_root.join(CONFIG_FILE),
    };
    tracing::debug!("Loading config from {}", path.display());
    load_config_file(&path)
}
