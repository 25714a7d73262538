//! Configuration file discovery and loading.

use crate::config::schema::DeplinkConfig;
use crate::error::{DeplinkError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file name looked up in the project root.
pub const CONFIG_FILE: &str = ".deplink.yml";

/// Find the project config at `<project_root>/.deplink.yml`.
pub fn find_project_config(project_root: &Path) -> Option<PathBuf> {
    let path = project_root.join(CONFIG_FILE);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `Io` if the file can't be read.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<DeplinkConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into a [`DeplinkConfig`].
///
/// An empty document is an empty config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<DeplinkConfig> {
    if content.trim().is_empty() {
        return Ok(DeplinkConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| DeplinkError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit override must exist. Without one, a missing
/// `.deplink.yml` yields the default config.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<DeplinkConfig> {
    if let Some(override_path) = config_override {
        return load_config_file(override_path);
    }

    match find_project_config(project_root) {
        Some(path) => {
            tracing::debug!("Using config {}", path.display());
            load_config_file(&path)
        }
        None => Ok(DeplinkConfig::default()),
    }
}
