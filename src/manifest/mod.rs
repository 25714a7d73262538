//! Dependency manifest loading.
//!
//! Reads the `dependencies` and `devDependencies` maps of a `package.json`
//! and merges them into one ordered map. The manifest is never written.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{DeplinkError, Result};

/// Default manifest file name, relative to the project root.
pub const DEFAULT_MANIFEST: &str = "package.json";

/// The parts of a `package.json` that deplink reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    /// Runtime dependency specifiers.
    #[serde(default)]
    pub dependencies: Map<String, Value>,

    /// Development dependency specifiers.
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: Map<String, Value>,
}

/// A single merged manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Package name (the manifest key).
    pub name: String,
    /// Version or source specifier.
    pub specifier: String,
}

impl Manifest {
    /// Parse manifest content. `source_path` is only used for error reporting.
    pub fn parse(content: &str, source_path: &Path) -> Result<Self> {
        let manifest: Manifest =
            serde_json::from_str(content).map_err(|e| DeplinkError::ManifestParse {
                path: source_path.to_path_buf(),
                message: e.to_string(),
            })?;

        // Reject non-string specifiers up front so `merged` can't fail later.
        for (name, value) in manifest.dependencies.iter().chain(&manifest.dev_dependencies) {
            if !value.is_string() {
                return Err(DeplinkError::ManifestParse {
                    path: source_path.to_path_buf(),
                    message: format!("specifier for '{}' is not a string", name),
                });
            }
        }

        Ok(manifest)
    }

    /// Merge runtime and development specifiers.
    ///
    /// Development entries override runtime entries with the same name. An
    /// overridden entry keeps the position of the runtime entry; everything
    /// else stays in document order.
    pub fn merged(&self) -> Vec<Dependency> {
        let mut merged = self.dependencies.clone();
        for (name, value) in &self.dev_dependencies {
            merged.insert(name.clone(), value.clone());
        }

        merged
            .into_iter()
            .filter_map(|(name, value)| match value {
                Value::String(specifier) => Some(Dependency { name, specifier }),
                _ => None,
            })
            .collect()
    }
}

/// Load the manifest at `path`.
///
/// # Errors
///
/// Returns `ManifestNotFound` if the file doesn't exist.
/// Returns `ManifestParse` if the JSON is invalid.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DeplinkError::ManifestNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DeplinkError::Io(e)
        }
    })?;

    tracing::debug!("Loaded manifest from {}", path.display());
    Manifest::parse(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(content: &str) -> Result<Manifest> {
        Manifest::parse(content, Path::new("package.json"))
    }

    fn names(deps: &[Dependency]) -> Vec<&str> {
        deps.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn merges_runtime_and_dev() {
        let manifest = parse(
            r#"{
                "dependencies": { "express": "^4.0.0", "api": "git+ssh://git@github.com:Mindflash/api.git" },
                "devDependencies": { "mocha": "^10.0.0" }
            }"#,
        )
        .unwrap();

        let merged = manifest.merged();
        assert_eq!(names(&merged), vec!["express", "api", "mocha"]);
    }

    #[test]
    fn dev_entry_overrides_runtime_entry() {
        let manifest = parse(
            r#"{
                "dependencies": { "shared": "^1.0.0", "lodash": "^4.0.0" },
                "devDependencies": { "shared": "git+ssh://git@github.com:Mindflash/shared.git" }
            }"#,
        )
        .unwrap();

        let merged = manifest.merged();
        assert_eq!(names(&merged), vec!["shared", "lodash"]);
        assert_eq!(
            merged[0].specifier,
            "git+ssh://git@github.com:Mindflash/shared.git"
        );
    }

    #[test]
    fn missing_maps_are_empty() {
        let manifest = parse(r#"{ "name": "app" }"#).unwrap();
        assert!(manifest.merged().is_empty());
    }

    #[test]
    fn only_dev_dependencies() {
        let manifest = parse(r#"{ "devDependencies": { "jest": "^29.0.0" } }"#).unwrap();
        assert_eq!(names(&manifest.merged()), vec!["jest"]);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = parse("{ not json").unwrap_err();
        assert!(matches!(err, DeplinkError::ManifestParse { .. }));
    }

    #[test]
    fn non_string_specifier_is_parse_error() {
        let err = parse(r#"{ "dependencies": { "weird": 42 } }"#).unwrap_err();
        match err {
            DeplinkError::ManifestParse { message, .. } => assert!(message.contains("weird")),
            other => panic!("Expected ManifestParse, got {other:?}"),
        }
    }

    #[test]
    fn load_manifest_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_manifest(&temp.path().join("package.json")).unwrap_err();
        assert!(matches!(err, DeplinkError::ManifestNotFound { .. }));
    }

    #[test]
    fn load_manifest_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");
        fs::write(&path, r#"{ "dependencies": { "a": "1.0.0" } }"#).unwrap();

        let manifest = load_manifest(&path).unwrap();
        assert_eq!(names(&manifest.merged()), vec!["a"]);
    }
}
