//! Resolved linker settings.
//!
//! Settings are layered: preset defaults, then `.deplink.yml`, then CLI
//! overrides (later wins).

use std::path::PathBuf;

use crate::config::schema::{ClonePolicy, DeplinkConfig, LocationCheck, Preset};
use crate::error::{DeplinkError, Result};

/// Default organization marker looked up in specifiers.
pub const DEFAULT_MARKER: &str = "github.com:Mindflash";
/// Default organization name for specifier parsing.
pub const DEFAULT_ORGANIZATION: &str = "Mindflash";
/// Default installed dependency directory.
pub const DEFAULT_MODULES_DIR: &str = "node_modules";
/// npm@5.1.0 is the first release that keeps symlinked dependencies intact.
pub const DEFAULT_MIN_VERSION: u32 = 510;
/// Default package manager version query.
pub const DEFAULT_VERSION_COMMAND: &str = "npm -v";
/// Default mode variable.
pub const DEFAULT_MODE_VAR: &str = "NODE_ENV";
/// Default mode value that enables linking.
pub const DEFAULT_MODE_VALUE: &str = "dev";

/// Mode variable requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeGuard {
    /// Variable name.
    pub var: String,
    /// Exact value required.
    pub value: String,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSettings {
    pub preset: Preset,
    pub marker: String,
    pub organization: String,
    pub modules_dir: String,
    pub manifest: PathBuf,
    pub min_version: u32,
    pub version_command: String,
    pub mode_guard: Option<ModeGuard>,
    pub location_check: LocationCheck,
    pub auto_clone: bool,
    pub clone_policy: ClonePolicy,
}

/// Values from the command line that override the config file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub preset: Option<Preset>,
    pub clone_policy: Option<ClonePolicy>,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self::for_preset(Preset::default())
    }
}

impl LinkSettings {
    /// Defaults for a preset.
    pub fn for_preset(preset: Preset) -> Self {
        let mode_guard = preset.requires_mode().then(|| ModeGuard {
            var: DEFAULT_MODE_VAR.to_string(),
            value: DEFAULT_MODE_VALUE.to_string(),
        });

        Self {
            preset,
            marker: DEFAULT_MARKER.to_string(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            modules_dir: DEFAULT_MODULES_DIR.to_string(),
            manifest: PathBuf::from(crate::manifest::DEFAULT_MANIFEST),
            min_version: DEFAULT_MIN_VERSION,
            version_command: DEFAULT_VERSION_COMMAND.to_string(),
            mode_guard,
            location_check: preset.location_check(),
            auto_clone: preset.auto_clone(),
            clone_policy: ClonePolicy::default(),
        }
    }

    /// Resolve settings from a config file and CLI overrides.
    pub fn resolve(config: &DeplinkConfig, overrides: &SettingsOverrides) -> Result<Self> {
        let preset = overrides
            .preset
            .or(config.preset)
            .unwrap_or_default();
        let mut settings = Self::for_preset(preset);

        if let Some(marker) = &config.marker {
            settings.marker = marker.clone();
        }
        if let Some(organization) = &config.organization {
            settings.organization = organization.clone();
        }
        if let Some(modules_dir) = &config.modules_dir {
            settings.modules_dir = modules_dir.clone();
        }
        if let Some(manifest) = &config.manifest {
            settings.manifest = manifest.clone();
        }
        if let Some(min_version) = config.min_version {
            settings.min_version = min_version;
        }
        if let Some(command) = &config.version_command {
            settings.version_command = command.clone();
        }
        if let Some(check) = config.location_check {
            settings.location_check = check;
        }
        if let Some(auto_clone) = config.auto_clone {
            settings.auto_clone = auto_clone;
        }

        let require_mode = config.require_mode.unwrap_or(preset.requires_mode());
        settings.mode_guard = require_mode.then(|| ModeGuard {
            var: config
                .mode_var
                .clone()
                .unwrap_or_else(|| DEFAULT_MODE_VAR.to_string()),
            value: config
                .mode_value
                .clone()
                .unwrap_or_else(|| DEFAULT_MODE_VALUE.to_string()),
        });

        settings.clone_policy = overrides
            .clone_policy
            .or(config.clone)
            .unwrap_or_default();

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.marker.is_empty() {
            return Err(DeplinkError::ConfigValidationError {
                message: "marker must not be empty".to_string(),
            });
        }
        if self.modules_dir.is_empty() || self.modules_dir.contains('/') {
            return Err(DeplinkError::ConfigValidationError {
                message: format!(
                    "modules_dir must be a single directory name, got '{}'",
                    self.modules_dir
                ),
            });
        }
        if self.version_command.trim().is_empty() {
            return Err(DeplinkError::ConfigValidationError {
                message: "version_command must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
