//! Configuration schema definitions for deplink.
//!
//! This module contains the struct that maps to the optional
//! `.deplink.yml` file and the enums shared with the CLI.

use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;

/// Root structure of `.deplink.yml`.
///
/// Every field is optional; unset fields fall back to the preset defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeplinkConfig {
    /// Behavior preset (basic, guarded, auto-clone)
    pub preset: Option<Preset>,

    /// Substring that marks a specifier as an organization repository
    pub marker: Option<String>,

    /// Organization name used when parsing repository specifiers
    pub organization: Option<String>,

    /// Name of the installed dependency directory
    pub modules_dir: Option<String>,

    /// Manifest path, relative to the project root
    pub manifest: Option<PathBuf>,

    /// Minimum package manager version, digits only (510 = 5.1.0)
    pub min_version: Option<u32>,

    /// Command printing the package manager version
    pub version_command: Option<String>,

    /// Environment variable holding the run mode
    pub mode_var: Option<String>,

    /// Value of `mode_var` that enables linking
    pub mode_value: Option<String>,

    /// Skip unless `mode_var` equals `mode_value`
    pub require_mode: Option<bool>,

    /// How to detect running from inside a dependency directory
    pub location_check: Option<LocationCheck>,

    /// Offer to clone missing sibling repositories
    pub auto_clone: Option<bool>,

    /// Whether cloning asks first
    pub clone: Option<ClonePolicy>,
}

/// Behavior presets matching the ways the linker has been deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// No guards beyond the version check; missing siblings fail.
    Basic,
    /// Mode and parent-directory guards; missing siblings fail.
    Guarded,
    /// Mode and path guards; missing siblings are cloned.
    #[default]
    AutoClone,
}

impl Preset {
    /// Whether the mode variable must be set.
    pub fn requires_mode(&self) -> bool {
        !matches!(self, Self::Basic)
    }

    /// Location check used by this preset.
    pub fn location_check(&self) -> LocationCheck {
        match self {
            Self::Basic => LocationCheck::Off,
            Self::Guarded => LocationCheck::Parent,
            Self::AutoClone => LocationCheck::Substring,
        }
    }

    /// Whether missing siblings are cloned.
    pub fn auto_clone(&self) -> bool {
        matches!(self, Self::AutoClone)
    }
}

/// Detection of a working directory inside a dependency directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LocationCheck {
    /// Never skip.
    Off,
    /// Skip when the parent directory is named like the dependency directory.
    Parent,
    /// Skip when the working path contains the dependency directory name.
    Substring,
}

/// Consent policy for cloning a missing sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ClonePolicy {
    /// Prompt for every missing sibling.
    #[default]
    Ask,
    /// Clone without asking.
    Always,
    /// Never clone.
    Never,
}
