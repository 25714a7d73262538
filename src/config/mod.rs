//! Configuration loading and resolution for deplink.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layered resolution into [`LinkSettings`] in [`settings`]
//!
//! # Example
//!
//! ```
//! use deplink::config::{load_config, LinkSettings, Preset, SettingsOverrides};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".deplink.yml"), "preset: guarded").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! let settings = LinkSettings::resolve(&config, &SettingsOverrides::default()).unwrap();
//! assert_eq!(settings.preset, Preset::Guarded);
//! ```
//!
//! # Configuration Layers
//!
//! 1. Preset defaults (`auto-clone` unless chosen otherwise)
//! 2. Project config (`.deplink.yml`)
//! 3. Command-line flags

pub mod loader;
pub mod schema;
pub mod settings;

pub use loader::{find_project_config, load_config, load_config_file, parse_config, CONFIG_FILE};
pub use schema::{ClonePolicy, DeplinkConfig, LocationCheck, Preset};
pub use settings::{LinkSettings, ModeGuard, SettingsOverrides};
