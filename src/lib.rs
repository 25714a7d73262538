//! deplink - Link organization dependencies to sibling checkouts.
//!
//! deplink reads a project's `package.json`, picks the dependencies whose
//! specifier points at the organization's repositories, and replaces their
//! installed copies under `node_modules` with symlinks to checkouts living
//! next to the project.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and layered settings
//! - [`error`] - Error types and result aliases
//! - [`linker`] - Guards, candidate selection and the linking loop
//! - [`manifest`] - Dependency manifest loading and merging
//! - [`shell`] - Shell command execution
//! - [`specifier`] - Repository specifier parsing
//! - [`ui`] - Prompts and terminal output
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use deplink::manifest::Manifest;
//!
//! let manifest = Manifest::parse(
//!     r#"{"dependencies": {"api": "1.0.0"}, "devDependencies": {"api": "2.0.0"}}"#,
//!     Path::new("package.json"),
//! )
//! .unwrap();
//! assert_eq!(manifest.merged()[0].specifier, "2.0.0");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod linker;
pub mod manifest;
pub mod shell;
pub mod specifier;
pub mod ui;

pub use error::{DeplinkError, Result};
