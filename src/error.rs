//! Error types for deplink operations.
//!
//! This module defines [`DeplinkError`], the error type for every fatal
//! condition of a run, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Per-dependency problems (missing sibling, declined clone, failed link)
//!   are not errors; they are reported as entry outcomes and the run continues
//! - `DeplinkError` is reserved for conditions that abort the whole run
//! - Use `anyhow::Error` (via `DeplinkError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for deplink operations.
#[derive(Debug, Error)]
pub enum DeplinkError {
    /// The dependency manifest does not exist.
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// The dependency manifest is not a valid document.
    #[error("Failed to parse manifest at {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// Failed to parse the `.deplink.yml` configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The package manager version could not be read as a number.
    #[error("Could not detect package manager version from {output:?}")]
    VersionUndetectable { output: String },

    /// Cloning or checking out a sibling repository failed.
    #[error("Failed to clone {url} into {path}: {message}")]
    CloneFailed {
        url: String,
        path: PathBuf,
        message: String,
    },

    /// Shell command could not be run or failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for deplink operations.
pub type Result<T> = std::result::Result<T, DeplinkError>;
