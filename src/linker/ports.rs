//! Capability traits for the external tools the linker drives.
//!
//! Live implementations live in [`system`](super::system); recording test
//! doubles live in [`mock`](super::mock).

use std::path::Path;

use crate::error::Result;

/// Reports the installed package manager version.
pub trait VersionProbe {
    /// Raw version output, e.g. `"5.1.0\n"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the version command can't be run or exits non-zero.
    fn version(&self) -> Result<String>;
}

/// Acquires sibling repositories.
pub trait RepositoryCloner {
    /// Clone `url` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the clone fails. Partial clones are left in place.
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()>;

    /// Check out `branch` inside the repository at `repo`.
    ///
    /// # Errors
    ///
    /// Returns an error if the checkout fails.
    fn checkout(&self, repo: &Path, branch: &str) -> Result<()>;
}

/// Inspects and rewires paths under the dependency directory.
pub trait PathLinker {
    /// Whether `path` can be accessed.
    fn exists(&self, path: &Path) -> bool;

    /// Whether the installed entry is already a symbolic link.
    fn is_linked(&self, installed: &Path) -> bool;

    /// Replace `installed` with a symbolic link pointing at `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal or link creation fails.
    fn link(&self, installed: &Path, target: &Path) -> Result<()>;
}
