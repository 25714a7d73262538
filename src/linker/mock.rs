//! Recording test doubles for the linker ports.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use deplink::linker::mock::MockWorkspace;
//! use deplink::linker::PathLinker;
//!
//! let workspace = MockWorkspace::new();
//! workspace.add_path("/work/api");
//! assert!(workspace.exists(Path::new("/work/api")));
//! workspace.link(Path::new("/work/app/node_modules/api"), Path::new("/work/api")).unwrap();
//! assert_eq!(workspace.links().len(), 1);
//! ```

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{DeplinkError, Result};

use super::ports::{PathLinker, RepositoryCloner, VersionProbe};

/// Version probe returning a scripted answer.
#[derive(Debug, Clone)]
pub struct MockVersionProbe {
    output: Option<String>,
    calls: RefCell<usize>,
}

impl MockVersionProbe {
    /// Probe that reports `output`.
    pub fn returning(output: &str) -> Self {
        Self {
            output: Some(output.to_string()),
            calls: RefCell::new(0),
        }
    }

    /// Probe whose command fails.
    pub fn failing() -> Self {
        Self {
            output: None,
            calls: RefCell::new(0),
        }
    }

    /// Number of times the version was queried.
    pub fn calls(&self) -> usize {
        *self.calls.borrow()
    }
}

impl VersionProbe for MockVersionProbe {
    fn version(&self) -> Result<String> {
        *self.calls.borrow_mut() += 1;
        self.output.clone().ok_or(DeplinkError::CommandFailed {
            command: "npm -v".to_string(),
            code: Some(127),
        })
    }
}

/// In-memory workspace implementing both [`RepositoryCloner`] and
/// [`PathLinker`].
///
/// A successful clone adds the destination to the known paths, so a later
/// existence check or link sees it.
#[derive(Debug, Default)]
pub struct MockWorkspace {
    paths: RefCell<HashSet<PathBuf>>,
    linked: RefCell<HashSet<PathBuf>>,
    clones: RefCell<Vec<(String, PathBuf)>>,
    checkouts: RefCell<Vec<(PathBuf, String)>>,
    links: RefCell<Vec<(PathBuf, PathBuf)>>,
    failing_links: HashSet<PathBuf>,
    fail_clones: bool,
    fail_checkouts: bool,
}

impl MockWorkspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as existing.
    pub fn add_path(&self, path: impl Into<PathBuf>) {
        self.paths.borrow_mut().insert(path.into());
    }

    /// Mark an installed entry as already being a symlink.
    pub fn add_link(&self, installed: impl Into<PathBuf>) {
        self.linked.borrow_mut().insert(installed.into());
    }

    /// Make linking `installed` fail.
    pub fn fail_link(&mut self, installed: impl Into<PathBuf>) {
        self.failing_links.insert(installed.into());
    }

    /// Make every clone fail.
    pub fn fail_clones(&mut self) {
        self.fail_clones = true;
    }

    /// Make every checkout fail.
    pub fn fail_checkouts(&mut self) {
        self.fail_checkouts = true;
    }

    /// Recorded clones as (url, destination).
    pub fn clones(&self) -> Vec<(String, PathBuf)> {
        self.clones.borrow().clone()
    }

    /// Recorded checkouts as (repository, branch).
    pub fn checkouts(&self) -> Vec<(PathBuf, String)> {
        self.checkouts.borrow().clone()
    }

    /// Recorded link attempts as (installed, target), failed ones included.
    pub fn links(&self) -> Vec<(PathBuf, PathBuf)> {
        self.links.borrow().clone()
    }

    /// Whether any clone, checkout or link was attempted.
    pub fn is_untouched(&self) -> bool {
        self.clones.borrow().is_empty()
            && self.checkouts.borrow().is_empty()
            && self.links.borrow().is_empty()
    }
}

impl RepositoryCloner for MockWorkspace {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        self.clones
            .borrow_mut()
            .push((url.to_string(), dest.to_path_buf()));

        if self.fail_clones {
            return Err(DeplinkError::CloneFailed {
                url: url.to_string(),
                path: dest.to_path_buf(),
                message: "repository not found".to_string(),
            });
        }

        self.add_path(dest);
        Ok(())
    }

    fn checkout(&self, repo: &Path, branch: &str) -> Result<()> {
        self.checkouts
            .borrow_mut()
            .push((repo.to_path_buf(), branch.to_string()));

        if self.fail_checkouts {
            return Err(DeplinkError::CloneFailed {
                url: format!("branch {}", branch),
                path: repo.to_path_buf(),
                message: "pathspec did not match".to_string(),
            });
        }
        Ok(())
    }
}

impl PathLinker for MockWorkspace {
    fn exists(&self, path: &Path) -> bool {
        self.paths.borrow().contains(path)
    }

    fn is_linked(&self, installed: &Path) -> bool {
        self.linked.borrow().contains(installed)
    }

    fn link(&self, installed: &Path, target: &Path) -> Result<()> {
        self.links
            .borrow_mut()
            .push((installed.to_path_buf(), target.to_path_buf()));

        if self.failing_links.contains(installed) {
            return Err(DeplinkError::CommandFailed {
                command: format!("rm -r {}", installed.display()),
                code: Some(1),
            });
        }

        self.linked.borrow_mut().insert(installed.to_path_buf());
        Ok(())
    }
}
