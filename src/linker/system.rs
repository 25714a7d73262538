//! Live port implementations backed by `npm`, `git` and the shell.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;

use crate::error::{DeplinkError, Result};
use crate::shell::{execute_quiet, quote_path};

use super::ports::{PathLinker, RepositoryCloner, VersionProbe};

/// Runs a version command (`npm -v` by default) in the project directory.
pub struct CommandVersionProbe {
    command: String,
    cwd: PathBuf,
    env: HashMap<String, String>,
}

impl CommandVersionProbe {
    /// Create a probe for `command`, run from `cwd`.
    pub fn new(command: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            cwd: cwd.into(),
            env: HashMap::new(),
        }
    }

    /// Environment variables set for the version command.
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }
}

impl VersionProbe for CommandVersionProbe {
    fn version(&self) -> Result<String> {
        let result = execute_quiet(&self.command, Some(&self.cwd), &self.env)?;
        if !result.success {
            return Err(DeplinkError::CommandFailed {
                command: self.command.clone(),
                code: result.exit_code,
            });
        }
        Ok(result.stdout)
    }
}

/// Clones sibling repositories with the `git` CLI.
pub struct GitCloner;

impl GitCloner {
    fn run_git(&self, args: &[&str], cwd: Option<&Path>) -> Result<std::process::Output> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        tracing::debug!("Running git {}", args.join(" "));
        let output = cmd
            .output()
            .with_context(|| format!("failed to run git {}", args.join(" ")))?;
        Ok(output)
    }
}

impl RepositoryCloner for GitCloner {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        let dest_str = dest.to_string_lossy();
        let output = self.run_git(&["clone", url, dest_str.as_ref()], dest.parent())?;

        if !output.status.success() {
            return Err(DeplinkError::CloneFailed {
                url: url.to_string(),
                path: dest.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    fn checkout(&self, repo: &Path, branch: &str) -> Result<()> {
        let output = self.run_git(&["checkout", branch], Some(repo))?;

        if !output.status.success() {
            return Err(DeplinkError::CloneFailed {
                url: format!("branch {}", branch),
                path: repo.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Replaces installed dependencies with symlinks through one shell command.
#[derive(Debug, Default)]
pub struct ShellLinker {
    env: HashMap<String, String>,
}

impl ShellLinker {
    /// Create a linker whose shell sees `env`.
    pub fn with_env(env: HashMap<String, String>) -> Self {
        Self { env }
    }

    /// The combined remove-and-link command.
    pub fn link_command(installed: &Path, target: &Path) -> String {
        format!(
            "rm -r {installed} && ln -s {target} {installed}",
            installed = quote_path(installed),
            target = quote_path(target)
        )
    }
}

impl PathLinker for ShellLinker {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_linked(&self, installed: &Path) -> bool {
        fs::symlink_metadata(installed)
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn link(&self, installed: &Path, target: &Path) -> Result<()> {
        let command = Self::link_command(installed, target);
        let result = execute_quiet(&command, None, &self.env)?;

        if !result.success {
            tracing::debug!("link stderr: {}", result.stderr.trim());
            return Err(DeplinkError::CommandFailed {
                command,
                code: result.exit_code,
            });
        }
        Ok(())
    }
}
