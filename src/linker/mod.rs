//! Dependency linking.
//!
//! The [`Linker`] walks the merged manifest, picks the entries whose
//! specifier carries the organization marker, makes sure a sibling checkout
//! exists next to the project, and replaces the installed copy with a
//! symlink to it.
//!
//! Process state never leaks in: the working directory and environment come
//! in through [`LinkContext`], the manifest through a loader closure, and
//! every external tool through the traits in [`ports`].
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use std::path::Path;
//! use deplink::config::{LinkSettings, Preset};
//! use deplink::linker::mock::{MockVersionProbe, MockWorkspace};
//! use deplink::linker::{LinkContext, Linker};
//! use deplink::manifest::Manifest;
//! use deplink::ui::MockUI;
//!
//! let settings = LinkSettings::for_preset(Preset::Basic);
//! let probe = MockVersionProbe::returning("5.1.0");
//! let workspace = MockWorkspace::new();
//! workspace.add_path("/work/api");
//!
//! let linker = Linker::new(&settings, &probe, &workspace, &workspace).unwrap();
//! let ctx = LinkContext::new("/work/app", HashMap::new());
//! let manifest = Manifest::parse(
//!     r#"{"dependencies": {"api": "git+ssh://git@github.com:Mindflash/api.git"}}"#,
//!     Path::new("package.json"),
//! )
//! .unwrap();
//!
//! let mut ui = MockUI::new();
//! let outcome = linker.run(&ctx, &mut ui, || Ok(manifest)).unwrap();
//! assert_eq!(outcome.exit_code(), 0);
//! ```

pub mod banner;
pub mod guards;
pub mod mock;
pub mod ports;
pub mod system;

pub use banner::banner;
pub use guards::{check_location, check_mode, check_version, parse_version_number, SkipReason};
pub use ports::{PathLinker, RepositoryCloner, VersionProbe};
pub use system::{CommandVersionProbe, GitCloner, ShellLinker};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::{ClonePolicy, LinkSettings};
use crate::error::Result;
use crate::manifest::Manifest;
use crate::specifier::{RepoSpec, SpecifierParser};
use crate::ui::{Prompt, UserInterface};

/// Working directory and environment of a run.
#[derive(Debug, Clone)]
pub struct LinkContext {
    pub cwd: PathBuf,
    pub env: HashMap<String, String>,
}

impl LinkContext {
    pub fn new(cwd: impl Into<PathBuf>, env: HashMap<String, String>) -> Self {
        Self {
            cwd: cwd.into(),
            env,
        }
    }

    /// Capture the current process environment for `cwd`.
    pub fn from_process(cwd: impl Into<PathBuf>) -> Self {
        Self::new(cwd, std::env::vars().collect())
    }

    /// Directory next to the project where sibling `name` is checked out.
    pub fn sibling_dir(&self, name: &str) -> PathBuf {
        self.cwd.parent().unwrap_or(&self.cwd).join(name)
    }

    /// Installed location of `name` under the dependency directory.
    pub fn installed_dir(&self, modules_dir: &str, name: &str) -> PathBuf {
        self.cwd.join(modules_dir).join(name)
    }
}

/// Where a candidate's sibling name comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiblingSource {
    /// The package name.
    Package,
    /// The parsed repository specifier.
    Repo(RepoSpec),
    /// The specifier could not be parsed.
    Unparseable,
}

/// A manifest entry whose specifier carries the organization marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub package: String,
    pub specifier: String,
    pub source: SiblingSource,
}

impl Candidate {
    /// Directory name of the sibling checkout, if it can be determined.
    pub fn sibling_name(&self) -> Option<&str> {
        match &self.source {
            SiblingSource::Package => Some(&self.package),
            SiblingSource::Repo(spec) => Some(&spec.name),
            SiblingSource::Unparseable => None,
        }
    }
}

/// What happened to one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Linked,
    Missing,
    Declined,
    Unparseable,
    LinkFailed,
}

/// Per-candidate result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOutcome {
    pub package: String,
    pub sibling: Option<PathBuf>,
    pub status: EntryStatus,
}

/// Aggregate result of the linking loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub entries: Vec<EntryOutcome>,
}

impl LinkReport {
    /// Number of candidates seen.
    pub fn candidates(&self) -> usize {
        self.entries.len()
    }

    /// Number of candidates linked.
    pub fn linked(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == EntryStatus::Linked)
            .count()
    }

    /// Whether every candidate was linked.
    pub fn is_complete(&self) -> bool {
        self.linked() == self.candidates()
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Skipped(SkipReason),
    Completed(LinkReport),
}

impl LinkOutcome {
    /// Process exit code: 0 for skips and complete runs, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Skipped(_) => 0,
            Self::Completed(report) if report.is_complete() => 0,
            Self::Completed(_) => 1,
        }
    }
}

/// Read-only view of a candidate, used by `deplink list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateState {
    /// The installed entry is already a symlink.
    Linked,
    /// The sibling exists and can be linked.
    Ready,
    /// The sibling checkout is absent.
    Missing,
    /// The specifier could not be parsed.
    Unparseable,
}

impl CandidateState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Linked => "linked",
            Self::Ready => "ready",
            Self::Missing => "missing",
            Self::Unparseable => "unparseable",
        }
    }
}

/// Links marker-bearing dependencies to sibling checkouts.
pub struct Linker<'a> {
    settings: &'a LinkSettings,
    probe: &'a dyn VersionProbe,
    cloner: &'a dyn RepositoryCloner,
    paths: &'a dyn PathLinker,
    parser: SpecifierParser,
}

impl<'a> Linker<'a> {
    /// Create a linker.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured organization can't form a
    /// specifier pattern.
    pub fn new(
        settings: &'a LinkSettings,
        probe: &'a dyn VersionProbe,
        cloner: &'a dyn RepositoryCloner,
        paths: &'a dyn PathLinker,
    ) -> Result<Self> {
        Ok(Self {
            settings,
            probe,
            cloner,
            paths,
            parser: SpecifierParser::new(&settings.organization)?,
        })
    }

    pub fn settings(&self) -> &LinkSettings {
        self.settings
    }

    /// Mode and location guards. These never run a subprocess.
    pub fn check_environment(&self, ctx: &LinkContext) -> Option<SkipReason> {
        check_mode(self.settings.mode_guard.as_ref(), &ctx.env).or_else(|| {
            check_location(
                self.settings.location_check,
                &self.settings.modules_dir,
                &ctx.cwd,
            )
        })
    }

    /// All guards in order: mode, location, version.
    ///
    /// # Errors
    ///
    /// Returns an error if the package manager version can't be read.
    pub fn check_guards(&self, ctx: &LinkContext) -> Result<Option<SkipReason>> {
        if let Some(reason) = self.check_environment(ctx) {
            return Ok(Some(reason));
        }
        check_version(self.probe, self.settings.min_version)
    }

    /// Marker-bearing entries of the merged manifest, in manifest order.
    pub fn candidates(&self, manifest: &Manifest) -> Vec<Candidate> {
        manifest
            .merged()
            .into_iter()
            .filter(|dep| dep.specifier.contains(&self.settings.marker))
            .map(|dep| {
                let source = if self.settings.auto_clone {
                    match self.parser.parse(&dep.specifier) {
                        Ok(spec) => SiblingSource::Repo(spec),
                        Err(e) => {
                            tracing::debug!("{}", e);
                            SiblingSource::Unparseable
                        }
                    }
                } else {
                    SiblingSource::Package
                };

                Candidate {
                    package: dep.name,
                    specifier: dep.specifier,
                    source,
                }
            })
            .collect()
    }

    /// Current state of a candidate without changing anything.
    pub fn inspect(&self, ctx: &LinkContext, candidate: &Candidate) -> CandidateState {
        let Some(name) = candidate.sibling_name() else {
            return CandidateState::Unparseable;
        };

        let installed = ctx.installed_dir(&self.settings.modules_dir, name);
        if self.paths.is_linked(&installed) {
            CandidateState::Linked
        } else if self.paths.exists(&ctx.sibling_dir(name)) {
            CandidateState::Ready
        } else {
            CandidateState::Missing
        }
    }

    /// Guards, then the linking loop, then the summary.
    ///
    /// `load_manifest` is only called once every guard has passed.
    ///
    /// # Errors
    ///
    /// Returns an error on fatal conditions: unreadable version, manifest
    /// failures, clone or checkout failures.
    pub fn run<F>(
        &self,
        ctx: &LinkContext,
        ui: &mut dyn UserInterface,
        load_manifest: F,
    ) -> Result<LinkOutcome>
    where
        F: FnOnce() -> Result<Manifest>,
    {
        if let Some(reason) = self.check_guards(ctx)? {
            tracing::debug!("Skipping: {:?}", reason);
            match reason {
                SkipReason::VersionTooLow { .. } => ui.warning(&reason.to_string()),
                _ => ui.message(&reason.to_string()),
            }
            return Ok(LinkOutcome::Skipped(reason));
        }

        let manifest = load_manifest()?;
        let report = self.link_all(ctx, &manifest, ui)?;

        let complete = report.is_complete();
        ui.show_summary(report.linked(), report.candidates(), banner(complete));

        Ok(LinkOutcome::Completed(report))
    }

    /// Process every candidate of `manifest`. Guards are not evaluated.
    ///
    /// # Errors
    ///
    /// Returns an error when a clone or checkout fails, or when the clone
    /// confirmation can't be answered.
    pub fn link_all(
        &self,
        ctx: &LinkContext,
        manifest: &Manifest,
        ui: &mut dyn UserInterface,
    ) -> Result<LinkReport> {
        ui.show_header("Linking dependencies...");

        let mut report = LinkReport::default();
        for candidate in self.candidates(manifest) {
            let outcome = self.process(ctx, &candidate, ui)?;
            tracing::debug!("{} -> {:?}", outcome.package, outcome.status);
            report.entries.push(outcome);
        }

        tracing::debug!(
            "Linked {} of {} candidates",
            report.linked(),
            report.candidates()
        );
        Ok(report)
    }

    fn process(
        &self,
        ctx: &LinkContext,
        candidate: &Candidate,
        ui: &mut dyn UserInterface,
    ) -> Result<EntryOutcome> {
        let outcome = |status, sibling: Option<&Path>| EntryOutcome {
            package: candidate.package.clone(),
            sibling: sibling.map(Path::to_path_buf),
            status,
        };

        let Some(name) = candidate.sibling_name() else {
            ui.error(&format!(
                "{} - unrecognized repository specifier '{}'",
                candidate.package, candidate.specifier
            ));
            return Ok(outcome(EntryStatus::Unparseable, None));
        };

        let sibling = ctx.sibling_dir(name);
        if !self.paths.exists(&sibling) {
            let missing = format!("{} - is missing. Make sure you clone it first!", name);
            match &candidate.source {
                SiblingSource::Repo(spec) => {
                    if !self.confirm_clone(name, ui)? {
                        ui.error(&missing);
                        return Ok(outcome(EntryStatus::Declined, Some(sibling.as_path())));
                    }
                    self.acquire(spec, &sibling, ui)?;
                }
                _ => {
                    ui.error(&missing);
                    return Ok(outcome(EntryStatus::Missing, Some(sibling.as_path())));
                }
            }
        }

        let installed = ctx.installed_dir(&self.settings.modules_dir, name);
        if ui.output_mode().shows_detail() {
            ui.message(&format!("{} -> {}", installed.display(), sibling.display()));
        }
        match self.paths.link(&installed, &sibling) {
            Ok(()) => {
                ui.success(&candidate.package);
                Ok(outcome(EntryStatus::Linked, Some(sibling.as_path())))
            }
            Err(e) => {
                tracing::warn!("Linking {} failed: {}", candidate.package, e);
                ui.error(&format!("{} wasn't linked", candidate.package));
                Ok(outcome(EntryStatus::LinkFailed, Some(sibling.as_path())))
            }
        }
    }

    fn confirm_clone(&self, name: &str, ui: &mut dyn UserInterface) -> Result<bool> {
        match self.settings.clone_policy {
            ClonePolicy::Always => Ok(true),
            ClonePolicy::Never => Ok(false),
            ClonePolicy::Ask => {
                let prompt = Prompt {
                    key: format!("clone_{}", name),
                    question: format!("{} is missing. Clone it for you? Y/n", name),
                    default: Some("Y".to_string()),
                };
                let answer = ui.prompt(&prompt)?.as_string();
                Ok(accepts_clone(&answer))
            }
        }
    }

    fn acquire(&self, spec: &RepoSpec, sibling: &Path, ui: &mut dyn UserInterface) -> Result<()> {
        ui.message(&format!(
            "Cloning {} into {}",
            spec.clone_url,
            sibling.display()
        ));
        self.cloner.clone_repo(&spec.clone_url, sibling)?;

        if let Some(branch) = &spec.branch {
            ui.message(&format!("Checking out {}", branch));
            self.cloner.checkout(sibling, branch)?;
        }
        Ok(())
    }
}

/// Only an explicit `n` declines; empty input consents.
fn accepts_clone(answer: &str) -> bool {
    answer.trim() != "n"
}
