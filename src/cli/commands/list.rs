//! List command implementation.
//!
//! The `deplink list` command shows every linkable dependency and the state
//! of its sibling checkout. No guard is evaluated and nothing is changed.

use std::path::{Path, PathBuf};

use crate::cli::args::ListArgs;
use crate::config::{load_config, LinkSettings, SettingsOverrides};
use crate::error::Result;
use crate::linker::{
    CandidateState, CommandVersionProbe, GitCloner, LinkContext, Linker, ShellLinker,
};
use crate::manifest::load_manifest;
use crate::ui::theme::DeplinkTheme;
use crate::ui::{should_use_colors, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(&self.project_root, self.config_override.as_deref())?;
        let overrides = SettingsOverrides {
            preset: self.args.preset,
            clone_policy: None,
        };
        let settings = LinkSettings::resolve(&config, &overrides)?;

        let cwd = self.project_root.canonicalize()?;
        let manifest = load_manifest(&cwd.join(&settings.manifest))?;

        let probe = CommandVersionProbe::new(settings.version_command.clone(), cwd.clone());
        let paths = ShellLinker::default();
        let linker = Linker::new(&settings, &probe, &GitCloner, &paths)?;
        let ctx = LinkContext::new(&cwd, Default::default());

        let candidates = linker.candidates(&manifest);
        if candidates.is_empty() {
            ui.message("No linkable dependencies found.");
            return Ok(CommandResult::success());
        }

        let theme = if should_use_colors() {
            DeplinkTheme::new()
        } else {
            DeplinkTheme::plain()
        };

        for candidate in &candidates {
            let state = linker.inspect(&ctx, candidate);
            let label = match state {
                CandidateState::Linked => theme.success.apply_to(state.label()),
                CandidateState::Ready => theme.dim.apply_to(state.label()),
                CandidateState::Missing | CandidateState::Unparseable => {
                    theme.error.apply_to(state.label())
                }
            };
            let sibling = candidate.sibling_name().unwrap_or("?");

            ui.message(&format!(
                "  {} {} {}",
                candidate.package,
                theme.dim.apply_to(format!("-> ../{}", sibling)),
                label
            ));
        }

        Ok(CommandResult::success())
    }
}
