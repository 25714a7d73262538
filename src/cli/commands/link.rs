//! Link command implementation.
//!
//! The `deplink link` command (also the default) replaces installed
//! organization dependencies with symlinks to sibling checkouts.

use std::path::{Path, PathBuf};

use crate::cli::args::LinkArgs;
use crate::config::{load_config, LinkSettings, SettingsOverrides};
use crate::error::Result;
use crate::linker::{CommandVersionProbe, GitCloner, LinkContext, Linker, ShellLinker};
use crate::manifest::load_manifest;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The link command implementation.
pub struct LinkCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: LinkArgs,
}

impl LinkCommand {
    /// Create a new link command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: LinkArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &LinkArgs {
        &self.args
    }

    fn resolve_settings(&self) -> Result<LinkSettings> {
        let config = load_config(&self.project_root, self.config_override.as_deref())?;
        let overrides = SettingsOverrides {
            preset: self.args.preset,
            clone_policy: self.args.clone_policy(),
        };
        LinkSettings::resolve(&config, &overrides)
    }
}

impl Command for LinkCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = self.resolve_settings()?;
        tracing::debug!("Resolved settings: {:?}", settings);

        // Sibling paths are derived from the parent, so it must be absolute
        let cwd = self.project_root.canonicalize()?;

        let ctx = LinkContext::from_process(&cwd);
        let probe = CommandVersionProbe::new(settings.version_command.clone(), cwd.clone())
            .with_env(ctx.env.clone());
        let paths = ShellLinker::with_env(ctx.env.clone());
        let linker = Linker::new(&settings, &probe, &GitCloner, &paths)?;

        let manifest_path = cwd.join(&settings.manifest);
        let outcome = linker.run(&ctx, ui, || load_manifest(&manifest_path))?;

        Ok(CommandResult::from_exit_code(outcome.exit_code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClonePolicy, Preset};
    use crate::error::DeplinkError;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn project(config: &str, manifest: Option<&str>) -> TempDir {
        let temp = TempDir::new().unwrap();
        let app = temp.path().join("app");
        fs::create_dir_all(&app).unwrap();
        fs::write(app.join(".deplink.yml"), config).unwrap();
        if let Some(manifest) = manifest {
            fs::write(app.join("package.json"), manifest).unwrap();
        }
        temp
    }

    #[test]
    fn cli_flags_override_config() {
        let temp = project("preset: guarded\nclone: never\n", None);
        let args = LinkArgs {
            preset: Some(Preset::Basic),
            yes: true,
            ..Default::default()
        };
        let cmd = LinkCommand::new(&temp.path().join("app"), None, args);

        let settings = cmd.resolve_settings().unwrap();
        assert_eq!(settings.preset, Preset::Basic);
        assert_eq!(settings.clone_policy, ClonePolicy::Always);
    }

    #[test]
    fn explicit_config_must_exist() {
        let temp = project("", None);
        let missing = temp.path().join("nope.yml");
        let cmd = LinkCommand::new(
            &temp.path().join("app"),
            Some(missing.as_path()),
            LinkArgs::default(),
        );
        assert!(cmd.resolve_settings().is_err());
    }

    #[test]
    fn missing_manifest_is_fatal() {
        let temp = project("preset: basic\nversion_command: echo 5.1.0\n", None);
        let cmd = LinkCommand::new(&temp.path().join("app"), None, LinkArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui);
        assert!(matches!(result, Err(DeplinkError::ManifestNotFound { .. })));
    }

    #[test]
    fn zero_candidates_succeeds() {
        let temp = project(
            "preset: basic\nversion_command: echo 5.1.0\n",
            Some(r#"{"dependencies": {"lodash": "^4.17.0"}}"#),
        );
        let cmd = LinkCommand::new(&temp.path().join("app"), None, LinkArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert!(result.success);
        assert_eq!(ui.summaries()[0].0, 0);
        assert_eq!(ui.summaries()[0].1, 0);
    }

    #[cfg(unix)]
    #[test]
    fn links_present_sibling() {
        let temp = project(
            "preset: basic\nversion_command: echo 5.1.0\n",
            Some(r#"{"dependencies": {"api": "git+ssh://git@github.com:Mindflash/api.git"}}"#),
        );
        let sibling = temp.path().join("api");
        let installed = temp.path().join("app/node_modules/api");
        fs::create_dir_all(&sibling).unwrap();
        fs::create_dir_all(&installed).unwrap();

        let cmd = LinkCommand::new(&temp.path().join("app"), None, LinkArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, 0);
        assert!(fs::symlink_metadata(&installed)
            .unwrap()
            .file_type()
            .is_symlink());
        assert!(ui.has_success("api"));
    }
}
