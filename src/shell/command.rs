//! Shell command execution.

use crate::error::{DeplinkError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<std::path::PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

/// Execute a command through `sh -c` and wait for it to exit.
///
/// The shell is neither a login nor an interactive shell, so no profile is
/// sourced and aliases are not expanded. There is no timeout; a hung command
/// blocks the caller.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let (shell, flag) = shell_invocation();
    let mut cmd = Command::new(shell);
    cmd.arg(flag);
    cmd.arg(command);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    tracing::debug!("Running `{}` via {}", command, shell);

    let output = cmd.output().map_err(|_| DeplinkError::CommandFailed {
        command: command.to_string(),
        code: None,
    })?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    tracing::debug!(
        "`{}` exited with {:?} after {:?}",
        command,
        output.status.code(),
        duration
    );

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Execute a command with extra environment and collect output without
/// echoing it.
pub fn execute_quiet(
    command: &str,
    cwd: Option<&Path>,
    env: &HashMap<String, String>,
) -> Result<CommandResult> {
    let options = CommandOptions {
        cwd: cwd.map(|p| p.to_path_buf()),
        env: env.clone(),
        capture_stdout: true,
        capture_stderr: true,
    };
    execute(command, &options)
}

/// Quote a path for use as a single POSIX shell word.
pub fn quote_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    format!("'{}'", raw.replace('\'', r"'\''"))
}

fn shell_invocation() -> (&'static str, &'static str) {
    if cfg!(target_os = "windows") {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_successful_command() {
        let options = CommandOptions {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        };

        let result = execute("echo hello", &options).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn execute_failing_command() {
        let options = CommandOptions {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        };

        let result = execute("exit 1", &options).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(1));
    }

    #[test]
    fn execute_with_env() {
        let mut options = CommandOptions {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        };
        options
            .env
            .insert("DEPLINK_TEST_VAR".to_string(), "my_value".to_string());

        let result = execute("echo $DEPLINK_TEST_VAR", &options).unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("my_value"));
    }

    #[test]
    fn execute_with_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "").unwrap();

        let result = execute_quiet("ls", Some(temp.path()), &HashMap::new()).unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("marker.txt"));
    }

    #[test]
    fn quote_path_wraps_in_single_quotes() {
        assert_eq!(quote_path(Path::new("/work/my app")), "'/work/my app'");
    }

    #[test]
    fn quote_path_escapes_single_quotes() {
        assert_eq!(quote_path(Path::new("/work/o'neil")), r"'/work/o'\''neil'");
    }

    #[test]
    fn quoted_path_survives_the_shell() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("it's here");
        std::fs::create_dir_all(&dir).unwrap();

        let result = execute_quiet(
            &format!("test -d {}", quote_path(&dir)),
            None,
            &HashMap::new(),
        )
        .unwrap();
        assert!(result.success);
    }

    #[cfg(unix)]
    #[test]
    fn execute_ignores_user_profiles() {
        let home = tempfile::TempDir::new().unwrap();
        for profile in [".profile", ".bash_profile", ".bashrc", ".shrc"] {
            std::fs::write(
                home.path().join(profile),
                "echo 'Welcome back'\nalias echo='echo aliased'\n",
            )
            .unwrap();
        }

        let mut options = CommandOptions {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        };
        let home_dir = home.path().to_string_lossy().to_string();
        options.env.insert("HOME".to_string(), home_dir.clone());
        options
            .env
            .insert("ENV".to_string(), format!("{}/.shrc", home_dir));
        options
            .env
            .insert("SHELL".to_string(), "/bin/bash".to_string());

        let result = execute("echo 5.1.0", &options).unwrap();

        assert!(result.success);
        assert_eq!(result.stdout, "5.1.0\n");
    }
}
