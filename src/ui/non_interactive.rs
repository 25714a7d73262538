//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{DeplinkError, Result};

use super::{OutputMode, Prompt, PromptResult, UserInterface};

/// Prefix of environment variables that answer prompts.
pub const PROMPT_ENV_PREFIX: &str = "DEPLINK_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `DEPLINK_PROMPT_<KEY>` variables, then from the
/// prompt's default. Output is plain text without styling.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

/// Environment variable name for a prompt key.
///
/// Characters outside `[A-Za-z0-9]` become `_`, so `clone_mf-logger` maps
/// to `DEPLINK_PROMPT_CLONE_MF_LOGGER`.
pub fn prompt_env_key(key: &str) -> String {
    let normalized: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}{}", PROMPT_ENV_PREFIX, normalized)
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_summary() {
            println!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        if let Some(value) = self.env_overrides.get(&prompt_env_key(&prompt.key)) {
            return Ok(PromptResult(value.clone()));
        }

        if let Some(default) = &prompt.default {
            return Ok(PromptResult(default.clone()));
        }

        Err(DeplinkError::ConfigValidationError {
            message: format!(
                "Cannot prompt for '{}' in non-interactive mode (no default value)",
                prompt.key
            ),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("{}\n", title);
        }
    }

    fn show_summary(&mut self, linked: usize, total: usize, banner: &str) {
        if !self.mode.shows_summary() {
            return;
        }

        println!("\n{} / {} linked", linked, total);
        if self.mode.shows_status() {
            println!("{}", banner);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
