//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use deplink::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("clone_api", "n");
//!
//! // Use ui in code under test...
//! ui.success("mf-logger");
//! ui.error("api is missing. Make sure you clone it first!");
//!
//! // Assert on captured interactions
//! assert!(ui.has_success("mf-logger"));
//! assert!(ui.has_error("api is missing"));
//! ```

use std::collections::{HashMap, VecDeque};

use crate::error::Result;

use super::{OutputMode, Prompt, PromptResult, UserInterface};

/// Mock UI implementation for testing.
///
/// Captures all UI interactions and allows pre-configured prompt responses.
/// Supports both single responses (via `set_prompt_response`) and queued
/// responses (via `queue_prompt_responses`) for keys called multiple times.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    summaries: Vec<(usize, usize, String)>,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    prompts_shown: Vec<String>,
    /// Fallback response for any prompt key not in `prompt_responses` or `prompt_queues`.
    default_prompt_response: Option<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue multiple responses for the same prompt key.
    ///
    /// Responses are returned in order. After the queue is exhausted,
    /// falls back to `set_prompt_response` or defaults.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    /// Set a default response for any prompt key not explicitly configured.
    pub fn set_default_prompt_response(&mut self, response: &str) {
        self.default_prompt_response = Some(response.to_string());
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all captured summaries as (linked, total, banner).
    pub fn summaries(&self) -> &[(usize, usize, String)] {
        &self.summaries
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        // Queued responses first (for keys called multiple times)
        if let Some(queue) = self.prompt_queues.get_mut(&prompt.key) {
            if let Some(response) = queue.pop_front() {
                return Ok(PromptResult(response));
            }
        }

        if let Some(response) = self.prompt_responses.get(&prompt.key) {
            return Ok(PromptResult(response.clone()));
        }

        if let Some(response) = &self.default_prompt_response {
            return Ok(PromptResult(response.clone()));
        }

        if let Some(default) = &prompt.default {
            return Ok(PromptResult(default.clone()));
        }

        // Empty answer, as if the user just pressed enter
        Ok(PromptResult(String::new()))
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_summary(&mut self, linked: usize, total: usize, banner: &str) {
        self.summaries.push((linked, total, banner.to_string()));
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clone_prompt(key: &str) -> Prompt {
        Prompt {
            key: key.to_string(),
            question: format!("{} is missing. Clone it for you? Y/n", key),
            default: None,
        }
    }

    #[test]
    fn captures_output() {
        let mut ui = MockUI::new();
        ui.message("plain");
        ui.success("linked");
        ui.warning("careful");
        ui.error("broken");
        ui.show_header("Linking dependencies...");
        ui.show_summary(1, 2, "banner");

        assert!(ui.has_message("plain"));
        assert!(ui.has_success("linked"));
        assert!(ui.has_warning("careful"));
        assert!(ui.has_error("broken"));
        assert_eq!(ui.headers(), &["Linking dependencies...".to_string()]);
        assert_eq!(ui.summaries(), &[(1, 2, "banner".to_string())]);
    }

    #[test]
    fn configured_response_is_returned() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("clone_api", "n");

        let result = ui.prompt(&clone_prompt("clone_api")).unwrap();
        assert_eq!(result.as_string(), "n");
        assert_eq!(ui.prompts_shown(), &["clone_api".to_string()]);
    }

    #[test]
    fn queued_responses_in_order() {
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("clone_api", vec!["n", "y"]);

        assert_eq!(ui.prompt(&clone_prompt("clone_api")).unwrap().as_string(), "n");
        assert_eq!(ui.prompt(&clone_prompt("clone_api")).unwrap().as_string(), "y");
        assert_eq!(ui.prompt(&clone_prompt("clone_api")).unwrap().as_string(), "");
    }

    #[test]
    fn default_response_applies_to_any_key() {
        let mut ui = MockUI::new();
        ui.set_default_prompt_response("n");
        assert_eq!(ui.prompt(&clone_prompt("clone_x")).unwrap().as_string(), "n");
    }

    #[test]
    fn responses_are_returned_verbatim() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("clone_api", "yes");
        assert_eq!(
            ui.prompt(&clone_prompt("clone_api")).unwrap().as_string(),
            "yes"
        );
    }

    #[test]
    fn unanswered_prompt_is_empty_input() {
        let mut ui = MockUI::new();
        assert_eq!(ui.prompt(&clone_prompt("clone_y")).unwrap().as_string(), "");
    }
}
