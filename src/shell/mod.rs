//! Shell command execution.

pub mod command;
pub mod platform;

pub use command::{execute, execute_quiet, quote_path, CommandOptions, CommandResult};
pub use platform::is_ci;
