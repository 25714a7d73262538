//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::{ClonePolicy, Preset};

/// deplink - Link organization dependencies to sibling checkouts.
#[derive(Debug, Parser)]
#[command(name = "deplink")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .deplink.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Link dependencies to sibling checkouts (default if no command specified)
    Link(LinkArgs),

    /// Show linkable dependencies without changing anything
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `link` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LinkArgs {
    /// Behavior preset (overrides the config file)
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Clone missing siblings without asking
    #[arg(short, long, conflicts_with = "no_clone")]
    pub yes: bool,

    /// Never clone missing siblings
    #[arg(long)]
    pub no_clone: bool,

    /// Use defaults, no prompts
    #[arg(long)]
    pub non_interactive: bool,
}

impl LinkArgs {
    /// Clone policy requested on the command line, if any.
    pub fn clone_policy(&self) -> Option<ClonePolicy> {
        if self.yes {
            Some(ClonePolicy::Always)
        } else if self.no_clone {
            Some(ClonePolicy::Never)
        } else {
            None
        }
    }
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Behavior preset (overrides the config file)
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
