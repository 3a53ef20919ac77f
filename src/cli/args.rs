// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cklint - Commit message rule engine
///
/// Validates a commit message against a declarative rule set.
#[derive(Parser, Debug)]
#[command(name = "cklint")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Declarative commit message linter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run (defaults to check if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CKLINT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate a commit message (default command)
    Check(CheckArgs),

    /// List the effective rules
    Rules,

    /// Print version information
    Version,

    /// Initialize cklint configuration
    Init(InitArgs),
}

/// Arguments for the check command.
#[derive(Parser, Debug, Default, Clone)]
pub struct CheckArgs {
    /// File holding the message, e.g. .git/COMMIT_EDITMSG ("-" for stdin)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Validate this message instead of reading a file
    #[arg(short, long, conflicts_with = "file")]
    pub message: Option<String>,

    /// Strict mode: treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Configuration preset
    #[arg(long)]
    pub preset: Option<ConfigPreset>,
}

/// Configuration presets for init.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigPreset {
    /// Only the essential header rules
    Minimal,
    /// Conventional preset plus project scopes (recommended)
    Conventional,
}

impl Cli {
    /// Get the effective command, defaulting to Check if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Check(CheckArgs::default()))
    }
}
