//! Command line argument parsing and validation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::trigger::TriggerKind;

/// Idempotent trunk tag publisher for git repositories.
#[derive(Parser, Debug)]
#[command(
    name = "trunk_tagger",
    version,
    about = "Tag trunk commits as trunk/<commit>, idempotently",
    long_about = "Ensures a tag named trunk/<commit> exists locally and on the
remote for a given commit, tolerating concurrent runs.

Usage:
  trunk_tagger publish <COMMIT> --trigger push
  trunk_tagger publish <COMMIT>
  trunk_tagger check <COMMIT>"
)]
pub struct Args {
    /// Path to the git repository
    #[arg(long, global = true, default_value = ".", value_name = "PATH")]
    pub repo: PathBuf,

    /// Remote that owns the authoritative tag namespace
    #[arg(long, global = true, default_value = "origin", value_name = "NAME")]
    pub remote: String,

    /// Integration branch manual commits must be reachable from
    #[arg(long, global = true, default_value = "main", value_name = "NAME")]
    pub branch: String,

    /// Print the final report as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Show per-step detail
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Suppress progress output
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Operations the tool can run.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ensure the trunk tag for a commit exists locally and on the remote
    Publish {
        /// Commit identifier to tag (full 40-character hash)
        #[arg(value_name = "COMMIT")]
        commit: String,

        /// Event kind that requested the tag
        #[arg(long, value_enum, default_value_t = TriggerKind::Manual)]
        trigger: TriggerKind,

        /// Abort the retry loop after this many seconds
        #[arg(long, value_name = "SECONDS")]
        deadline_secs: Option<u64>,
    },

    /// Report whether the trunk tag for a commit already exists
    Check {
        /// Commit identifier to look up (full 40-character hash)
        #[arg(value_name = "COMMIT")]
        commit: String,
    },
}

impl Command {
    /// Short command name for messages.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Publish { .. } => "publish",
            Command::Check { .. } => "check",
        }
    }
}

impl Args {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency.
    pub fn validate(&self) -> Result<(), String> {
        let commit = match &self.command {
            Command::Publish { commit, .. } | Command::Check { commit } => commit,
        };
        if commit.is_empty() {
            return Err("Commit identifier is required".to_string());
        }
        if self.remote.is_empty() {
            return Err("Remote name must not be empty".to_string());
        }
        if self.branch.is_empty() {
            return Err("Branch name must not be empty".to_string());
        }
        Ok(())
    }
}

/// Configuration derived from command line arguments.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration from parsed arguments.
    pub fn from_args(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }

    /// Get a reference to the output manager.
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print message.
    pub fn println(&self, message: &str) {
        self.output.println(message);
    }

    /// Print verbose message, shown only with --verbose.
    pub fn verbose_println(&self, message: &str) {
        self.output.verbose(message);
    }

    /// Print error message (always shown).
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message.
    pub fn warning_println(&self, message: &str) {
        self.output.warn(message);
    }

    /// Print success message.
    pub fn success_println(&self, message: &str) {
        self.output.success(message);
    }

    /// Print indented text.
    pub fn indent(&self, message: &str) {
        self.output.indent(message);
    }

    /// Check if quiet output is enabled.
    pub fn is_quiet(&self) -> bool {
        self.output.is_quiet()
    }

    /// Check if verbose output is enabled.
    pub fn is_verbose(&self) -> bool {
        self.output.is_verbose()
    }
}
