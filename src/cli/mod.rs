//! Command line interface for trunk_tagger.
//!
//! Argument parsing, command dispatch, and operator-facing output.

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command, RuntimeConfig};
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute_command(args).await
}
