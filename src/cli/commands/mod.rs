//! Command execution coordinating the publisher and the git backend.

mod check;
mod publish;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;

use check::execute_check;
use publish::execute_publish;

/// Execute the parsed command, returning the process exit code.
pub async fn execute_command(args: Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        // Validation errors are never silenced by --quiet.
        let output = super::OutputManager::new(false, false);
        output.error(&format!("Invalid arguments: {validation_error}"));
        return Ok(1);
    }

    let config = RuntimeConfig::from_args(&args);

    let result = match &args.command {
        Command::Publish { .. } => execute_publish(&args, &config).await,
        Command::Check { .. } => execute_check(&args, &config).await,
    };

    match result {
        Ok(exit_code) => Ok(exit_code),
        Err(e) => {
            config.error_println(&format!(
                "Command '{}' failed during {}: {}",
                args.command.name(),
                e.stage(),
                e
            ));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() && !config.is_quiet() {
                config.println("Recovery suggestions:");
                for suggestion in suggestions {
                    config.println(&format!("  - {suggestion}"));
                }
            }

            Ok(1)
        }
    }
}
