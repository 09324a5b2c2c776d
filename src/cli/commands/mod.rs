//! Command execution functions coordinating release operations.
//!
//! Each subcommand lives in its own module; this module validates arguments,
//! dispatches, and turns failures into an exit code with recovery suggestions.

mod info;
mod label;
mod release;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::{CliError, Result};
use std::path::Path;

use info::execute_info;
use label::execute_label;
use release::execute_release;

/// Execute the main command based on parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        // Validation errors are never quiet
        let output = super::OutputManager::new(false);
        output.error(&format!("Invalid arguments: {}", validation_error));
        return Ok(1);
    }

    let config = RuntimeConfig::from(&args);

    let result = match &args.command {
        Command::Release { .. } => execute_release(&args, &config).await,
        Command::Info { .. } => execute_info(&args, &config).await,
        Command::Label { .. } => execute_label(&args, &config).await,
    };

    match result {
        Ok(()) => Ok(0),
        Err(e) => {
            config.error_println(&format!(
                "Command '{}' failed: {}",
                args.command.name(),
                e
            ));

            if !config.is_quiet() {
                let suggestions = e.recovery_suggestions();
                if !suggestions.is_empty() {
                    config.println("\n💡 Recovery suggestions:");
                    for suggestion in suggestions {
                        config.println(&format!("  • {}", suggestion));
                    }
                }
            }

            Ok(1)
        }
    }
}

/// Reject a `--cwd` that does not name an existing directory
fn existing_dir(cwd: Option<&Path>) -> Result<Option<&Path>> {
    match cwd {
        Some(dir) if !dir.is_dir() => Err(CliError::InvalidArguments {
            reason: format!("--cwd {} is not a directory", dir.display()),
        }
        .into()),
        _ => Ok(cwd),
    }
}
