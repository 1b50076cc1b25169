//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//! - Build the configuration context once and hand it to the command.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Formatting (see `formatters` module).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::config_context::ConfigContext;
use crate::error::ExitCode;

/// Dispatch CLI commands to their respective handlers.
///
/// Returns the exit code the process should finish with; `check` is the only
/// command that reports a non-zero code without an error.
pub(crate) fn run_command(cli: Cli) -> Result<ExitCode> {
    let context =
        ConfigContext::load(cli.root.clone(), cli.env_file.clone(), cli.no_env_file)?;
    let output_file = cli.output_file.as_deref();

    match cli.command {
        Commands::Show => {
            commands::show::run(&context, cli.output, cli.reveal_secrets, output_file)?;
        }
        Commands::Render => {
            commands::render::run(&context, output_file)?;
        }
        Commands::Explain { setting } => {
            commands::explain::run(
                &context,
                setting.as_deref(),
                cli.output,
                cli.reveal_secrets,
                output_file,
            )?;
        }
        Commands::Check => {
            return commands::check::run(&context, cli.output, output_file);
        }
    }

    Ok(ExitCode::Success)
}
