//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and their environment variable mirrors.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load the override file (see `config_context` module).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::formatters::OutputFormat;

#[derive(Parser)]
#[command(name = "wpenv")]
#[command(about = "wpenv - Resolve WordPress configuration from the environment", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  wpenv show\n  wpenv --root /var/www/html show -o json\n  wpenv render --output-file wp-config.php\n  wpenv explain DB_HOST\n  wpenv check\n"
)]
pub struct Cli {
    /// Site root directory; the override file is `<root>/.env`
    #[arg(long, global = true, env = "WPENV_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Explicit override file path (takes precedence over `<root>/.env`)
    #[arg(long, global = true, env = "WPENV_ENV_FILE", value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Do not read the override file; `show` and `check` report it as disabled
    #[arg(long, global = true, env = "WPENV_NO_ENV_FILE")]
    pub no_env_file: bool,

    /// Output format (table, json, yaml, env, php)
    #[arg(short, long, global = true, env = "WPENV_OUTPUT", default_value = "table")]
    pub output: OutputFormat,

    /// Output file path (saves results to file instead of stdout)
    #[arg(long, global = true, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Print passwords, keys and salts instead of redacting them
    #[arg(long, global = true)]
    pub reveal_secrets: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the resolved configuration, runtime directives and request context
    Show,

    /// Render the configuration as a PHP bootstrap fragment (secrets included)
    Render,

    /// Explain where each setting's value came from
    Explain {
        /// Limit output to one setting (e.g., DB_HOST)
        setting: Option<String>,
    },

    /// Report on the override file and flag insecure defaults
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "wpenv",
            "explain",
            "DB_HOST",
            "--root",
            "/srv/site",
            "-o",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.root, Some(PathBuf::from("/srv/site")));
        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Commands::Explain { setting } => assert_eq!(setting.as_deref(), Some("DB_HOST")),
            _ => panic!("expected explain"),
        }
    }

    #[test]
    fn test_no_env_file_flag() {
        let cli = Cli::try_parse_from(["wpenv", "show", "--no-env-file"]).unwrap();
        assert!(cli.no_env_file);

        let cli = Cli::try_parse_from(["wpenv", "show"]).unwrap();
        assert!(!cli.no_env_file);
    }

    #[test]
    fn test_invalid_output_format_is_rejected() {
        let result = Cli::try_parse_from(["wpenv", "-o", "xml", "show"]);
        assert!(result.is_err());
    }
}
