//! wpenv - Resolve a WordPress site's configuration from its environment.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Load the site's override file and build the configuration through `wpenv-config`.
//! - Print the configuration, its PHP bootstrap rendering, provenance, or a safety report.
//!
//! Does NOT handle:
//! - Resolution rules or the precedence table (see `crates/config`).
//! - Applying the configuration to a running site.
//!
//! Invariants:
//! - Logs go to stderr so stdout stays parseable for every output format.
//! - The process exits with a structured `ExitCode`.

mod args;
mod commands;
mod config_context;
mod dispatch;
mod error;
mod formatters;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match run_command(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(ExitCode::from(&e).as_i32());
        }
    }
}
