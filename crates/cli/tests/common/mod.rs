//! Shared test utilities for wpenv integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents host leakage.
//!
//! Invariants / Assumptions:
//! - `WPENV_*` mirrors are cleared so tests control override loading through flags.
//! - Every variable the precedence table reads is removed from the child environment.

use assert_cmd::Command;
use wpenv_config::chain;

/// CGI-style request variables read for the request context.
const REQUEST_VARS: &[&str] = &[
    "HTTPS",
    "SERVER_PORT",
    "HTTP_HOST",
    "REMOTE_ADDR",
    "HTTP_X_FORWARDED_PROTO",
    "HTTP_X_FORWARDED_HOST",
    "HTTP_X_FORWARDED_FOR",
];

/// Returns a hermetic `wpenv` command for integration testing.
///
/// It ensures:
/// - No variable from the precedence table leaks in from the host.
/// - `WPENV_*` flag mirrors are cleared.
pub fn wpenv_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("wpenv");

    for chain in chain::CHAINS {
        for key in chain.keys {
            cmd.env_remove(key);
        }
    }
    for key in REQUEST_VARS {
        cmd.env_remove(key);
    }

    cmd.env_remove("WPENV_ROOT")
        .env_remove("WPENV_ENV_FILE")
        .env_remove("WPENV_NO_ENV_FILE")
        .env_remove("WPENV_OUTPUT")
        .env_remove("RUST_LOG");

    cmd
}

/// Returns a hermetic `wpenv` command rooted at `root`.
#[allow(dead_code)]
pub fn wpenv_cmd_in(root: &std::path::Path) -> Command {
    let mut cmd = wpenv_cmd();
    cmd.arg("--root").arg(root);
    cmd
}
