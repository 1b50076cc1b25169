//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish outcomes.
//! - Map errors from the configuration library to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit code 2 matches clap's own exit code for argument errors.

use wpenv_config::ConfigError;

/// Structured exit codes for wpenv.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - I/O failure or other unhandled condition.
    GeneralError = 1,

    /// Usage error - unknown setting name or invalid argument.
    ///
    /// Scripts should fix the invocation and not retry.
    UsageError = 2,

    /// Insecure defaults - placeholder keys or the default database password are in use.
    ///
    /// Only `check` returns this code; the configuration itself still resolved.
    InsecureDefaults = 3,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&anyhow::Error> for ExitCode {
    fn from(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return match config_err {
                    ConfigError::UnknownSetting { .. } => ExitCode::UsageError,
                };
            }
        }
        ExitCode::GeneralError
    }
}
