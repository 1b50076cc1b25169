//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for the few library-level faults outside the resolver core.
//!
//! Does NOT handle:
//! - Override-file problems: an absent or unreadable file and malformed lines are
//!   recovered silently and reported through `OverrideReport`, never as errors.
//!
//! Invariants:
//! - Error messages NEVER include override-file values to prevent secret leakage.

use thiserror::Error;

/// Errors that can occur while inspecting resolved configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown setting '{name}'. Run `wpenv explain` to list all settings.")]
    UnknownSetting { name: String },
}
