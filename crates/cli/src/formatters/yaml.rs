//! YAML formatter implementation.
//!
//! Responsibilities:
//! - Format all outputs as YAML with the same structure as JSON.
//!
//! Does NOT handle:
//! - Other output formats.

use anyhow::Result;

use crate::formatters::{CheckOutput, ExplainEntry, Formatter, ShowOutput};

/// YAML formatter.
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn format_show(&self, output: &ShowOutput) -> Result<String> {
        Ok(serde_yaml::to_string(output)?)
    }

    fn format_explain(&self, entries: &[ExplainEntry]) -> Result<String> {
        Ok(serde_yaml::to_string(entries)?)
    }

    fn format_check(&self, output: &CheckOutput) -> Result<String> {
        Ok(serde_yaml::to_string(output)?)
    }
}
