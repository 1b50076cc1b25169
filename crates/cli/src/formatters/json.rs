//! JSON formatter implementation.
//!
//! Responsibilities:
//! - Format all outputs as pretty-printed JSON.
//!
//! Does NOT handle:
//! - Other output formats.

use anyhow::Result;

use crate::formatters::{CheckOutput, ExplainEntry, Formatter, ShowOutput};

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_show(&self, output: &ShowOutput) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(output)?))
    }

    fn format_explain(&self, entries: &[ExplainEntry]) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(entries)?))
    }

    fn format_check(&self, output: &CheckOutput) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(output)?))
    }
}
