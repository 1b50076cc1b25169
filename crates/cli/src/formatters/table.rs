//! Table formatter implementation.
//!
//! Responsibilities:
//! - Format outputs as aligned, human-readable sections.
//!
//! Does NOT handle:
//! - Other output formats.
//! - File I/O.

use anyhow::Result;
use wpenv_config::types::format_octal;
use wpenv_config::{OverrideReport, OverrideStatus, Source};

use crate::formatters::common::display_optional;
use crate::formatters::{CheckOutput, ExplainEntry, Formatter, ShowOutput};

/// Table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_show(&self, output: &ShowOutput) -> Result<String> {
        let mut rows: Vec<(&str, String)> = output
            .constants
            .iter()
            .map(|c| (c.name, c.value.to_string()))
            .collect();
        rows.push(("$table_prefix", output.table_prefix.to_string()));

        let mut out = String::new();
        out.push_str(&format!("ABSPATH: {}\n\n", output.abspath.display()));
        out.push_str("--- Constants ---\n");
        push_rows(&mut out, &rows);

        let runtime = &output.runtime;
        let mut rows = vec![
            (
                "upload_max_filesize",
                runtime.upload_max_filesize.to_string(),
            ),
            ("post_max_size", runtime.post_max_size.to_string()),
            ("log_errors", runtime.log_errors.to_string()),
        ];
        if let Some(path) = &runtime.error_log {
            rows.push(("error_log", path.clone()));
        }
        if let Some(tz) = &runtime.timezone {
            rows.push(("timezone", tz.clone()));
        }
        rows.push(("default_fileperms", format_octal(runtime.file_perms)));
        rows.push(("default_dirperms", format_octal(runtime.dir_perms)));
        out.push_str("\n--- Runtime Directives ---\n");
        push_rows(&mut out, &rows);

        let request = &output.request;
        out.push_str("\n--- Request ---\n");
        push_rows(
            &mut out,
            &[
                ("Secure", request.secure.to_string()),
                ("Port", request.port.to_string()),
                ("Host", request.host.clone().unwrap_or_else(|| "N/A".into())),
                (
                    "Remote Address",
                    request.remote_addr.clone().unwrap_or_else(|| "N/A".into()),
                ),
            ],
        );

        if let Some(report) = &output.override_file {
            out.push_str("\n--- Override File ---\n");
            push_override_report(&mut out, report);
        }

        Ok(out)
    }

    fn format_explain(&self, entries: &[ExplainEntry]) -> Result<String> {
        if entries.is_empty() {
            return Ok("No settings found.\n".to_string());
        }

        if let [entry] = entries {
            let mut out = String::new();
            out.push_str(&format!("Setting: {}\n", entry.setting));
            out.push_str(&format!("Keys: {}\n", entry.keys.join(", ")));
            out.push_str(&format!("Default: {}\n", entry.default));
            out.push_str(&format!(
                "Value: {}\n",
                display_optional(entry.value.as_ref())
            ));
            out.push_str(&format!("Source: {}\n", describe_source(&entry.source)));
            return Ok(out);
        }

        let setting_width = column_width(entries.iter().map(|e| e.setting), "SETTING");
        let sources: Vec<String> = entries.iter().map(|e| describe_source(&e.source)).collect();
        let source_width = column_width(sources.iter().map(String::as_str), "SOURCE");

        let mut out = format!(
            "{:<sw$}  {:<cw$}  VALUE\n",
            "SETTING",
            "SOURCE",
            sw = setting_width,
            cw = source_width
        );
        for (entry, source) in entries.iter().zip(&sources) {
            out.push_str(&format!(
                "{:<sw$}  {:<cw$}  {}\n",
                entry.setting,
                source,
                display_optional(entry.value.as_ref()),
                sw = setting_width,
                cw = source_width
            ));
        }
        Ok(out)
    }

    fn format_check(&self, output: &CheckOutput) -> Result<String> {
        let mut out = String::new();

        out.push_str("--- Override File ---\n");
        match &output.override_file {
            Some(report) => push_override_report(&mut out, report),
            None => out.push_str("Status: not consulted\n"),
        }

        out.push_str("\n--- Insecure Defaults ---\n");
        out.push_str(&format!("Environment: {}\n", output.environment));
        let placeholders = if output.placeholder_secrets.is_empty() {
            "none".to_string()
        } else {
            output.placeholder_secrets.join(", ")
        };
        out.push_str(&format!("Placeholder keys: {}\n", placeholders));
        out.push_str(&format!(
            "Default database password: {}\n",
            if output.default_db_password { "yes" } else { "no" }
        ));
        out.push_str(&format!(
            "\nResult: {}\n",
            if output.passed() { "PASS" } else { "FAIL" }
        ));

        Ok(out)
    }
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values.map(str::len).chain([header.len()]).max().unwrap_or(0)
}

fn push_rows(out: &mut String, rows: &[(&str, String)]) {
    let width = column_width(rows.iter().map(|(name, _)| *name), "");
    for (name, value) in rows {
        out.push_str(&format!("{:<width$}  {}\n", name, value, width = width));
    }
}

fn push_override_report(out: &mut String, report: &OverrideReport) {
    out.push_str(&format!("Path: {}\n", report.path.display()));
    out.push_str(&format!("Status: {}\n", describe_status(&report.status)));
    if report.is_loaded() {
        out.push_str(&format!("Applied: {}\n", report.applied.len()));
        if !report.shadowed.is_empty() {
            out.push_str(&format!(
                "Shadowed by environment: {}\n",
                report.shadowed.join(", ")
            ));
        }
        if !report.malformed_lines.is_empty() {
            let lines: Vec<String> = report
                .malformed_lines
                .iter()
                .map(|n| n.to_string())
                .collect();
            out.push_str(&format!("Malformed lines: {}\n", lines.join(", ")));
        }
    }
}

fn describe_status(status: &OverrideStatus) -> String {
    match status {
        OverrideStatus::Disabled => "disabled".to_string(),
        OverrideStatus::Missing => "missing".to_string(),
        OverrideStatus::Unreadable { kind } => format!("unreadable ({})", kind),
        OverrideStatus::Loaded => "loaded".to_string(),
    }
}

fn describe_source(source: &Source) -> String {
    match source {
        Source::Var(name) => (*name).to_string(),
        Source::Default => "default".to_string(),
    }
}
