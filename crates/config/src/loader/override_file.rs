//! Override file (`.env`) parsing and merging.
//!
//! Responsibilities:
//! - Parse the line-oriented `KEY=VALUE` override format.
//! - Merge parsed entries into a variable map without replacing existing names.
//! - Describe the outcome in an `OverrideReport`.
//!
//! Does NOT handle:
//! - Value coercion (see `types::value`).
//! - Mirroring entries into the process environment (see `mirror.rs`).
//!
//! Invariants:
//! - Only the first `=` separates name from value.
//! - Blank lines and lines starting with `#` (after trimming) never mutate anything.
//! - An unreadable file is treated as absent; nothing here returns an error.
//! - Reports carry names and line numbers only, never values.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::constants::VALUE_TRIM_CHARS;

/// Classification of a single override-file line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideLine<'a> {
    /// Empty or whitespace-only line.
    Blank,
    /// Line whose first non-whitespace character is `#`.
    Comment,
    /// Line with no `=` or with an unusable name.
    Malformed,
    /// A `KEY=VALUE` assignment with both parts trimmed.
    Assignment { name: &'a str, value: &'a str },
}

impl<'a> OverrideLine<'a> {
    /// Classify one line of an override file.
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Blank;
        }
        if trimmed.starts_with('#') {
            return Self::Comment;
        }

        let Some((name, value)) = line.split_once('=') else {
            return Self::Malformed;
        };
        let name = name.trim();
        if name.is_empty() || name.contains('\0') {
            return Self::Malformed;
        }

        Self::Assignment {
            name,
            value: value.trim_matches(VALUE_TRIM_CHARS),
        }
    }
}

/// What happened when the override file was consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OverrideStatus {
    /// The caller chose not to read the file.
    Disabled,
    /// No file at the given path.
    Missing,
    /// The file exists but could not be read; treated as absent.
    Unreadable {
        #[serde(serialize_with = "serialize_error_kind")]
        kind: ErrorKind,
    },
    /// The file was read and merged.
    Loaded,
}

fn serialize_error_kind<S>(kind: &ErrorKind, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&kind.to_string())
}

/// Outcome of consulting the override file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverrideReport {
    /// Path that was consulted.
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: OverrideStatus,
    /// Names added to the environment, in file order.
    pub applied: Vec<String>,
    /// Names skipped because they were already present.
    pub shadowed: Vec<String>,
    /// One-based line numbers skipped as malformed.
    pub malformed_lines: Vec<usize>,
}

impl OverrideReport {
    /// A report for a file that was never merged.
    pub fn skipped(path: &Path, status: OverrideStatus) -> Self {
        Self {
            path: path.to_path_buf(),
            status,
            applied: Vec::new(),
            shadowed: Vec::new(),
            malformed_lines: Vec::new(),
        }
    }

    /// Whether the file was read and merged.
    pub fn is_loaded(&self) -> bool {
        self.status == OverrideStatus::Loaded
    }
}

/// Merge override-file contents into `vars`.
///
/// Returns the report plus the `(name, value)` pairs that were applied, so the
/// caller can mirror them elsewhere.
pub(crate) fn merge_contents(
    path: &Path,
    contents: &str,
    vars: &mut HashMap<String, String>,
) -> (OverrideReport, Vec<(String, String)>) {
    let mut report = OverrideReport::skipped(path, OverrideStatus::Loaded);
    let mut applied = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        match OverrideLine::parse(line) {
            OverrideLine::Blank | OverrideLine::Comment => {}
            OverrideLine::Malformed => report.malformed_lines.push(index + 1),
            OverrideLine::Assignment { name, value } => {
                if vars.contains_key(name) {
                    report.shadowed.push(name.to_string());
                    continue;
                }
                vars.insert(name.to_string(), value.to_string());
                report.applied.push(name.to_string());
                applied.push((name.to_string(), value.to_string()));
            }
        }
    }

    (report, applied)
}

/// Read the override file at `path` and merge it into `vars`.
pub(crate) fn merge_file(
    path: &Path,
    vars: &mut HashMap<String, String>,
) -> (OverrideReport, Vec<(String, String)>) {
    match std::fs::read(path) {
        Ok(bytes) => {
            let contents = String::from_utf8_lossy(&bytes);
            let (report, applied) = merge_contents(path, &contents, vars);
            tracing::debug!(
                path = %path.display(),
                applied = report.applied.len(),
                shadowed = report.shadowed.len(),
                malformed = report.malformed_lines.len(),
                "Merged override file"
            );
            (report, applied)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No override file present");
            (
                OverrideReport::skipped(path, OverrideStatus::Missing),
                Vec::new(),
            )
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                kind = %e.kind(),
                "Override file exists but is unreadable; continuing without it"
            );
            (
                OverrideReport::skipped(path, OverrideStatus::Unreadable { kind: e.kind() }),
                Vec::new(),
            )
        }
    }
}
