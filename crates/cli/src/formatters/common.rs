//! Common utilities for formatters.
//!
//! Responsibilities:
//! - Atomic file writing.
//! - Routing formatted output to stdout or a file.
//! - Standardized undefined-value text for human-facing formats.
//!
//! Does NOT handle:
//! - Format-specific logic (lives in respective formatter modules).

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use wpenv_config::EnvValue;

/// Text shown for a setting that resolved to no value at all.
pub const UNDEFINED_VALUE: &str = "(undefined)";

/// Render a possibly-undefined value for human-facing output.
pub fn display_optional(value: Option<&EnvValue>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| UNDEFINED_VALUE.to_string())
}

/// Print formatted output or write it to `output_file`.
pub fn output_result(output: &str, output_file: Option<&Path>) -> Result<()> {
    if let Some(path) = output_file {
        write_to_file(output, path)
            .with_context(|| format!("Failed to write output to {}", path.display()))?;
        eprintln!("Results written to {}", path.display());
    } else {
        print!("{}", output);
    }
    Ok(())
}

/// Write formatted output to a file atomically.
///
/// Creates parent directories if needed, writes to temp file then renames
/// for atomicity. Returns error with helpful context on failure.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    // If path has no parent (e.g., just "wp-config.php"), use current directory
    let parent_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    if parent_dir != Path::new(".") {
        fs::create_dir_all(parent_dir)
            .with_context(|| format!("Failed to create directory: {}", parent_dir.display()))?;
    }

    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temp file in: {}", parent_dir.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| "Failed to write to temp file")?;
    temp_file
        .flush()
        .with_context(|| "Failed to flush temp file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_display_optional() {
        assert_eq!(display_optional(Some(&EnvValue::Bool(true))), "true");
        assert_eq!(display_optional(Some(&EnvValue::Null)), "null");
        assert_eq!(display_optional(None), "(undefined)");
    }

    #[test]
    fn test_write_to_file_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/wp-config.php");

        write_to_file("<?php\n", &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<?php\n");
    }

    #[test]
    fn test_write_to_file_replaces_existing_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");
        fs::write(&path, "old content that is longer").unwrap();

        write_to_file("{}", &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
