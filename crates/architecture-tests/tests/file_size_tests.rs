//! Architecture tests for file size limits.
//!
//! - Files >500 LOC require justification (warning logged)
//! - Files >800 LOC are presumed mis-scoped (test failure)
//!
//! Walks every .rs file under crates/ and counts non-blank, non-comment lines.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const WARNING_THRESHOLD: usize = 500;
const FAILURE_THRESHOLD: usize = 800;

/// Files excluded from size checks, as (path_suffix, justification) pairs.
const EXCLUDED_FILES: &[(&str, &str)] = &[(
    "loader/chain.rs",
    "Precedence table: one const per setting the bootstrap defines",
)];

#[test]
fn file_size_limits() {
    let workspace_root = find_workspace_root();
    let rust_files = find_rust_files(&workspace_root.join("crates"));
    assert!(!rust_files.is_empty(), "No Rust files found under crates/");

    let mut failures = Vec::new();

    for file_path in &rust_files {
        let loc = count_loc(&fs::read_to_string(file_path).unwrap());
        let relative = file_path.strip_prefix(&workspace_root).unwrap_or(file_path);
        let relative_str = relative.to_string_lossy();

        let excluded = EXCLUDED_FILES
            .iter()
            .any(|(suffix, _)| relative_str.ends_with(suffix));

        if loc > FAILURE_THRESHOLD && !excluded {
            failures.push(format!("  - {}: {} lines", relative_str, loc));
        } else if loc > WARNING_THRESHOLD {
            eprintln!(
                "[architecture] {}: {} LOC exceeds {}",
                relative_str, loc, WARNING_THRESHOLD
            );
        }
    }

    assert!(
        failures.is_empty(),
        "\nFiles exceeding {} LOC (presumed mis-scoped):\n{}\n\
         Refactor them or add them to EXCLUDED_FILES with a justification.",
        FAILURE_THRESHOLD,
        failures.join("\n")
    );

    eprintln!(
        "[architecture] Checked {} Rust files for size limits.",
        rust_files.len()
    );
}

/// Count lines of code, excluding blank lines and line comments.
fn count_loc(content: &str) -> usize {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
        .count()
}

/// All .rs files below `dir`, skipping build output and this crate.
fn find_rust_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            name != "target" && name != "architecture-tests"
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.into_path())
        .collect()
}

/// Find the workspace root by looking for Cargo.toml with [workspace].
fn find_workspace_root() -> PathBuf {
    let current_dir = std::env::current_dir().expect("Failed to get current directory");

    let mut dir = current_dir.as_path();
    loop {
        let cargo_toml = dir.join("Cargo.toml");
        if let Ok(content) = fs::read_to_string(&cargo_toml)
            && content.contains("[workspace]")
        {
            return dir.to_path_buf();
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => return current_dir,
        }
    }
}

#[test]
fn test_count_loc_skips_comments_and_blanks() {
    let source = r#"//! Module documentation

/// Function documentation
fn main() {
    let x = 5; // inline comment

    // Another comment
    println!("{}", x);
}
"#;
    assert_eq!(count_loc(source), 4);
}

#[test]
fn test_find_rust_files_skips_target() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let src = temp_dir.path().join("crate/src");
    let target = temp_dir.path().join("target/debug");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&target).unwrap();
    fs::write(src.join("lib.rs"), "fn a() {}\n").unwrap();
    fs::write(src.join("notes.md"), "# notes\n").unwrap();
    fs::write(target.join("build.rs"), "fn b() {}\n").unwrap();

    let files = find_rust_files(temp_dir.path());
    assert_eq!(files, vec![src.join("lib.rs")]);
}
