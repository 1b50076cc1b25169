//! Architecture tests for crate layering and source conventions.
//!
//! Invariants:
//! - The library crate does not depend on CLI-only crates.
//! - Only the store and mirror modules touch the process environment.
//! - Every source file opens with a module doc comment.
//! - Tests use `tempfile` instead of `std::env::temp_dir()`.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Crates that belong to the binary, never to `wpenv-config`.
const CLI_ONLY_DEPENDENCIES: &[&str] = &["clap", "anyhow", "serde_yaml", "tracing-subscriber"];

/// Library files allowed to read or write the process environment.
const PROCESS_ENV_MODULES: &[&str] = &["loader/store.rs", "loader/mirror.rs"];

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("architecture-tests lives two levels below the workspace root")
        .to_path_buf()
}

fn rust_files(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.into_path())
}

/// Lines of the `[dependencies]` table in a Cargo.toml.
fn dependency_lines(manifest: &str) -> Vec<&str> {
    manifest
        .lines()
        .skip_while(|line| line.trim() != "[dependencies]")
        .skip(1)
        .take_while(|line| !line.trim_start().starts_with('['))
        .collect()
}

#[test]
fn test_config_crate_has_no_cli_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("crates/config/Cargo.toml")).unwrap();
    let deps = dependency_lines(&manifest);
    assert!(!deps.is_empty(), "crates/config has no [dependencies] table");

    for dep in CLI_ONLY_DEPENDENCIES {
        assert!(
            !deps.iter().any(|line| line.trim_start().starts_with(dep)),
            "crates/config must not depend on {}",
            dep
        );
    }
}

#[test]
fn test_process_environment_access_is_confined() {
    let src = workspace_root().join("crates/config/src");
    let mut violations = Vec::new();

    for path in rust_files(&src) {
        let relative = path.strip_prefix(&src).unwrap().to_string_lossy().to_string();
        if relative.starts_with("loader/tests/") || PROCESS_ENV_MODULES.contains(&relative.as_str())
        {
            continue;
        }
        let content = fs::read_to_string(&path).unwrap();
        let non_test = content.split("#[cfg(test)]").next().unwrap_or_default();
        if ["env::var", "env::set_var", "env::remove_var", "env::vars"]
            .iter()
            .any(|pattern| non_test.contains(pattern))
        {
            violations.push(relative);
        }
    }

    assert!(
        violations.is_empty(),
        "Process environment accessed outside the store: {:?}",
        violations
    );
}

#[test]
fn test_source_files_have_module_docs() {
    let root = workspace_root();
    let mut missing = Vec::new();

    for krate in ["crates/config/src", "crates/cli/src"] {
        for path in rust_files(&root.join(krate)) {
            let content = fs::read_to_string(&path).unwrap();
            if !content.trim_start().starts_with("//!") {
                missing.push(path.strip_prefix(&root).unwrap().display().to_string());
            }
        }
    }

    assert!(missing.is_empty(), "Missing module docs: {:?}", missing);
}

#[test]
fn test_tests_use_tempfile() {
    let mut violations = Vec::new();

    for path in rust_files(&workspace_root().join("crates")) {
        if path.ends_with("layering_tests.rs") {
            continue;
        }
        let content = fs::read_to_string(&path).unwrap();
        if content.contains("std::env::temp_dir()") {
            violations.push(path.display().to_string());
        }
    }

    assert!(
        violations.is_empty(),
        "Use tempfile::TempDir instead of std::env::temp_dir(): {:?}",
        violations
    );
}

#[test]
fn test_dependency_lines_stop_at_next_table() {
    let manifest = "[package]\nname = \"x\"\n\n[dependencies]\nserde = \"1\"\n\n[dev-dependencies]\nclap = \"4\"\n";
    let deps = dependency_lines(manifest);
    assert!(deps.iter().any(|l| l.starts_with("serde")));
    assert!(!deps.iter().any(|l| l.starts_with("clap")));
}
