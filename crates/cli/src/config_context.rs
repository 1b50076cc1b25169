//! Configuration context shared by every command.
//!
//! Responsibilities:
//! - Resolve the site root and the override file path from CLI arguments.
//! - Load the override file exactly once into a `ConfigLoader`, or record it as
//!   disabled when `--no-env-file` is given.
//! - Mirror applied override entries into the process environment.
//!
//! Does NOT handle:
//! - Building or formatting the configuration (see `commands`).
//!
//! Invariants:
//! - An explicit `--env-file` wins over `<root>/.env`.
//! - A missing or unreadable override file is not an error; the report records it.
//! - `load` runs before any other thread exists, which the process mirror requires.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use wpenv_config::{ConfigLoader, OverrideReport};

/// The site root plus a loader with its override file already merged.
#[derive(Debug)]
pub struct ConfigContext {
    root: PathBuf,
    loader: ConfigLoader,
}

impl ConfigContext {
    /// Snapshot the process environment and merge the override file.
    ///
    /// `root` defaults to the current directory. Applied entries are also
    /// published to the process environment.
    pub fn load(
        root: Option<PathBuf>,
        env_file: Option<PathBuf>,
        skip_env_file: bool,
    ) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };
        let path = env_file.unwrap_or_else(|| ConfigLoader::override_path(&root));

        let loader = ConfigLoader::new().with_process_mirror(true);
        let loader = if skip_env_file {
            loader.skip_override_file(&path)
        } else {
            loader.load_override_file(&path)
        };
        tracing::debug!(
            path = %path.display(),
            skipped = skip_env_file,
            "Override file consulted"
        );

        Ok(Self { root, loader })
    }

    /// Build a context over an existing loader.
    #[cfg(test)]
    pub fn from_loader(root: impl Into<PathBuf>, loader: ConfigLoader) -> Self {
        Self {
            root: root.into(),
            loader,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn loader(&self) -> &ConfigLoader {
        &self.loader
    }

    pub fn override_report(&self) -> Option<&OverrideReport> {
        self.loader.override_report()
    }
}
