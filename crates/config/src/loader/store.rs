//! Process-scoped environment store.
//!
//! Responsibilities:
//! - Snapshot the ambient environment into an explicit `EnvStore`.
//! - Merge the optional override file exactly once per store.
//! - Answer raw and coerced lookups.
//!
//! Does NOT handle:
//! - Fallback chains or the settings table (see `chain.rs`).
//! - Building the configuration object (see `builder.rs`).
//!
//! Invariants / Assumptions:
//! - Ambient variables always win over override-file entries.
//! - The override file is merged at most once; later calls return the first report.
//! - After loading, the store is only read.
//! - Defaults passed to `lookup_or` are returned as-is, never coerced.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use super::mirror;
use super::override_file::{OverrideReport, OverrideStatus, merge_file};
use crate::types::EnvValue;

static GLOBAL: OnceLock<EnvStore> = OnceLock::new();

/// Snapshot of the environment plus any override-file entries.
#[derive(Debug, Default)]
pub struct EnvStore {
    vars: HashMap<String, String>,
    mirror_to_process: bool,
    overrides: OnceLock<OverrideReport>,
}

impl EnvStore {
    /// Snapshot the current process environment.
    ///
    /// Names or values that are not valid UTF-8 are kept in lossy form so the
    /// name still shadows any override-file entry.
    pub fn from_process() -> Self {
        let mut vars = HashMap::new();
        for (name, value) in std::env::vars_os() {
            let name = match name.into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::debug!("Keeping non-UTF-8 environment variable name in lossy form");
                    raw.to_string_lossy().into_owned()
                }
            };
            let value = match value.into_string() {
                Ok(value) => value,
                Err(raw) => {
                    tracing::debug!(name = %name, "Keeping non-UTF-8 environment value in lossy form");
                    raw.to_string_lossy().into_owned()
                }
            };
            vars.entry(name).or_insert(value);
        }
        Self::from_map(vars)
    }

    /// Build a store from explicit key-value pairs.
    pub fn from_vars(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self::from_map(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    fn from_map(vars: HashMap<String, String>) -> Self {
        Self {
            vars,
            mirror_to_process: false,
            overrides: OnceLock::new(),
        }
    }

    /// The process-wide store, created on first use.
    ///
    /// The first caller's `override_path` is loaded and mirrored into the
    /// process environment; later callers receive the same store and their
    /// path is ignored.
    pub fn global(override_path: impl AsRef<Path>) -> &'static EnvStore {
        GLOBAL.get_or_init(|| {
            let mut store = Self::from_process().with_process_mirror(true);
            store.load_override_file(override_path.as_ref());
            store
        })
    }

    /// Also write applied override entries into the real process environment.
    pub fn with_process_mirror(mut self, enabled: bool) -> Self {
        self.mirror_to_process = enabled;
        self
    }

    /// Merge the override file at `path` into the store.
    ///
    /// A missing or unreadable file leaves the store unchanged. Only the first
    /// call has any effect; subsequent calls return the original report.
    pub fn load_override_file(&mut self, path: impl AsRef<Path>) -> OverrideReport {
        let path = path.as_ref();
        let Self {
            vars,
            mirror_to_process,
            overrides,
        } = self;

        if let Some(existing) = overrides.get() {
            tracing::debug!(
                path = %path.display(),
                "Override file already loaded for this store; ignoring"
            );
            return existing.clone();
        }

        overrides
            .get_or_init(|| {
                let (report, applied) = merge_file(path, vars);
                if *mirror_to_process && !applied.is_empty() {
                    mirror::publish(&applied);
                }
                report
            })
            .clone()
    }

    /// Record that the override file at `path` is deliberately not read.
    ///
    /// Consumes the load-once guard like a real load, so a later
    /// `load_override_file` call returns this `Disabled` report.
    pub fn skip_override_file(&mut self, path: impl AsRef<Path>) -> OverrideReport {
        let path = path.as_ref();
        self.overrides
            .get_or_init(|| {
                tracing::debug!(path = %path.display(), "Override file disabled by caller");
                OverrideReport::skipped(path, OverrideStatus::Disabled)
            })
            .clone()
    }

    /// Report from the override file, if one was consulted.
    pub fn override_report(&self) -> Option<&OverrideReport> {
        self.overrides.get()
    }

    /// Whether `key` is set, even to an empty string.
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// The raw, uncoerced value of `key`.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Look up `key` and decode it through the coercion vocabulary.
    ///
    /// Returns `None` if the variable is unset.
    pub fn lookup(&self, key: &str) -> Option<EnvValue> {
        self.raw(key).map(EnvValue::coerce)
    }

    /// Look up `key`, returning `default` unchanged when it is unset.
    pub fn lookup_or(&self, key: &str, default: impl Into<EnvValue>) -> EnvValue {
        self.lookup(key).unwrap_or_else(|| default.into())
    }

    /// Number of variables in the store.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
