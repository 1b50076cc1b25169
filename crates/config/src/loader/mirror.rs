//! Publishing override entries to the real process environment.
//!
//! Responsibilities:
//! - Copy applied override-file entries into `std::env` so child processes see them.
//!
//! Invariants:
//! - Publishing happens at most once per process, regardless of how many stores ask.
//! - Names already present in the process environment are never replaced.
//! - Must run during startup, before other threads read the environment.

use std::sync::Once;

static PUBLISH: Once = Once::new();

/// Publish `entries` into the process environment.
///
/// Returns the number of variables written; zero if another store already
/// published during this process.
pub(crate) fn publish(entries: &[(String, String)]) -> usize {
    let mut written = 0;
    PUBLISH.call_once(|| {
        for (name, value) in entries {
            if value.contains('\0') {
                tracing::debug!(name = %name, "Skipping value with interior NUL");
                continue;
            }
            if std::env::var_os(name).is_some() {
                continue;
            }
            // SAFETY: called once during single-threaded startup, before any
            // lookup or spawned thread reads the environment.
            unsafe {
                std::env::set_var(name, value);
            }
            written += 1;
        }
    });

    if written > 0 {
        tracing::debug!(count = written, "Published override entries to process environment");
    }
    written
}
