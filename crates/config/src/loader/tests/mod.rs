//! Tests for the configuration loader.
//!
//! Responsibilities:
//! - Test override-file loading, the ambient-wins rule and the load-once guard.
//! - Test building `SiteConfig` from fallback chains.
//! - Test snapshots of the real process environment and process mirroring.
//!
//! Does NOT handle:
//! - Line classification and coercion details (tested next to their code).
//!
//! Invariants:
//! - Tests touching the process environment use `serial_test` and `env_lock()`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
