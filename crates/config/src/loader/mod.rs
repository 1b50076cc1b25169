//! Environment resolution for the site bootstrap.
//!
//! Responsibilities:
//! - Snapshot the ambient environment and merge the optional `.env` override file.
//! - Resolve every setting through its fallback chain.
//! - Provide a builder-pattern `ConfigLoader` that produces the `SiteConfig`.
//!
//! Does NOT handle:
//! - Rendering the configuration for the platform (see the CLI).
//!
//! Invariants / Assumptions:
//! - Ambient environment variables take precedence over override-file entries.
//! - The override file is merged once, before the first lookup.
//! - Loading the override file is not gated by any ambient variable; callers
//!   opt out with `skip_override_file`.

mod builder;
pub mod chain;
mod error;
mod mirror;
mod override_file;
mod store;

pub use builder::ConfigLoader;
pub use chain::{ChainDefault, ChainResolver, FallbackChain, Resolution, Source};
pub use error::ConfigError;
pub use override_file::{OverrideLine, OverrideReport, OverrideStatus};
pub use store::EnvStore;

#[cfg(test)]
mod tests;
