//! Environment-driven configuration for a WordPress-style site bootstrap.
//!
//! This crate resolves the platform's configuration constants from environment
//! variables and an optional `.env` override file, applying per-setting
//! fallback chains and a small coercion vocabulary.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{
    ChainDefault, ChainResolver, ConfigError, ConfigLoader, EnvStore, FallbackChain, OverrideLine,
    OverrideReport, OverrideStatus, Resolution, Source, chain,
};
pub use types::{Constant, EnvValue, Exposure, ForwardedHeaders, RequestContext, SiteConfig};
