//! Configuration type definitions for wpenv.
//!
//! Responsibilities:
//! - Define resolved values (`EnvValue`) and the coercion vocabulary.
//! - Define the site configuration object and its groups.
//! - Define runtime directives and the request context.
//!
//! Does NOT handle:
//! - Reading the environment or the override file (see `loader` module).
//! - Rendering configuration for the platform (see the CLI formatters).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.
//! - Types are plain data; once built they are never mutated by this crate.

mod request;
mod runtime;
mod site;
mod value;

pub use request::{ForwardedHeaders, RequestContext};
pub use runtime::{RuntimeDirectives, format_octal, parse_octal};
pub use site::{
    Constant, ContentConfig, DatabaseConfig, DebugConfig, Exposure, PerformanceConfig,
    PolicyConfig, SecurityKeys, SiteConfig, UrlConfig,
};
pub use value::EnvValue;
