//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide multiple output formats: Table, JSON, YAML, env lines and PHP.
//! - Define the serializable output structures shared by every format.
//!
//! Does NOT handle:
//! - Resolving configuration (see `commands` and `crates/config`).
//! - Direct printing to stdout (returns formatted strings; see `common::output_result`).
//!
//! Invariants:
//! - Machine-readable formats (JSON, YAML) emit the same structure.
//! - Formats that cannot represent an output bail with a hint to use JSON.
//!
//! ## Missing/Null Value Handling
//!
//! | Format | Undefined setting | Null value |
//! |--------|-------------------|------------|
//! | JSON / YAML | `null` | `null` |
//! | Table | `(undefined)` | `null` |
//! | Env | line omitted | `null` |
//! | PHP | constant not defined | `null` |

use anyhow::Result;
use serde::{Serialize, Serializer};
use std::path::PathBuf;
use std::str::FromStr;
use wpenv_config::types::RuntimeDirectives;
use wpenv_config::{Constant, EnvValue, OverrideReport, RequestContext, Source};

mod common;
mod env;
mod json;
mod php;
mod table;
mod yaml;

pub use common::output_result;
pub use env::EnvFormatter;
pub use json::JsonFormatter;
pub use php::PhpFormatter;
pub use table::TableFormatter;
pub use yaml::YamlFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
    Env,
    Php,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "env" | "dotenv" => Ok(OutputFormat::Env),
            "php" => Ok(OutputFormat::Php),
            _ => anyhow::bail!(
                "Invalid output format: {}. Valid options: table, json, yaml, env, php",
                s
            ),
        }
    }
}

/// Resolved configuration as printed by `show` and `render`.
#[derive(Debug, Clone, Serialize)]
pub struct ShowOutput {
    /// Site root the override file was looked up in.
    pub abspath: PathBuf,
    #[serde(serialize_with = "serialize_constants")]
    pub constants: Vec<Constant>,
    pub table_prefix: EnvValue,
    pub runtime: RuntimeDirectives,
    pub request: RequestContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_file: Option<OverrideReport>,
}

/// Serialize constants as an ordered name → value map.
fn serialize_constants<S>(constants: &[Constant], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(constants.iter().map(|c| (c.name, &c.value)))
}

/// One setting's provenance as printed by `explain`.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainEntry {
    pub setting: &'static str,
    /// Candidate variables, highest precedence first.
    pub keys: &'static [&'static str],
    pub default: String,
    pub value: Option<EnvValue>,
    pub source: Source,
}

/// Override-file outcome and insecure-default findings printed by `check`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutput {
    pub override_file: Option<OverrideReport>,
    pub environment: EnvValue,
    pub placeholder_secrets: Vec<&'static str>,
    pub default_db_password: bool,
}

impl CheckOutput {
    /// Whether no insecure default was found.
    pub fn passed(&self) -> bool {
        self.placeholder_secrets.is_empty() && !self.default_db_password
    }
}

/// Trait for formatting command output in different formats.
pub trait Formatter {
    /// Format the resolved configuration.
    fn format_show(&self, output: &ShowOutput) -> Result<String>;

    /// Format setting provenance.
    fn format_explain(&self, entries: &[ExplainEntry]) -> Result<String>;

    /// Format the check report.
    fn format_check(&self, output: &CheckOutput) -> Result<String>;
}

/// Get a formatter for the specified format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Yaml => Box::new(YamlFormatter),
        OutputFormat::Env => Box::new(EnvFormatter),
        OutputFormat::Php => Box::new(PhpFormatter),
    }
}
