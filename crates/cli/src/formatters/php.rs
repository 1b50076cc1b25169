//! PHP formatter implementation.
//!
//! Responsibilities:
//! - Render the resolved configuration as a bootstrap fragment: an `ABSPATH`
//!   guard, one `define()` per constant, the `$table_prefix` assignment, the
//!   runtime `ini_set` calls and the final `wp-settings.php` include.
//!
//! Does NOT handle:
//! - Explain output or check reports (no PHP representation).
//!
//! Invariants:
//! - String literals are single-quoted with `\` and `'` escaped.
//! - Conditionally defined constants appear only when present in the output.

use anyhow::Result;
use wpenv_config::EnvValue;
use wpenv_config::types::{RuntimeDirectives, format_octal};

use crate::formatters::{CheckOutput, ExplainEntry, Formatter, ShowOutput};

/// PHP bootstrap formatter.
pub struct PhpFormatter;

impl Formatter for PhpFormatter {
    fn format_show(&self, output: &ShowOutput) -> Result<String> {
        let mut out = String::from("<?php\n");
        out.push_str("// Generated by wpenv. Values resolved from the environment and .env.\n\n");
        out.push_str("if (!defined('ABSPATH')) {\n    define('ABSPATH', __DIR__ . '/');\n}\n\n");

        for constant in &output.constants {
            out.push_str(&format!(
                "define({}, {});\n",
                php_string(constant.name),
                php_literal(&constant.value)
            ));
        }

        out.push_str(&format!(
            "\n$table_prefix = {};\n\n",
            php_literal(&output.table_prefix)
        ));

        push_runtime(&mut out, &output.runtime);

        out.push_str("\nrequire_once ABSPATH . 'wp-settings.php';\n");
        Ok(out)
    }

    fn format_explain(&self, _entries: &[ExplainEntry]) -> Result<String> {
        anyhow::bail!("Failed to format explain output: PHP format not supported. Use JSON format.")
    }

    fn format_check(&self, _output: &CheckOutput) -> Result<String> {
        anyhow::bail!("Failed to format check report: PHP format not supported. Use JSON format.")
    }
}

fn push_runtime(out: &mut String, runtime: &RuntimeDirectives) {
    out.push_str(&format!(
        "@ini_set('upload_max_filesize', {});\n",
        php_literal(&runtime.upload_max_filesize)
    ));
    out.push_str(&format!(
        "@ini_set('post_max_size', {});\n",
        php_literal(&runtime.post_max_size)
    ));
    if runtime.log_errors {
        out.push_str("ini_set('log_errors', 1);\n");
    }
    if let Some(path) = &runtime.error_log {
        out.push_str(&format!("ini_set('error_log', {});\n", php_string(path)));
    }
    if let Some(tz) = &runtime.timezone {
        out.push_str(&format!("date_default_timezone_set({});\n", php_string(tz)));
    }
    out.push_str(&format!(
        "@ini_set('default_fileperms', {});\n",
        format_octal(runtime.file_perms)
    ));
    out.push_str(&format!(
        "@ini_set('default_dirperms', {});\n",
        format_octal(runtime.dir_perms)
    ));
}

/// Single-quoted PHP string literal.
fn php_string(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// PHP literal for a resolved value.
fn php_literal(value: &EnvValue) -> String {
    match value {
        EnvValue::Str(s) => php_string(s),
        EnvValue::Bool(b) => b.to_string(),
        EnvValue::Int(n) => n.to_string(),
        EnvValue::Empty => "''".to_string(),
        EnvValue::Null => "null".to_string(),
    }
}
