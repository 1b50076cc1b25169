//! Env formatter implementation.
//!
//! Responsibilities:
//! - Format resolved settings as `KEY=value` lines readable by the override-file parser.
//! - Name each line after the setting's highest-precedence variable, so the
//!   output can be dropped in as a `.env` file.
//!
//! Does NOT handle:
//! - Runtime directives, request context or check reports (no line format for them).
//!
//! Invariants:
//! - Reloading the output resolves every written setting to the same value;
//!   integer defaults come back as their decimal string.
//! - Values the parser cannot reproduce (line breaks, NUL, or a trimmed
//!   character at either edge) are an error, never a corrupted line.
//! - Undefined settings produce no line.

use anyhow::{Result, bail};
use wpenv_config::constants::VALUE_TRIM_CHARS;
use wpenv_config::{EnvValue, chain};

use crate::formatters::{CheckOutput, ExplainEntry, Formatter, ShowOutput};

/// Env-file formatter.
pub struct EnvFormatter;

impl Formatter for EnvFormatter {
    fn format_show(&self, output: &ShowOutput) -> Result<String> {
        let mut out = String::new();
        for constant in &output.constants {
            let key = chain::find(constant.name)
                .and_then(|c| c.keys.first().copied())
                .unwrap_or(constant.name);
            push_line(&mut out, key, &constant.value)?;
        }
        let prefix_key = chain::TABLE_PREFIX.keys[0];
        push_line(&mut out, prefix_key, &output.table_prefix)?;
        Ok(out)
    }

    fn format_explain(&self, entries: &[ExplainEntry]) -> Result<String> {
        let mut out = String::new();
        for entry in entries {
            if let Some(value) = &entry.value {
                let key = entry.keys.first().copied().unwrap_or(entry.setting);
                push_line(&mut out, key, value)?;
            }
        }
        Ok(out)
    }

    fn format_check(&self, _output: &CheckOutput) -> Result<String> {
        bail!("Failed to format check report: env format not supported. Use JSON format.")
    }
}

fn push_line(out: &mut String, key: &str, value: &EnvValue) -> Result<()> {
    out.push_str(key);
    out.push('=');
    out.push_str(&env_literal(key, value)?);
    out.push('\n');
    Ok(())
}

/// Render a value as it would appear on the right of `=` in an override file.
fn env_literal(key: &str, value: &EnvValue) -> Result<String> {
    let literal = match value {
        EnvValue::Str(s) => {
            if s.contains(['\n', '\r', '\0']) {
                bail!(
                    "Failed to format {}: value contains a line break or NUL. Use JSON format.",
                    key
                );
            }
            if s.starts_with(VALUE_TRIM_CHARS) || s.ends_with(VALUE_TRIM_CHARS) {
                bail!(
                    "Failed to format {}: value starts or ends with a quote or whitespace. Use JSON format.",
                    key
                );
            }
            if s.chars().any(char::is_whitespace) {
                format!("\"{}\"", s)
            } else {
                s.clone()
            }
        }
        EnvValue::Bool(b) => b.to_string(),
        EnvValue::Int(n) => n.to_string(),
        EnvValue::Empty => "empty".to_string(),
        EnvValue::Null => "null".to_string(),
    };
    Ok(literal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::test_fixtures;
    use wpenv_config::OverrideLine;

    fn literal(value: EnvValue) -> String {
        env_literal("KEY", &value).unwrap()
    }

    #[test]
    fn test_env_literal() {
        assert_eq!(literal(EnvValue::Str("wp_".into())), "wp_");
        assert_eq!(
            literal(EnvValue::Str("put your unique phrase here".into())),
            "\"put your unique phrase here\""
        );
        assert_eq!(literal(EnvValue::Str(String::new())), "");
        assert_eq!(literal(EnvValue::Bool(false)), "false");
        assert_eq!(literal(EnvValue::Int(30)), "30");
        assert_eq!(literal(EnvValue::Empty), "empty");
        assert_eq!(literal(EnvValue::Null), "null");
    }

    #[test]
    fn test_show_lines_use_first_chain_key() {
        let output = test_fixtures::show_output(&[("WORDPRESS_DB_NAME", "site")]);
        let env = EnvFormatter.format_show(&output).unwrap();

        assert!(env.lines().any(|l| l == "WORDPRESS_DB_NAME=site"));
        assert!(env.lines().any(|l| l == "WP_DEBUG=false"));
        assert!(env.lines().any(|l| l == "DB_COLLATE="));
        assert!(env.lines().any(|l| l == "ENVIRONMENT=production"));
        assert!(env.lines().any(|l| l == "WORDPRESS_TABLE_PREFIX=wp_"));
        assert!(!env.lines().any(|l| l.starts_with("DB_NAME=")));
        assert!(!env.contains("WP_CONTENT_DIR"));
    }

    #[test]
    fn test_show_output_reloads_to_same_values() {
        let output = test_fixtures::show_output(&[
            ("MYSQL_DATABASE", "shop"),
            ("WP_HOME", "https://shop.example"),
            ("WORDPRESS_AUTH_KEY", "k3y with spaces"),
            ("WP_CACHE", "true"),
            ("DB_COLLATE", "empty"),
        ]);
        let env = EnvFormatter.format_show(&output).unwrap();

        let reloaded: Vec<(&str, &str)> = env
            .lines()
            .filter_map(|line| match OverrideLine::parse(line) {
                OverrideLine::Assignment { name, value } => Some((name, value)),
                _ => None,
            })
            .collect();
        let again = test_fixtures::show_output(&reloaded);

        assert_eq!(again.constants.len(), output.constants.len());
        for (before, after) in output.constants.iter().zip(&again.constants) {
            assert_eq!(before.name, after.name);
            let expected = match &before.value {
                EnvValue::Int(n) => EnvValue::Str(n.to_string()),
                other => other.clone(),
            };
            assert_eq!(after.value, expected, "{} changed on reload", before.name);
        }
        assert_eq!(again.table_prefix, output.table_prefix);
    }

    #[test]
    fn test_line_break_in_value_is_rejected() {
        let output =
            test_fixtures::show_output(&[("WP_HOME", "http://x\nDB_PASSWORD=injected")]);
        let err = EnvFormatter.format_show(&output).unwrap_err();
        assert!(err.to_string().contains("WP_HOME"));
        assert!(err.to_string().contains("line break"));
    }

    #[test]
    fn test_trimmed_edge_characters_are_rejected() {
        for value in ["de\"", "'de", " de", "de\u{201D}"] {
            let output = test_fixtures::show_output(&[("WPLANG", value)]);
            let err = EnvFormatter.format_show(&output).unwrap_err();
            assert!(err.to_string().contains("WPLANG"), "{value:?} was accepted");
        }
    }

    #[test]
    fn test_explain_skips_undefined() {
        let entries = test_fixtures::explain_entries(&[]);
        let env = EnvFormatter.format_explain(&entries).unwrap();

        assert!(env.lines().any(|l| l == "WORDPRESS_DB_HOST=mysql:3306"));
        assert!(!env.contains("COOKIE_DOMAIN"));
    }

    #[test]
    fn test_check_not_supported() {
        let output = test_fixtures::check_output(vec![], false);
        let err = EnvFormatter.format_check(&output).unwrap_err();
        assert!(err.to_string().contains("Use JSON format"));
    }
}
