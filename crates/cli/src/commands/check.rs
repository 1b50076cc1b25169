//! Check command implementation.
//!
//! Reports how the override file was consulted and flags insecure defaults.
//! Findings are reported through the exit code, not as an error.

use anyhow::Result;
use std::path::Path;
use tracing::warn;

use crate::config_context::ConfigContext;
use crate::error::ExitCode;
use crate::formatters::{CheckOutput, OutputFormat, get_formatter, output_result};

pub fn collect(context: &ConfigContext) -> CheckOutput {
    let config = context.loader().build();
    CheckOutput {
        override_file: context.override_report().cloned(),
        environment: config.environment.clone(),
        placeholder_secrets: config.placeholder_secrets(),
        default_db_password: config.uses_default_db_password(),
    }
}

pub fn run(
    context: &ConfigContext,
    format: OutputFormat,
    output_file: Option<&Path>,
) -> Result<ExitCode> {
    let output = collect(context);

    if !output.placeholder_secrets.is_empty() {
        warn!(
            count = output.placeholder_secrets.len(),
            "Keys or salts still use the placeholder phrase"
        );
    }
    if output.default_db_password {
        warn!("Database password is the built-in default");
    }

    let formatted = get_formatter(format).format_check(&output)?;
    output_result(&formatted, output_file)?;

    Ok(if output.passed() {
        ExitCode::Success
    } else {
        ExitCode::InsecureDefaults
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wpenv_config::{ConfigLoader, EnvStore};

    fn context(vars: &[(&str, &str)]) -> ConfigContext {
        let store = EnvStore::from_vars(vars.iter().copied());
        ConfigContext::from_loader("/srv/site", ConfigLoader::with_store(store))
    }

    #[test]
    fn test_defaults_are_flagged() {
        let output = collect(&context(&[]));
        assert_eq!(output.placeholder_secrets.len(), 8);
        assert!(output.default_db_password);
        assert!(!output.passed());
    }

    #[test]
    fn test_configured_site_passes() {
        let vars = [
            ("WORDPRESS_DB_PASSWORD", "s3cret"),
            ("AUTH_KEY", "a"),
            ("SECURE_AUTH_KEY", "b"),
            ("LOGGED_IN_KEY", "c"),
            ("NONCE_KEY", "d"),
            ("AUTH_SALT", "e"),
            ("SECURE_AUTH_SALT", "f"),
            ("LOGGED_IN_SALT", "g"),
            ("NONCE_SALT", "h"),
        ];
        let output = collect(&context(&vars));
        assert!(output.placeholder_secrets.is_empty());
        assert!(!output.default_db_password);
        assert!(output.passed());
    }
}
