//! Show command implementation.

use anyhow::Result;
use std::path::Path;
use tracing::info;
use wpenv_config::Exposure;

use crate::config_context::ConfigContext;
use crate::formatters::{OutputFormat, ShowOutput, get_formatter, output_result};

/// Build the show output from the loaded context.
pub fn collect(context: &ConfigContext, exposure: Exposure) -> ShowOutput {
    let loader = context.loader();
    let config = loader.build();

    ShowOutput {
        abspath: context.root().to_path_buf(),
        constants: config.constants(exposure),
        table_prefix: config.database.table_prefix.clone(),
        runtime: config.runtime.clone(),
        request: loader.request_context(),
        override_file: context.override_report().cloned(),
    }
}

pub fn run(
    context: &ConfigContext,
    format: OutputFormat,
    reveal_secrets: bool,
    output_file: Option<&Path>,
) -> Result<()> {
    let output = collect(context, super::exposure(reveal_secrets));
    info!(constants = output.constants.len(), "Resolved configuration");

    let formatted = get_formatter(format).format_show(&output)?;
    output_result(&formatted, output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wpenv_config::{ConfigLoader, EnvStore, EnvValue};

    fn context(vars: &[(&str, &str)]) -> ConfigContext {
        let store = EnvStore::from_vars(vars.iter().copied());
        ConfigContext::from_loader("/srv/site", ConfigLoader::with_store(store))
    }

    #[test]
    fn test_collect_redacts_secrets() {
        let context = context(&[("WORDPRESS_DB_PASSWORD", "hunter2")]);
        let output = collect(&context, Exposure::Redacted);

        let password = output
            .constants
            .iter()
            .find(|c| c.name == "DB_PASSWORD")
            .unwrap();
        assert_eq!(password.value, EnvValue::Str("[REDACTED]".into()));
        assert_eq!(output.abspath, Path::new("/srv/site"));
        assert!(output.override_file.is_none());
    }

    #[test]
    fn test_collect_reveals_secrets() {
        let context = context(&[("WORDPRESS_DB_PASSWORD", "hunter2")]);
        let output = collect(&context, Exposure::Revealed);

        let password = output
            .constants
            .iter()
            .find(|c| c.name == "DB_PASSWORD")
            .unwrap();
        assert_eq!(password.value, EnvValue::Str("hunter2".into()));
    }

    #[test]
    fn test_collect_applies_forwarded_headers() {
        let context = context(&[("HTTP_X_FORWARDED_PROTO", "https")]);
        let output = collect(&context, Exposure::Redacted);

        assert!(output.request.secure);
        assert_eq!(output.request.port, 443);
    }
}
