//! Explain command implementation.
//!
//! Shows, per setting, the candidate variables, the default, the resolved value
//! and which source supplied it.

use anyhow::{Context, Result};
use std::path::Path;
use wpenv_config::constants::REDACTED;
use wpenv_config::{EnvValue, Exposure, Resolution, chain};

use crate::config_context::ConfigContext;
use crate::formatters::{ExplainEntry, OutputFormat, get_formatter, output_result};

/// Explain one setting, or every setting in table order when `setting` is `None`.
pub fn collect(
    context: &ConfigContext,
    setting: Option<&str>,
    exposure: Exposure,
) -> Result<Vec<ExplainEntry>> {
    let loader = context.loader();
    let resolutions = match setting {
        Some(name) => vec![
            loader
                .explain_setting(name)
                .with_context(|| format!("Failed to explain setting '{}'", name))?,
        ],
        None => loader.explain(),
    };

    Ok(resolutions
        .into_iter()
        .filter_map(|r| entry(r, exposure))
        .collect())
}

fn entry(resolution: Resolution, exposure: Exposure) -> Option<ExplainEntry> {
    let chain = chain::find(resolution.setting)?;
    let value = match resolution.value {
        Some(_) if exposure == Exposure::Redacted && super::is_secret_setting(chain.setting) => {
            Some(EnvValue::Str(REDACTED.to_string()))
        }
        other => other,
    };

    Some(ExplainEntry {
        setting: chain.setting,
        keys: chain.keys,
        default: chain.default.describe(),
        value,
        source: resolution.source,
    })
}

pub fn run(
    context: &ConfigContext,
    setting: Option<&str>,
    format: OutputFormat,
    reveal_secrets: bool,
    output_file: Option<&Path>,
) -> Result<()> {
    let entries = collect(context, setting, super::exposure(reveal_secrets))?;
    let formatted = get_formatter(format).format_explain(&entries)?;
    output_result(&formatted, output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wpenv_config::{ConfigError, ConfigLoader, EnvStore, Source};

    fn context(vars: &[(&str, &str)]) -> ConfigContext {
        let store = EnvStore::from_vars(vars.iter().copied());
        ConfigContext::from_loader("/srv/site", ConfigLoader::with_store(store))
    }

    #[test]
    fn test_collect_all_settings() {
        let entries = collect(&context(&[]), None, Exposure::Redacted).unwrap();
        assert_eq!(entries.len(), chain::CHAINS.len());
        assert!(entries.iter().all(|e| e.source == Source::Default));
    }

    #[test]
    fn test_collect_single_setting() {
        let context = context(&[("DB_PREFIX", "site_")]);
        let entries = collect(&context, Some("table_prefix"), Exposure::Redacted).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source, Source::Var("DB_PREFIX"));
        assert_eq!(entries[0].value, Some(EnvValue::Str("site_".into())));
        assert_eq!(entries[0].default, "\"wp_\"");
    }

    #[test]
    fn test_secret_values_are_redacted() {
        let context = context(&[("WORDPRESS_NONCE_KEY", "abc")]);
        let entries = collect(&context, Some("NONCE_KEY"), Exposure::Redacted).unwrap();
        assert_eq!(entries[0].value, Some(EnvValue::Str(REDACTED.into())));
        assert_eq!(entries[0].default, "\"put your unique phrase here\"");
        assert_eq!(entries[0].source, Source::Var("WORDPRESS_NONCE_KEY"));

        let entries = collect(&context, Some("NONCE_KEY"), Exposure::Revealed).unwrap();
        assert_eq!(entries[0].value, Some(EnvValue::Str("abc".into())));
    }

    #[test]
    fn test_unknown_setting_error() {
        let err = collect(&context(&[]), Some("DB_NAMES"), Exposure::Redacted).unwrap_err();
        let config_err = err.downcast_ref::<ConfigError>().unwrap();
        assert_eq!(
            config_err,
            &ConfigError::UnknownSetting {
                name: "DB_NAMES".into()
            }
        );
    }
}
