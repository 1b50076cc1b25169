//! Render command implementation.
//!
//! Produces the PHP bootstrap fragment with real secret values; redacted
//! placeholders would break the site it is written for.

use anyhow::Result;
use std::path::Path;
use tracing::info;
use wpenv_config::Exposure;

use crate::config_context::ConfigContext;
use crate::formatters::{Formatter, PhpFormatter, output_result};

pub fn run(context: &ConfigContext, output_file: Option<&Path>) -> Result<()> {
    let output = super::show::collect(context, Exposure::Revealed);
    info!(constants = output.constants.len(), "Rendering PHP bootstrap");

    let formatted = PhpFormatter.format_show(&output)?;
    output_result(&formatted, output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use wpenv_config::{ConfigLoader, EnvStore};

    #[test]
    fn test_render_writes_revealed_fragment() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wp-config.php");
        let store = EnvStore::from_vars([("WORDPRESS_AUTH_KEY", "k3y")]);
        let context = ConfigContext::from_loader(temp_dir.path(), ConfigLoader::with_store(store));

        run(&context, Some(&path)).unwrap();

        let php = fs::read_to_string(&path).unwrap();
        assert!(php.contains("define('AUTH_KEY', 'k3y');"));
        assert!(php.contains("define('DB_PASSWORD', 'password');"));
        assert!(!php.contains("[REDACTED]"));
    }
}
