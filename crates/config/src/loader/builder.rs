//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` around an `EnvStore`.
//! - Load the override file once, then build `SiteConfig`, runtime directives and
//!   the normalized request context from the fallback-chain table.
//! - Explain where each setting came from.
//!
//! Does NOT handle:
//! - Override-file parsing (delegated to override_file.rs).
//! - The precedence table itself (delegated to chain.rs).
//!
//! Invariants / Assumptions:
//! - `load_override_file()` runs before any lookup; the store is read-only afterwards.
//! - Ambient variables take precedence over override-file entries.
//! - Building never fails: absent values fall back to their defaults.

use secrecy::SecretString;
use std::path::{Path, PathBuf};

use super::chain::{self, ChainResolver, FallbackChain, Resolution};
use super::error::ConfigError;
use super::override_file::OverrideReport;
use super::store::EnvStore;
use crate::constants::{
    DEFAULT_DEBUG_LOG_PATH, DEFAULT_DIR_PERMS, DEFAULT_FILE_PERMS, OVERRIDE_FILE_NAME,
};
use crate::types::{
    ContentConfig, DatabaseConfig, DebugConfig, EnvValue, PerformanceConfig, PolicyConfig,
    RequestContext, RuntimeDirectives, SecurityKeys, SiteConfig, UrlConfig, parse_octal,
};

/// Configuration loader that builds the site configuration from the environment.
#[derive(Debug)]
pub struct ConfigLoader {
    store: EnvStore,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader over a snapshot of the current process environment.
    pub fn new() -> Self {
        Self::with_store(EnvStore::from_process())
    }

    /// Create a loader over an explicit store.
    pub fn with_store(store: EnvStore) -> Self {
        Self { store }
    }

    /// Also publish applied override entries to the process environment.
    pub fn with_process_mirror(mut self, enabled: bool) -> Self {
        self.store = self.store.with_process_mirror(enabled);
        self
    }

    /// Path of the override file for a site rooted at `root`.
    pub fn override_path(root: &Path) -> PathBuf {
        root.join(OVERRIDE_FILE_NAME)
    }

    /// Merge the override file at `path`.
    ///
    /// Missing or unreadable files are ignored; see `override_report()` for the outcome.
    pub fn load_override_file(mut self, path: impl AsRef<Path>) -> Self {
        self.store.load_override_file(path);
        self
    }

    /// Record the override file at `path` as disabled without reading it.
    pub fn skip_override_file(mut self, path: impl AsRef<Path>) -> Self {
        self.store.skip_override_file(path);
        self
    }

    /// Merge `<root>/.env`.
    pub fn load_dotenv(self, root: impl AsRef<Path>) -> Self {
        let path = Self::override_path(root.as_ref());
        self.load_override_file(path)
    }

    pub fn store(&self) -> &EnvStore {
        &self.store
    }

    pub fn override_report(&self) -> Option<&OverrideReport> {
        self.store.override_report()
    }

    pub fn into_store(self) -> EnvStore {
        self.store
    }

    /// Resolve every setting in table order, with provenance.
    pub fn explain(&self) -> Vec<Resolution> {
        ChainResolver::new(&self.store).resolve_all()
    }

    /// Resolve a single setting by name, with provenance.
    pub fn explain_setting(&self, setting: &str) -> Result<Resolution, ConfigError> {
        let chain = chain::find(setting).ok_or_else(|| ConfigError::UnknownSetting {
            name: setting.to_string(),
        })?;
        Ok(ChainResolver::new(&self.store).resolve(chain))
    }

    /// The request context after reverse-proxy normalization.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::normalized(&self.store)
    }

    /// Build the site configuration object.
    pub fn build(&self) -> SiteConfig {
        let mut r = ChainResolver::new(&self.store);

        let database = DatabaseConfig {
            name: r.value_or_null(&chain::DB_NAME),
            user: r.value_or_null(&chain::DB_USER),
            password: secret(&mut r, &chain::DB_PASSWORD),
            host: r.value_or_null(&chain::DB_HOST),
            charset: r.value_or_null(&chain::DB_CHARSET),
            collate: r.value_or_null(&chain::DB_COLLATE),
            table_prefix: r.value_or_null(&chain::TABLE_PREFIX),
        };

        let urls = UrlConfig {
            home: r.value_or_null(&chain::WP_HOME),
            site_url: r.value_or_null(&chain::WP_SITEURL),
            force_ssl_admin: truthy(&mut r, &chain::FORCE_SSL_ADMIN),
        };

        let keys = SecurityKeys {
            auth_key: secret(&mut r, &chain::AUTH_KEY),
            secure_auth_key: secret(&mut r, &chain::SECURE_AUTH_KEY),
            logged_in_key: secret(&mut r, &chain::LOGGED_IN_KEY),
            nonce_key: secret(&mut r, &chain::NONCE_KEY),
            auth_salt: secret(&mut r, &chain::AUTH_SALT),
            secure_auth_salt: secret(&mut r, &chain::SECURE_AUTH_SALT),
            logged_in_salt: secret(&mut r, &chain::LOGGED_IN_SALT),
            nonce_salt: secret(&mut r, &chain::NONCE_SALT),
        };

        let debug = DebugConfig {
            debug: r.value_or_null(&chain::WP_DEBUG),
            debug_log: r.value_or_null(&chain::WP_DEBUG_LOG),
            debug_display: r.value_or_null(&chain::WP_DEBUG_DISPLAY),
            script_debug: r.value_or_null(&chain::SCRIPT_DEBUG),
        };
        let environment = r.value_or_null(&chain::WP_ENV);

        let content = ContentConfig {
            content_dir: defined_if_truthy(&mut r, &chain::WP_CONTENT_DIR),
            content_url: defined_if_truthy(&mut r, &chain::WP_CONTENT_URL),
            uploads: defined_if_truthy(&mut r, &chain::UPLOADS),
            memory_limit: r.value_or_null(&chain::WP_MEMORY_LIMIT),
            max_memory_limit: r.value_or_null(&chain::WP_MAX_MEMORY_LIMIT),
        };

        let policy = PolicyConfig {
            disallow_file_edit: r.value_or_null(&chain::DISALLOW_FILE_EDIT),
            disallow_file_mods: r.value_or_null(&chain::DISALLOW_FILE_MODS),
            automatic_updater_disabled: r.value_or_null(&chain::AUTOMATIC_UPDATER_DISABLED),
            auto_update_core: r.value_or_null(&chain::WP_AUTO_UPDATE_CORE),
            disable_cron: r.value_or_null(&chain::DISABLE_WP_CRON),
            post_revisions: r.value_or_null(&chain::WP_POST_REVISIONS),
            media_trash: r.value_or_null(&chain::MEDIA_TRASH),
            empty_trash_days: r.value_or_null(&chain::EMPTY_TRASH_DAYS),
            cookie_domain: defined_if_truthy(&mut r, &chain::COOKIE_DOMAIN),
            allow_repair: truthy(&mut r, &chain::WP_ALLOW_REPAIR),
            allow_unfiltered_uploads: r.value_or_null(&chain::ALLOW_UNFILTERED_UPLOADS),
            image_edit_overwrite: r.value_or_null(&chain::IMAGE_EDIT_OVERWRITE),
        };

        let performance = PerformanceConfig {
            compress_css: r.value_or_null(&chain::COMPRESS_CSS),
            compress_scripts: r.value_or_null(&chain::COMPRESS_SCRIPTS),
            concatenate_scripts: r.value_or_null(&chain::CONCATENATE_SCRIPTS),
            enforce_gzip: r.value_or_null(&chain::ENFORCE_GZIP),
            cache: r.value_or_null(&chain::WP_CACHE),
        };
        let locale = r.value_or_null(&chain::WPLANG);

        let runtime = runtime_directives(&mut r, &debug);

        tracing::debug!(
            settings = chain::CHAINS.len(),
            override_loaded = self.override_report().is_some_and(OverrideReport::is_loaded),
            "Built site configuration"
        );

        SiteConfig {
            database,
            urls,
            keys,
            debug,
            environment,
            content,
            policy,
            performance,
            locale,
            runtime,
        }
    }
}

fn secret(r: &mut ChainResolver<'_>, chain: &FallbackChain) -> SecretString {
    let value = r.value_or_null(chain).to_php_string();
    SecretString::new(value.into())
}

fn truthy(r: &mut ChainResolver<'_>, chain: &FallbackChain) -> bool {
    r.value(chain).is_some_and(|v| v.is_truthy())
}

fn defined_if_truthy(r: &mut ChainResolver<'_>, chain: &FallbackChain) -> Option<EnvValue> {
    r.value(chain).filter(EnvValue::is_truthy)
}

fn permission_bits(r: &mut ChainResolver<'_>, chain: &FallbackChain, default: u32) -> u32 {
    let Some(value) = r.value(chain) else {
        return default;
    };
    match parse_octal(&value.to_php_string()) {
        Some(mode) => mode,
        None => {
            tracing::warn!(
                setting = chain.setting,
                kind = value.kind(),
                "Invalid permission bits; using default {:o}",
                default
            );
            default
        }
    }
}

fn runtime_directives(r: &mut ChainResolver<'_>, debug: &DebugConfig) -> RuntimeDirectives {
    let log_errors = debug.logging_enabled();
    let error_log = if log_errors {
        let path = defined_if_truthy(r, &chain::ERROR_LOG)
            .map(|v| v.to_php_string())
            .unwrap_or_else(|| DEFAULT_DEBUG_LOG_PATH.to_string());
        Some(path)
    } else {
        None
    };

    RuntimeDirectives {
        upload_max_filesize: r.value_or_null(&chain::UPLOAD_MAX_FILESIZE),
        post_max_size: r.value_or_null(&chain::POST_MAX_SIZE),
        log_errors,
        error_log,
        timezone: defined_if_truthy(r, &chain::TIMEZONE).map(|v| v.to_php_string()),
        file_perms: permission_bits(r, &chain::DEFAULT_FILEPERMS, DEFAULT_FILE_PERMS),
        dir_perms: permission_bits(r, &chain::DEFAULT_DIRPERMS, DEFAULT_DIR_PERMS),
    }
}
