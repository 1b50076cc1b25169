//! The resolved site configuration object.
//!
//! Responsibilities:
//! - Group resolved settings (database, URLs, keys, debug, content, policy, performance).
//! - Flatten the groups into the ordered list of named constants handed to the platform.
//! - Flag insecure defaults (placeholder keys, default database password).
//!
//! Does NOT handle:
//! - Resolving values from the environment (see `loader::builder`).
//! - Rendering constants in any output format (see the CLI formatters).
//!
//! Invariants:
//! - A `SiteConfig` is built once and never mutated afterwards.
//! - Secret material uses `secrecy::SecretString` so it never appears in `Debug` output.
//! - Conditionally defined constants are emitted only when present.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use super::runtime::RuntimeDirectives;
use super::value::EnvValue;
use crate::constants::{DEFAULT_DB_PASSWORD, PLACEHOLDER_SECRET, REDACTED};

/// Whether secret values are included verbatim when flattening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Exposure {
    #[default]
    Redacted,
    Revealed,
}

impl Exposure {
    fn show(self, secret: &SecretString) -> EnvValue {
        match self {
            Self::Redacted => EnvValue::Str(REDACTED.to_string()),
            Self::Revealed => EnvValue::Str(secret.expose_secret().to_string()),
        }
    }
}

/// One named constant as handed to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constant {
    pub name: &'static str,
    pub value: EnvValue,
}

impl Constant {
    fn new(name: &'static str, value: EnvValue) -> Self {
        Self { name, value }
    }
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub name: EnvValue,
    pub user: EnvValue,
    pub password: SecretString,
    pub host: EnvValue,
    pub charset: EnvValue,
    pub collate: EnvValue,
    /// Table prefix; assigned to a variable rather than defined as a constant.
    pub table_prefix: EnvValue,
}

/// Site URLs and admin SSL enforcement.
#[derive(Debug, Clone)]
pub struct UrlConfig {
    pub home: EnvValue,
    pub site_url: EnvValue,
    /// Defined only when true.
    pub force_ssl_admin: bool,
}

/// Authentication keys and salts.
#[derive(Debug, Clone)]
pub struct SecurityKeys {
    pub auth_key: SecretString,
    pub secure_auth_key: SecretString,
    pub logged_in_key: SecretString,
    pub nonce_key: SecretString,
    pub auth_salt: SecretString,
    pub secure_auth_salt: SecretString,
    pub logged_in_salt: SecretString,
    pub nonce_salt: SecretString,
}

impl SecurityKeys {
    /// The keys and salts paired with their constant names, in definition order.
    pub fn entries(&self) -> [(&'static str, &SecretString); 8] {
        [
            ("AUTH_KEY", &self.auth_key),
            ("SECURE_AUTH_KEY", &self.secure_auth_key),
            ("LOGGED_IN_KEY", &self.logged_in_key),
            ("NONCE_KEY", &self.nonce_key),
            ("AUTH_SALT", &self.auth_salt),
            ("SECURE_AUTH_SALT", &self.secure_auth_salt),
            ("LOGGED_IN_SALT", &self.logged_in_salt),
            ("NONCE_SALT", &self.nonce_salt),
        ]
    }
}

/// Debug flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugConfig {
    pub debug: EnvValue,
    pub debug_log: EnvValue,
    pub debug_display: EnvValue,
    pub script_debug: EnvValue,
}

impl DebugConfig {
    /// Whether debug output goes to a log file.
    pub fn logging_enabled(&self) -> bool {
        self.debug.is_truthy() && self.debug_log.is_truthy()
    }
}

/// Content location and memory limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    pub content_dir: Option<EnvValue>,
    pub content_url: Option<EnvValue>,
    pub uploads: Option<EnvValue>,
    pub memory_limit: EnvValue,
    pub max_memory_limit: EnvValue,
}

/// Editing, update, cron, revision, trash, cookie and media policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    pub disallow_file_edit: EnvValue,
    pub disallow_file_mods: EnvValue,
    pub automatic_updater_disabled: EnvValue,
    pub auto_update_core: EnvValue,
    pub disable_cron: EnvValue,
    pub post_revisions: EnvValue,
    pub media_trash: EnvValue,
    pub empty_trash_days: EnvValue,
    pub cookie_domain: Option<EnvValue>,
    /// Defined only when true.
    pub allow_repair: bool,
    pub allow_unfiltered_uploads: EnvValue,
    pub image_edit_overwrite: EnvValue,
}

/// Asset compression and caching toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceConfig {
    pub compress_css: EnvValue,
    pub compress_scripts: EnvValue,
    pub concatenate_scripts: EnvValue,
    pub enforce_gzip: EnvValue,
    pub cache: EnvValue,
}

/// The complete configuration object handed to the platform.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub database: DatabaseConfig,
    pub urls: UrlConfig,
    pub keys: SecurityKeys,
    pub debug: DebugConfig,
    /// Deployment environment name (`WP_ENV`).
    pub environment: EnvValue,
    pub content: ContentConfig,
    pub policy: PolicyConfig,
    pub performance: PerformanceConfig,
    /// Site language (`WPLANG`).
    pub locale: EnvValue,
    pub runtime: RuntimeDirectives,
}

impl SiteConfig {
    /// Flatten into named constants, in the order the platform defines them.
    pub fn constants(&self, exposure: Exposure) -> Vec<Constant> {
        let db = &self.database;
        let mut out = vec![
            Constant::new("DB_NAME", db.name.clone()),
            Constant::new("DB_USER", db.user.clone()),
            Constant::new("DB_PASSWORD", exposure.show(&db.password)),
            Constant::new("DB_HOST", db.host.clone()),
            Constant::new("DB_CHARSET", db.charset.clone()),
            Constant::new("DB_COLLATE", db.collate.clone()),
            Constant::new("WP_HOME", self.urls.home.clone()),
            Constant::new("WP_SITEURL", self.urls.site_url.clone()),
        ];
        if self.urls.force_ssl_admin {
            out.push(Constant::new("FORCE_SSL_ADMIN", EnvValue::Bool(true)));
        }
        for (name, secret) in self.keys.entries() {
            out.push(Constant::new(name, exposure.show(secret)));
        }

        let debug = &self.debug;
        out.extend([
            Constant::new("WP_DEBUG", debug.debug.clone()),
            Constant::new("WP_DEBUG_LOG", debug.debug_log.clone()),
            Constant::new("WP_DEBUG_DISPLAY", debug.debug_display.clone()),
            Constant::new("SCRIPT_DEBUG", debug.script_debug.clone()),
            Constant::new("WP_ENV", self.environment.clone()),
        ]);

        let content = &self.content;
        push_optional(&mut out, "WP_CONTENT_DIR", &content.content_dir);
        push_optional(&mut out, "WP_CONTENT_URL", &content.content_url);
        out.push(Constant::new("WP_MEMORY_LIMIT", content.memory_limit.clone()));
        out.push(Constant::new(
            "WP_MAX_MEMORY_LIMIT",
            content.max_memory_limit.clone(),
        ));
        push_optional(&mut out, "UPLOADS", &content.uploads);

        let policy = &self.policy;
        out.extend([
            Constant::new("DISALLOW_FILE_EDIT", policy.disallow_file_edit.clone()),
            Constant::new("DISALLOW_FILE_MODS", policy.disallow_file_mods.clone()),
            Constant::new(
                "AUTOMATIC_UPDATER_DISABLED",
                policy.automatic_updater_disabled.clone(),
            ),
            Constant::new("WP_AUTO_UPDATE_CORE", policy.auto_update_core.clone()),
            Constant::new("DISABLE_WP_CRON", policy.disable_cron.clone()),
            Constant::new("WP_POST_REVISIONS", policy.post_revisions.clone()),
            Constant::new("MEDIA_TRASH", policy.media_trash.clone()),
            Constant::new("EMPTY_TRASH_DAYS", policy.empty_trash_days.clone()),
        ]);
        push_optional(&mut out, "COOKIE_DOMAIN", &policy.cookie_domain);
        if policy.allow_repair {
            out.push(Constant::new("WP_ALLOW_REPAIR", EnvValue::Bool(true)));
        }

        let perf = &self.performance;
        out.extend([
            Constant::new("COMPRESS_CSS", perf.compress_css.clone()),
            Constant::new("COMPRESS_SCRIPTS", perf.compress_scripts.clone()),
            Constant::new("CONCATENATE_SCRIPTS", perf.concatenate_scripts.clone()),
            Constant::new("ENFORCE_GZIP", perf.enforce_gzip.clone()),
            Constant::new("WP_CACHE", perf.cache.clone()),
            Constant::new("WPLANG", self.locale.clone()),
            Constant::new(
                "ALLOW_UNFILTERED_UPLOADS",
                policy.allow_unfiltered_uploads.clone(),
            ),
            Constant::new("IMAGE_EDIT_OVERWRITE", policy.image_edit_overwrite.clone()),
        ]);

        out
    }

    /// Look up a single flattened constant by name.
    pub fn constant(&self, name: &str, exposure: Exposure) -> Option<EnvValue> {
        self.constants(exposure)
            .into_iter()
            .find(|c| c.name == name)
            .map(|c| c.value)
    }

    /// Names of keys and salts still set to the shipped placeholder phrase.
    pub fn placeholder_secrets(&self) -> Vec<&'static str> {
        self.keys
            .entries()
            .into_iter()
            .filter(|(_, secret)| secret.expose_secret() == PLACEHOLDER_SECRET)
            .map(|(name, _)| name)
            .collect()
    }

    /// Whether the database password is the built-in development default.
    pub fn uses_default_db_password(&self) -> bool {
        self.database.password.expose_secret() == DEFAULT_DB_PASSWORD
    }
}

fn push_optional(out: &mut Vec<Constant>, name: &'static str, value: &Option<EnvValue>) {
    if let Some(value) = value {
        out.push(Constant::new(name, value.clone()));
    }
}
