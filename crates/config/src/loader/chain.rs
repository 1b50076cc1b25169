//! Fallback chains and the canonical precedence table.
//!
//! Responsibilities:
//! - Define `FallbackChain`: ordered candidate keys plus a terminal default.
//! - Resolve chains against an `EnvStore`, recording which source supplied the value.
//! - Hold the precedence table for every setting the bootstrap defines.
//!
//! Does NOT handle:
//! - Grouping resolved values into `SiteConfig` (see `builder.rs`).
//!
//! Invariants:
//! - Keys are consulted left-to-right; the first key that is set wins, even if empty.
//! - Literal defaults are never coerced.
//! - `Inherit` refers to a setting that appears earlier in `CHAINS`.

use serde::Serialize;
use std::collections::HashMap;

use super::store::EnvStore;
use crate::constants::{
    DEFAULT_DB_CHARSET, DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PASSWORD, DEFAULT_DB_USER,
    DEFAULT_EMPTY_TRASH_DAYS, DEFAULT_ENVIRONMENT, DEFAULT_HOME_URL, DEFAULT_MAX_MEMORY_LIMIT,
    DEFAULT_MEMORY_LIMIT, DEFAULT_POST_MAX_SIZE, DEFAULT_POST_REVISIONS, DEFAULT_TABLE_PREFIX,
    DEFAULT_UPLOAD_MAX_FILESIZE, PLACEHOLDER_SECRET,
};
use crate::types::EnvValue;

/// Terminal default of a fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainDefault {
    Str(&'static str),
    Bool(bool),
    Int(i64),
    Empty,
    Null,
    /// No value; the setting stays undefined.
    Absent,
    /// The resolved value of an earlier setting.
    Inherit(&'static str),
}

impl ChainDefault {
    fn literal(self) -> Option<EnvValue> {
        match self {
            Self::Str(s) => Some(EnvValue::Str(s.to_string())),
            Self::Bool(b) => Some(EnvValue::Bool(b)),
            Self::Int(n) => Some(EnvValue::Int(n)),
            Self::Empty => Some(EnvValue::Empty),
            Self::Null => Some(EnvValue::Null),
            Self::Absent | Self::Inherit(_) => None,
        }
    }

    /// Human-readable description used by `explain` output.
    pub fn describe(&self) -> String {
        match self {
            Self::Str(s) => format!("{:?}", s),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Empty => "empty".to_string(),
            Self::Null => "null".to_string(),
            Self::Absent => "(undefined)".to_string(),
            Self::Inherit(setting) => format!("value of {}", setting),
        }
    }
}

/// Ordered candidate keys plus a terminal default for one setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackChain {
    /// Name of the setting this chain defines.
    pub setting: &'static str,
    /// Environment variables consulted, highest precedence first.
    pub keys: &'static [&'static str],
    pub default: ChainDefault,
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Source {
    /// The named environment variable.
    Var(&'static str),
    /// The chain's terminal default.
    Default,
}

/// Result of resolving a single chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub setting: &'static str,
    /// `None` when no key was set and the default is `Absent`.
    pub value: Option<EnvValue>,
    pub source: Source,
}

impl FallbackChain {
    pub const fn new(
        setting: &'static str,
        keys: &'static [&'static str],
        default: ChainDefault,
    ) -> Self {
        Self {
            setting,
            keys,
            default,
        }
    }

    /// Resolve against `store`; `inherited` supplies the value for an `Inherit` default.
    pub fn resolve(&self, store: &EnvStore, inherited: Option<&EnvValue>) -> Resolution {
        for &key in self.keys {
            if let Some(value) = store.lookup(key) {
                return Resolution {
                    setting: self.setting,
                    value: Some(value),
                    source: Source::Var(key),
                };
            }
        }

        let value = match self.default {
            ChainDefault::Inherit(_) => inherited.cloned(),
            other => other.literal(),
        };
        Resolution {
            setting: self.setting,
            value,
            source: Source::Default,
        }
    }
}

/// Resolves chains in table order, remembering results for `Inherit` defaults.
pub struct ChainResolver<'a> {
    store: &'a EnvStore,
    resolved: HashMap<&'static str, Resolution>,
}

impl<'a> ChainResolver<'a> {
    pub fn new(store: &'a EnvStore) -> Self {
        Self {
            store,
            resolved: HashMap::new(),
        }
    }

    /// Resolve `chain`, reusing an earlier result for the same setting.
    pub fn resolve(&mut self, chain: &FallbackChain) -> Resolution {
        if let Some(done) = self.resolved.get(chain.setting) {
            return done.clone();
        }

        let inherited = match chain.default {
            ChainDefault::Inherit(parent) => self.resolve_parent(parent),
            _ => None,
        };
        let resolution = chain.resolve(self.store, inherited.as_ref());
        tracing::trace!(
            setting = chain.setting,
            source = ?resolution.source,
            "Resolved setting"
        );
        self.resolved.insert(chain.setting, resolution.clone());
        resolution
    }

    /// Resolve `chain` and return only the value.
    pub fn value(&mut self, chain: &FallbackChain) -> Option<EnvValue> {
        self.resolve(chain).value
    }

    /// Resolve `chain`, substituting `Null` when it yields nothing.
    pub fn value_or_null(&mut self, chain: &FallbackChain) -> EnvValue {
        self.value(chain).unwrap_or(EnvValue::Null)
    }

    fn resolve_parent(&mut self, parent: &str) -> Option<EnvValue> {
        let chain = find(parent)?;
        self.resolve(chain).value
    }

    /// Resolve every chain in the table, in order.
    pub fn resolve_all(&mut self) -> Vec<Resolution> {
        CHAINS.iter().map(|chain| self.resolve(chain)).collect()
    }
}

/// Find the chain that defines `setting`.
pub fn find(setting: &str) -> Option<&'static FallbackChain> {
    CHAINS.iter().find(|chain| chain.setting == setting)
}

macro_rules! secret_chain {
    ($name:ident, $platform:literal) => {
        pub const $name: FallbackChain = FallbackChain::new(
            stringify!($name),
            &[$platform, stringify!($name)],
            ChainDefault::Str(PLACEHOLDER_SECRET),
        );
    };
}

// =============================================================================
// Database
// =============================================================================

pub const DB_NAME: FallbackChain = FallbackChain::new(
    "DB_NAME",
    &["WORDPRESS_DB_NAME", "MYSQL_DATABASE"],
    ChainDefault::Str(DEFAULT_DB_NAME),
);
pub const DB_USER: FallbackChain = FallbackChain::new(
    "DB_USER",
    &["WORDPRESS_DB_USER", "MYSQL_USER"],
    ChainDefault::Str(DEFAULT_DB_USER),
);
pub const DB_PASSWORD: FallbackChain = FallbackChain::new(
    "DB_PASSWORD",
    &["WORDPRESS_DB_PASSWORD", "MYSQL_PASSWORD"],
    ChainDefault::Str(DEFAULT_DB_PASSWORD),
);
pub const DB_HOST: FallbackChain = FallbackChain::new(
    "DB_HOST",
    &["WORDPRESS_DB_HOST"],
    ChainDefault::Str(DEFAULT_DB_HOST),
);
pub const DB_CHARSET: FallbackChain = FallbackChain::new(
    "DB_CHARSET",
    &["DB_CHARSET"],
    ChainDefault::Str(DEFAULT_DB_CHARSET),
);
pub const DB_COLLATE: FallbackChain =
    FallbackChain::new("DB_COLLATE", &["DB_COLLATE"], ChainDefault::Str(""));
pub const TABLE_PREFIX: FallbackChain = FallbackChain::new(
    "table_prefix",
    &["WORDPRESS_TABLE_PREFIX", "DB_PREFIX"],
    ChainDefault::Str(DEFAULT_TABLE_PREFIX),
);

// =============================================================================
// URLs & SSL
// =============================================================================

pub const WP_HOME: FallbackChain =
    FallbackChain::new("WP_HOME", &["WP_HOME"], ChainDefault::Str(DEFAULT_HOME_URL));
pub const WP_SITEURL: FallbackChain = FallbackChain::new(
    "WP_SITEURL",
    &["WP_SITEURL", "WP_HOME"],
    ChainDefault::Str(DEFAULT_HOME_URL),
);
pub const FORCE_SSL_ADMIN: FallbackChain =
    FallbackChain::new("FORCE_SSL_ADMIN", &["FORCE_SSL_ADMIN"], ChainDefault::Bool(false));

// =============================================================================
// Security Keys & Salts
// =============================================================================

secret_chain!(AUTH_KEY, "WORDPRESS_AUTH_KEY");
secret_chain!(SECURE_AUTH_KEY, "WORDPRESS_SECURE_AUTH_KEY");
secret_chain!(LOGGED_IN_KEY, "WORDPRESS_LOGGED_IN_KEY");
secret_chain!(NONCE_KEY, "WORDPRESS_NONCE_KEY");
secret_chain!(AUTH_SALT, "WORDPRESS_AUTH_SALT");
secret_chain!(SECURE_AUTH_SALT, "WORDPRESS_SECURE_AUTH_SALT");
secret_chain!(LOGGED_IN_SALT, "WORDPRESS_LOGGED_IN_SALT");
secret_chain!(NONCE_SALT, "WORDPRESS_NONCE_SALT");

/// The eight key/salt chains, in definition order.
pub const SECRET_CHAINS: [FallbackChain; 8] = [
    AUTH_KEY,
    SECURE_AUTH_KEY,
    LOGGED_IN_KEY,
    NONCE_KEY,
    AUTH_SALT,
    SECURE_AUTH_SALT,
    LOGGED_IN_SALT,
    NONCE_SALT,
];

// =============================================================================
// Debug & Environment
// =============================================================================

pub const WP_DEBUG: FallbackChain = FallbackChain::new(
    "WP_DEBUG",
    &["WP_DEBUG", "DEBUG_MODE"],
    ChainDefault::Bool(false),
);
pub const WP_DEBUG_LOG: FallbackChain = FallbackChain::new(
    "WP_DEBUG_LOG",
    &["WP_DEBUG_LOG"],
    ChainDefault::Inherit("WP_DEBUG"),
);
pub const WP_DEBUG_DISPLAY: FallbackChain = FallbackChain::new(
    "WP_DEBUG_DISPLAY",
    &["WP_DEBUG_DISPLAY"],
    ChainDefault::Bool(false),
);
pub const SCRIPT_DEBUG: FallbackChain = FallbackChain::new(
    "SCRIPT_DEBUG",
    &["SCRIPT_DEBUG"],
    ChainDefault::Inherit("WP_DEBUG"),
);
pub const WP_ENV: FallbackChain = FallbackChain::new(
    "WP_ENV",
    &["ENVIRONMENT", "WP_ENV"],
    ChainDefault::Str(DEFAULT_ENVIRONMENT),
);

// =============================================================================
// Content, Memory & Uploads
// =============================================================================

pub const WP_CONTENT_DIR: FallbackChain =
    FallbackChain::new("WP_CONTENT_DIR", &["WP_CONTENT_DIR"], ChainDefault::Absent);
pub const WP_CONTENT_URL: FallbackChain =
    FallbackChain::new("WP_CONTENT_URL", &["WP_CONTENT_URL"], ChainDefault::Absent);
pub const WP_MEMORY_LIMIT: FallbackChain = FallbackChain::new(
    "WP_MEMORY_LIMIT",
    &["WORDPRESS_MEMORY_LIMIT", "WP_MEMORY_LIMIT"],
    ChainDefault::Str(DEFAULT_MEMORY_LIMIT),
);
pub const WP_MAX_MEMORY_LIMIT: FallbackChain = FallbackChain::new(
    "WP_MAX_MEMORY_LIMIT",
    &["WORDPRESS_MAX_MEMORY_LIMIT", "WP_MAX_MEMORY_LIMIT"],
    ChainDefault::Str(DEFAULT_MAX_MEMORY_LIMIT),
);
pub const UPLOADS: FallbackChain =
    FallbackChain::new("UPLOADS", &["UPLOADS_DIR"], ChainDefault::Absent);

// =============================================================================
// Security Policy, Updates & Cron
// =============================================================================

pub const DISALLOW_FILE_EDIT: FallbackChain = FallbackChain::new(
    "DISALLOW_FILE_EDIT",
    &["DISALLOW_FILE_EDIT"],
    ChainDefault::Bool(true),
);
pub const DISALLOW_FILE_MODS: FallbackChain = FallbackChain::new(
    "DISALLOW_FILE_MODS",
    &["DISALLOW_FILE_MODS"],
    ChainDefault::Bool(true),
);
pub const AUTOMATIC_UPDATER_DISABLED: FallbackChain = FallbackChain::new(
    "AUTOMATIC_UPDATER_DISABLED",
    &["AUTOMATIC_UPDATER_DISABLED"],
    ChainDefault::Bool(true),
);
pub const WP_AUTO_UPDATE_CORE: FallbackChain = FallbackChain::new(
    "WP_AUTO_UPDATE_CORE",
    &["WP_AUTO_UPDATE_CORE"],
    ChainDefault::Bool(false),
);
pub const DISABLE_WP_CRON: FallbackChain =
    FallbackChain::new("DISABLE_WP_CRON", &["DISABLE_WP_CRON"], ChainDefault::Bool(false));

// =============================================================================
// Revisions, Trash, Cookies & Repair
// =============================================================================

pub const WP_POST_REVISIONS: FallbackChain = FallbackChain::new(
    "WP_POST_REVISIONS",
    &["WP_POST_REVISIONS"],
    ChainDefault::Int(DEFAULT_POST_REVISIONS),
);
pub const MEDIA_TRASH: FallbackChain =
    FallbackChain::new("MEDIA_TRASH", &["MEDIA_TRASH"], ChainDefault::Bool(true));
pub const EMPTY_TRASH_DAYS: FallbackChain = FallbackChain::new(
    "EMPTY_TRASH_DAYS",
    &["EMPTY_TRASH_DAYS"],
    ChainDefault::Int(DEFAULT_EMPTY_TRASH_DAYS),
);
pub const COOKIE_DOMAIN: FallbackChain =
    FallbackChain::new("COOKIE_DOMAIN", &["COOKIE_DOMAIN"], ChainDefault::Absent);
pub const WP_ALLOW_REPAIR: FallbackChain =
    FallbackChain::new("WP_ALLOW_REPAIR", &["WP_ALLOW_REPAIR"], ChainDefault::Bool(false));

// =============================================================================
// Performance & Caching
// =============================================================================

pub const COMPRESS_CSS: FallbackChain =
    FallbackChain::new("COMPRESS_CSS", &["COMPRESS_CSS"], ChainDefault::Bool(true));
pub const COMPRESS_SCRIPTS: FallbackChain =
    FallbackChain::new("COMPRESS_SCRIPTS", &["COMPRESS_SCRIPTS"], ChainDefault::Bool(true));
pub const CONCATENATE_SCRIPTS: FallbackChain = FallbackChain::new(
    "CONCATENATE_SCRIPTS",
    &["CONCATENATE_SCRIPTS"],
    ChainDefault::Bool(false),
);
pub const ENFORCE_GZIP: FallbackChain =
    FallbackChain::new("ENFORCE_GZIP", &["ENFORCE_GZIP"], ChainDefault::Bool(true));
pub const WP_CACHE: FallbackChain =
    FallbackChain::new("WP_CACHE", &["WP_CACHE"], ChainDefault::Bool(true));

// =============================================================================
// Locale & Media
// =============================================================================

pub const WPLANG: FallbackChain = FallbackChain::new("WPLANG", &["WPLANG"], ChainDefault::Str(""));
pub const ALLOW_UNFILTERED_UPLOADS: FallbackChain = FallbackChain::new(
    "ALLOW_UNFILTERED_UPLOADS",
    &["ALLOW_UNFILTERED_UPLOADS"],
    ChainDefault::Bool(false),
);
pub const IMAGE_EDIT_OVERWRITE: FallbackChain = FallbackChain::new(
    "IMAGE_EDIT_OVERWRITE",
    &["IMAGE_EDIT_OVERWRITE"],
    ChainDefault::Bool(true),
);

// =============================================================================
// Runtime Directives
// =============================================================================

pub const UPLOAD_MAX_FILESIZE: FallbackChain = FallbackChain::new(
    "upload_max_filesize",
    &["PHP_UPLOAD_MAX_FILESIZE"],
    ChainDefault::Str(DEFAULT_UPLOAD_MAX_FILESIZE),
);
pub const POST_MAX_SIZE: FallbackChain = FallbackChain::new(
    "post_max_size",
    &["PHP_POST_MAX_SIZE"],
    ChainDefault::Str(DEFAULT_POST_MAX_SIZE),
);
pub const ERROR_LOG: FallbackChain =
    FallbackChain::new("error_log", &["ERROR_LOG_PATH"], ChainDefault::Absent);
pub const TIMEZONE: FallbackChain =
    FallbackChain::new("timezone", &["WP_TIMEZONE"], ChainDefault::Absent);
pub const DEFAULT_FILEPERMS: FallbackChain =
    FallbackChain::new("default_fileperms", &["PHP_DEFAULT_FILEPERMS"], ChainDefault::Absent);
pub const DEFAULT_DIRPERMS: FallbackChain =
    FallbackChain::new("default_dirperms", &["PHP_DEFAULT_DIRPERMS"], ChainDefault::Absent);

/// Every chain, in the order the bootstrap defines them.
pub const CHAINS: &[FallbackChain] = &[
    DB_NAME,
    DB_USER,
    DB_PASSWORD,
    DB_HOST,
    DB_CHARSET,
    DB_COLLATE,
    TABLE_PREFIX,
    WP_HOME,
    WP_SITEURL,
    FORCE_SSL_ADMIN,
    AUTH_KEY,
    SECURE_AUTH_KEY,
    LOGGED_IN_KEY,
    NONCE_KEY,
    AUTH_SALT,
    SECURE_AUTH_SALT,
    LOGGED_IN_SALT,
    NONCE_SALT,
    WP_DEBUG,
    WP_DEBUG_LOG,
    WP_DEBUG_DISPLAY,
    SCRIPT_DEBUG,
    WP_ENV,
    WP_CONTENT_DIR,
    WP_CONTENT_URL,
    WP_MEMORY_LIMIT,
    WP_MAX_MEMORY_LIMIT,
    UPLOADS,
    DISALLOW_FILE_EDIT,
    DISALLOW_FILE_MODS,
    AUTOMATIC_UPDATER_DISABLED,
    WP_AUTO_UPDATE_CORE,
    DISABLE_WP_CRON,
    WP_POST_REVISIONS,
    MEDIA_TRASH,
    EMPTY_TRASH_DAYS,
    COOKIE_DOMAIN,
    WP_ALLOW_REPAIR,
    COMPRESS_CSS,
    COMPRESS_SCRIPTS,
    CONCATENATE_SCRIPTS,
    ENFORCE_GZIP,
    WP_CACHE,
    WPLANG,
    ALLOW_UNFILTERED_UPLOADS,
    IMAGE_EDIT_OVERWRITE,
    UPLOAD_MAX_FILESIZE,
    POST_MAX_SIZE,
    ERROR_LOG,
    TIMEZONE,
    DEFAULT_FILEPERMS,
    DEFAULT_DIRPERMS,
];
