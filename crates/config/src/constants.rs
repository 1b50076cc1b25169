//! Centralized constants for the wpenv workspace.
//!
//! This module contains the literal defaults and fixed names shared by the
//! resolver, the fallback-chain table and the CLI.

// =============================================================================
// Override File
// =============================================================================

/// File name of the local override file, relative to the site root.
pub const OVERRIDE_FILE_NAME: &str = ".env";

/// Characters trimmed from both edges of an override-file value.
pub const VALUE_TRIM_CHARS: &[char] = &[
    ' ', '\t', '\n', '\r', '\0', '\x0B', '"', '\'', '\u{2018}', '\u{2019}', '\u{201C}',
    '\u{201D}',
];

// =============================================================================
// Database Defaults
// =============================================================================

pub const DEFAULT_DB_NAME: &str = "wordpress";
pub const DEFAULT_DB_USER: &str = "wordpress";
pub const DEFAULT_DB_PASSWORD: &str = "password";
pub const DEFAULT_DB_HOST: &str = "mysql:3306";
pub const DEFAULT_DB_CHARSET: &str = "utf8mb4";
pub const DEFAULT_TABLE_PREFIX: &str = "wp_";

// =============================================================================
// Site Defaults
// =============================================================================

/// Default home and site URL.
pub const DEFAULT_HOME_URL: &str = "http://localhost";

/// Default environment name.
pub const DEFAULT_ENVIRONMENT: &str = "production";

/// Placeholder phrase shipped for every security key and salt.
///
/// A resolved key equal to this phrase means the deployment never provided one.
pub const PLACEHOLDER_SECRET: &str = "put your unique phrase here";

pub const DEFAULT_MEMORY_LIMIT: &str = "512M";
pub const DEFAULT_MAX_MEMORY_LIMIT: &str = "1024M";

/// Default number of post revisions kept.
pub const DEFAULT_POST_REVISIONS: i64 = 3;

/// Default number of days before trash is emptied.
pub const DEFAULT_EMPTY_TRASH_DAYS: i64 = 30;

// =============================================================================
// Runtime Directive Defaults
// =============================================================================

pub const DEFAULT_UPLOAD_MAX_FILESIZE: &str = "64M";
pub const DEFAULT_POST_MAX_SIZE: &str = "64M";

/// Error log location used when debug logging is enabled and no path is given.
pub const DEFAULT_DEBUG_LOG_PATH: &str = "/var/www/html/wp-content/debug/debug.log";

/// Default permission bits for files and directories created by the platform.
pub const DEFAULT_FILE_PERMS: u32 = 0o755;
pub const DEFAULT_DIR_PERMS: u32 = 0o755;

// =============================================================================
// Request Context
// =============================================================================

/// Port reported when a reverse proxy terminated TLS.
pub const HTTPS_PORT: u16 = 443;

/// Port assumed for a request context with no explicit port.
pub const HTTP_PORT: u16 = 80;

/// Marker substituted for secret values in redacted output.
pub const REDACTED: &str = "[REDACTED]";
