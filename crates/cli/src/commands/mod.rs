//! CLI command implementations.

pub mod check;
pub mod explain;
pub mod render;
pub mod show;

use wpenv_config::{Exposure, chain};

pub(crate) fn exposure(reveal_secrets: bool) -> Exposure {
    if reveal_secrets {
        Exposure::Revealed
    } else {
        Exposure::Redacted
    }
}

/// Whether a setting holds a password, key or salt.
pub(crate) fn is_secret_setting(setting: &str) -> bool {
    setting == chain::DB_PASSWORD.setting
        || chain::SECRET_CHAINS.iter().any(|c| c.setting == setting)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_secret_setting() {
        assert!(is_secret_setting("DB_PASSWORD"));
        assert!(is_secret_setting("AUTH_KEY"));
        assert!(is_secret_setting("NONCE_SALT"));
        assert!(!is_secret_setting("DB_USER"));
        assert!(!is_secret_setting("WP_HOME"));
    }
}
