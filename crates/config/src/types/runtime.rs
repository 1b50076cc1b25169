//! Runtime directives applied alongside the constants.
//!
//! Upload limits, error logging, timezone and default permission bits. These are
//! interpreter settings rather than platform constants, so they live apart from
//! `SiteConfig`'s flattened constant list.

use serde::{Serialize, Serializer};

use super::value::EnvValue;

/// Interpreter-level settings derived from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeDirectives {
    pub upload_max_filesize: EnvValue,
    pub post_max_size: EnvValue,
    /// True only when both debug and debug-log are enabled.
    pub log_errors: bool,
    /// Set only when `log_errors` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_log: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(rename = "default_fileperms", serialize_with = "serialize_octal")]
    pub file_perms: u32,
    #[serde(rename = "default_dirperms", serialize_with = "serialize_octal")]
    pub dir_perms: u32,
}

fn serialize_octal<S>(mode: &u32, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_octal(*mode))
}

/// Format permission bits the way they are conventionally written (`0755`).
pub fn format_octal(mode: u32) -> String {
    format!("0{:o}", mode)
}

/// Parse permission bits such as `0644`, `644` or `0o644`.
///
/// Returns `None` for anything that is not an unsigned octal number within `0o7777`.
pub fn parse_octal(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let digits = raw.strip_prefix("0o").unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    u32::from_str_radix(digits, 8)
        .ok()
        .filter(|mode| *mode <= 0o7777)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_octal() {
        assert_eq!(parse_octal("0755"), Some(0o755));
        assert_eq!(parse_octal("644"), Some(0o644));
        assert_eq!(parse_octal("0o2775"), Some(0o2775));
        assert_eq!(parse_octal(" 0600 "), Some(0o600));
        assert_eq!(parse_octal("0x1ff"), None);
        assert_eq!(parse_octal("789"), None);
        assert_eq!(parse_octal("17777"), None);
        assert_eq!(parse_octal(""), None);
    }

    #[test]
    fn test_parse_octal_rejects_signs() {
        assert_eq!(parse_octal("+755"), None);
        assert_eq!(parse_octal("-755"), None);
        assert_eq!(parse_octal("0o+644"), None);
    }

    #[test]
    fn test_format_octal() {
        assert_eq!(format_octal(0o755), "0755");
        assert_eq!(format_octal(0o2775), "02775");
    }

    #[test]
    fn test_serializes_perms_as_octal_strings() {
        let directives = RuntimeDirectives {
            upload_max_filesize: EnvValue::Str("64M".into()),
            post_max_size: EnvValue::Str("64M".into()),
            log_errors: false,
            error_log: None,
            timezone: None,
            file_perms: 0o644,
            dir_perms: 0o755,
        };
        let json = serde_json::to_value(&directives).unwrap();
        assert_eq!(json["default_fileperms"], "0644");
        assert_eq!(json["default_dirperms"], "0755");
        assert!(json.get("error_log").is_none());
    }
}
