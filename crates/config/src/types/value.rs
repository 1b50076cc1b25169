//! Resolved environment values and the coercion vocabulary.
//!
//! Responsibilities:
//! - Define `EnvValue`, the closed set of values a lookup can produce.
//! - Decode raw environment strings through the fixed coercion vocabulary.
//! - Provide the platform's truthiness and string-cast rules.
//!
//! Does NOT handle:
//! - Reading the environment (see `loader::store`).
//! - Choosing between candidate keys (see `loader::chain`).
//!
//! Invariants:
//! - `EnvValue::coerce` is total: unrecognized input is returned as `Str` unchanged.
//! - Coercion never produces `Int`; that variant only comes from literal defaults.

use serde::{Serialize, Serializer};
use std::fmt;

/// A resolved configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvValue {
    /// Any string outside the coercion vocabulary.
    Str(String),
    /// `true`/`(true)` or `false`/`(false)`.
    Bool(bool),
    /// Integer literal default.
    Int(i64),
    /// `empty`/`(empty)`: the empty string.
    Empty,
    /// `null`/`(null)`: the null marker.
    Null,
}

impl EnvValue {
    /// Decode a raw environment string.
    ///
    /// Matching is ASCII case-insensitive and exact; no trimming is applied.
    pub fn coerce(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "true" | "(true)" => Self::Bool(true),
            "false" | "(false)" => Self::Bool(false),
            "empty" | "(empty)" => Self::Empty,
            "null" | "(null)" => Self::Null,
            _ => Self::Str(raw.to_string()),
        }
    }

    /// Loose truthiness used by conditional definitions.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Str(s) => !s.is_empty() && s != "0",
            Self::Empty | Self::Null => false,
        }
    }

    /// String view of the value, following the platform's cast rules.
    pub fn to_php_string(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Bool(true) => "1".to_string(),
            Self::Int(n) => n.to_string(),
            Self::Bool(false) | Self::Empty | Self::Null => String::new(),
        }
    }

    /// Borrow the inner string of a `Str` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Return the boolean of a `Bool` value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Empty => "empty",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::Empty => f.write_str(""),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for EnvValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for EnvValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for EnvValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for EnvValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl Serialize for EnvValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Empty => serializer.serialize_str(""),
            Self::Null => serializer.serialize_none(),
        }
    }
}
