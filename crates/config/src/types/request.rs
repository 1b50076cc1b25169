//! Request context and reverse-proxy header normalization.
//!
//! Responsibilities:
//! - Represent the request fields the platform reads (secure flag, port, host, client address).
//! - Collect `X-Forwarded-*` values from headers or CGI-style variables.
//! - Rewrite the request context from forwarded values before the platform reads it.
//!
//! Invariants:
//! - Only a forwarded protocol exactly equal to `https` marks the request secure.
//! - A forwarded host or client address replaces the original when present.

use serde::Serialize;

use crate::constants::{HTTP_PORT, HTTPS_PORT};
use crate::loader::EnvStore;

/// Forwarded values supplied by a reverse proxy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardedHeaders {
    pub proto: Option<String>,
    pub host: Option<String>,
    pub for_addr: Option<String>,
}

impl ForwardedHeaders {
    /// Collect forwarded values from HTTP headers; names match case-insensitively.
    ///
    /// When a header repeats, the first occurrence is kept.
    pub fn from_headers<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut forwarded = Self::default();
        for (name, value) in headers {
            let slot = match name.as_ref().to_ascii_lowercase().as_str() {
                "x-forwarded-proto" => &mut forwarded.proto,
                "x-forwarded-host" => &mut forwarded.host,
                "x-forwarded-for" => &mut forwarded.for_addr,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.as_ref().to_string());
            }
        }
        forwarded
    }

    /// Collect forwarded values from CGI-style variables (`HTTP_X_FORWARDED_*`).
    pub fn from_store(store: &EnvStore) -> Self {
        Self {
            proto: store.raw("HTTP_X_FORWARDED_PROTO").map(str::to_string),
            host: store.raw("HTTP_X_FORWARDED_HOST").map(str::to_string),
            for_addr: store.raw("HTTP_X_FORWARDED_FOR").map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.proto.is_none() && self.host.is_none() && self.for_addr.is_none()
    }
}

/// Request fields the platform inspects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestContext {
    /// Whether the connection is considered HTTPS.
    pub secure: bool,
    pub port: u16,
    pub host: Option<String>,
    pub remote_addr: Option<String>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            secure: false,
            port: HTTP_PORT,
            host: None,
            remote_addr: None,
        }
    }
}

impl RequestContext {
    /// Read the request context from CGI-style variables
    /// (`HTTPS`, `SERVER_PORT`, `HTTP_HOST`, `REMOTE_ADDR`).
    pub fn from_store(store: &EnvStore) -> Self {
        let secure = store
            .raw("HTTPS")
            .is_some_and(|v| !v.is_empty() && !v.eq_ignore_ascii_case("off"));
        let port = store
            .raw("SERVER_PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(if secure { HTTPS_PORT } else { HTTP_PORT });

        Self {
            secure,
            port,
            host: store.raw("HTTP_HOST").map(str::to_string),
            remote_addr: store.raw("REMOTE_ADDR").map(str::to_string),
        }
    }

    /// Rewrite the context from reverse-proxy values.
    pub fn apply_forwarded(&mut self, forwarded: &ForwardedHeaders) {
        if forwarded.proto.as_deref() == Some("https") {
            self.secure = true;
            self.port = HTTPS_PORT;
        }
        if let Some(host) = &forwarded.host {
            self.host = Some(host.clone());
        }
        if let Some(addr) = &forwarded.for_addr {
            self.remote_addr = Some(addr.clone());
        }
    }

    /// Read from CGI-style variables and apply any forwarded values in one step.
    pub fn normalized(store: &EnvStore) -> Self {
        let mut context = Self::from_store(store);
        let forwarded = ForwardedHeaders::from_store(store);
        if !forwarded.is_empty() {
            tracing::debug!(
                proto = forwarded.proto.is_some(),
                host = forwarded.host.is_some(),
                for_addr = forwarded.for_addr.is_some(),
                "Applying reverse-proxy headers"
            );
            context.apply_forwarded(&forwarded);
        }
        context
    }
}
