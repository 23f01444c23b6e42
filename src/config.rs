//! Connection configuration and TLS trust policy.
//!
//! Provides a type-safe interface for configuring a single WebSocket
//! connection: target URL, read timeout, ping interval, handshake headers,
//! and the per-connection TLS trust policy.
//!
//! # Example
//!
//! ```ignore
//! use ws_bridge::ConnectOptions;
//!
//! let options = ConnectOptions::new("wss://example.com/socket")
//!     .with_timeout_ms(5_000)
//!     .with_ping_interval_ms(30_000)
//!     .with_header("Authorization", "Bearer ...");
//!
//! options.validate()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashMap;
use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// TlsPolicy
// ============================================================================

/// Certificate and hostname validation policy for one connection.
///
/// The default verifies the full chain and hostname. The insecure variant
/// disables both for the single connection carrying it, never process-wide.
/// It is only reachable through [`TlsPolicy::dangerously_accept_invalid`],
/// so enabling it is always a visible, explicit choice at the call site.
///
/// For plain `ws://` URLs the policy is inert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsPolicy {
    /// Validate the certificate chain and hostname (default).
    #[default]
    VerifyFull,

    /// Accept any certificate chain and any hostname.
    ///
    /// Intended for controlled and testing environments only.
    AcceptInvalid,
}

impl TlsPolicy {
    /// Constructs the trust-all policy.
    ///
    /// The name is the warning: connections using this policy perform no
    /// certificate or hostname validation at all.
    #[inline]
    #[must_use]
    pub const fn dangerously_accept_invalid() -> Self {
        Self::AcceptInvalid
    }

    /// Returns `true` if validation is disabled.
    #[inline]
    #[must_use]
    pub const fn is_insecure(&self) -> bool {
        matches!(self, Self::AcceptInvalid)
    }
}

// ============================================================================
// ConnectOptions
// ============================================================================

/// Configuration for a single WebSocket connection.
///
/// Timeout and ping interval are in milliseconds; `0` disables each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Target URL (`ws://` or `wss://`).
    pub url: String,

    /// Read/connect timeout in milliseconds (`0` = none).
    pub timeout_ms: u64,

    /// Ping frame interval in milliseconds (`0` = disabled).
    pub ping_interval_ms: u64,

    /// Extra headers for the upgrade request.
    pub headers: FxHashMap<String, String>,

    /// TLS trust policy for this connection.
    pub tls: TlsPolicy,
}

// ============================================================================
// Constructors
// ============================================================================

impl ConnectOptions {
    /// Creates options for the given URL with defaults everywhere else.
    #[inline]
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_ms: 0,
            ping_interval_ms: 0,
            headers: FxHashMap::default(),
            tls: TlsPolicy::VerifyFull,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ConnectOptions {
    /// Sets the read/connect timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the ping interval in milliseconds.
    #[inline]
    #[must_use]
    pub fn with_ping_interval_ms(mut self, ping_interval_ms: u64) -> Self {
        self.ping_interval_ms = ping_interval_ms;
        self
    }

    /// Adds one handshake header.
    #[inline]
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds multiple handshake headers.
    #[inline]
    #[must_use]
    pub fn with_headers(
        mut self,
        headers: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the TLS trust policy.
    #[inline]
    #[must_use]
    pub fn with_tls_policy(mut self, tls: TlsPolicy) -> Self {
        self.tls = tls;
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ConnectOptions {
    /// Validates the target URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the URL does not parse or its scheme
    /// is neither `ws` nor `wss`.
    pub fn validate(&self) -> Result<()> {
        let parsed =
            Url::parse(&self.url).map_err(|_| Error::invalid_url(self.url.clone()))?;

        match parsed.scheme() {
            "ws" | "wss" => Ok(()),
            _ => Err(Error::invalid_url(self.url.clone())),
        }
    }

    /// Returns `true` if the target URL uses TLS (`wss`).
    #[inline]
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.url.starts_with("wss://")
    }

    /// Returns `true` if this connection bypasses TLS validation.
    ///
    /// True only when the URL is secure AND the trust-all policy was
    /// explicitly chosen.
    #[inline]
    #[must_use]
    pub fn bypasses_tls_validation(&self) -> bool {
        self.is_secure() && self.tls.is_insecure()
    }
}

// ============================================================================
// Tests
// ============================================================================
