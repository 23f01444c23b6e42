//! Typed command requests accepted by the host bridge.
//!
//! Each bridge command deserializes its argument object into one of these
//! structs before touching the registry, so malformed arguments surface as
//! [`Error::InvalidArgument`](crate::Error::InvalidArgument) instead of
//! being silently dropped.
//!
//! # Argument Shapes
//!
//! | Command | Shape |
//! |---------|-------|
//! | `connect` | `{url, timeout?, pingInterval?, headers?, acceptAllCerts?}` |
//! | `addListener` | `{id, flushBuffer?}` |
//! | `send` | `{id, message}` |
//! | `sendBinary` | `{id, data}` |
//! | `close` | `{id, code?, reason?}` |

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;

use crate::config::{ConnectOptions, TlsPolicy};
use crate::identifiers::ConnectionId;

// ============================================================================
// ConnectRequest
// ============================================================================

/// Arguments for the `connect` command.
///
/// Defaults mirror the boundary contract: `timeout` and `pingInterval`
/// default to `0` (disabled), `headers` to none, `acceptAllCerts` to
/// `false`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    /// Target URL (required).
    pub url: String,

    /// Read/connect timeout in milliseconds.
    #[serde(default)]
    pub timeout: u64,

    /// Ping interval in milliseconds.
    #[serde(default)]
    pub ping_interval: u64,

    /// Extra handshake headers.
    #[serde(default)]
    pub headers: Option<FxHashMap<String, String>>,

    /// Disable certificate and hostname validation for this connection.
    #[serde(default)]
    pub accept_all_certs: bool,
}

impl ConnectRequest {
    /// Converts the boundary request into connection options.
    ///
    /// This is the single place where the boundary's `acceptAllCerts` flag
    /// maps onto the explicit trust-all policy type.
    #[must_use]
    pub fn into_options(self) -> ConnectOptions {
        let tls = if self.accept_all_certs {
            TlsPolicy::dangerously_accept_invalid()
        } else {
            TlsPolicy::VerifyFull
        };

        let mut options = ConnectOptions::new(self.url)
            .with_timeout_ms(self.timeout)
            .with_ping_interval_ms(self.ping_interval)
            .with_tls_policy(tls);

        if let Some(headers) = self.headers {
            options = options.with_headers(headers);
        }

        options
    }
}

// ============================================================================
// ListenRequest
// ============================================================================

/// Arguments for the `addListener` command.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenRequest {
    /// Target connection.
    pub id: ConnectionId,

    /// Deliver buffered messages to the new listener before live events.
    #[serde(default)]
    pub flush_buffer: bool,
}

// ============================================================================
// SendTextRequest
// ============================================================================

/// Arguments for the `send` command.
#[derive(Debug, Clone, Deserialize)]
pub struct SendTextRequest {
    /// Target connection.
    pub id: ConnectionId,

    /// Text frame payload.
    pub message: String,
}

// ============================================================================
// SendBinaryRequest
// ============================================================================

/// Arguments for the `sendBinary` command.
///
/// `data` carries the indexed-object byte encoding; see
/// [`decode_indexed_bytes`](crate::protocol::decode_indexed_bytes).
#[derive(Debug, Clone, Deserialize)]
pub struct SendBinaryRequest {
    /// Target connection.
    pub id: ConnectionId,

    /// Indexed-object encoded bytes, e.g. `{"0":72,"1":105}`.
    pub data: Value,
}

// ============================================================================
// CloseRequest
// ============================================================================

/// Arguments for the `close` command.
#[derive(Debug, Clone, Deserialize)]
pub struct CloseRequest {
    /// Target connection.
    pub id: ConnectionId,

    /// Close code sent to the peer.
    #[serde(default = "default_close_code")]
    pub code: u16,

    /// Close reason sent to the peer.
    #[serde(default)]
    pub reason: String,
}

/// Default close code when the host omits one (normal closure).
const fn default_close_code() -> u16 {
    1000
}

// ============================================================================
// Tests
// ============================================================================
