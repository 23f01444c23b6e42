//! Error types for the WebSocket bridge.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use ws_bridge::{Result, Error};
//!
//! fn example(bridge: &HostBridge, args: Value, channel: Arc<dyn HostChannel>) -> Result<Value> {
//!     bridge.execute("send", args, channel)
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Command | [`Error::UnknownCommand`], [`Error::InvalidArgument`] |
//! | Lookup | [`Error::ConnectionNotFound`] |
//! | Configuration | [`Error::InvalidUrl`] |
//! | External | [`Error::WebSocket`], [`Error::Tls`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;

use crate::identifiers::ConnectionId;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Command Errors
    // ========================================================================
    /// Unknown command name.
    ///
    /// Returned when the bridge receives a command with no registered handler.
    #[error("Unknown command: {command}")]
    UnknownCommand {
        /// The unrecognized command name.
        command: String,
    },

    /// Invalid argument in command payload.
    ///
    /// Returned when command arguments fail to deserialize or validate.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    /// Connection id is not registered.
    ///
    /// Returned when a command targets an id the registry does not know.
    #[error("Connection not found: {id}")]
    ConnectionNotFound {
        /// The missing connection id.
        id: ConnectionId,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Target URL is not a valid WebSocket URL.
    ///
    /// Returned when the URL fails to parse or has a non-ws scheme.
    #[error("Invalid WebSocket URL: {url}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// WebSocket transport error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),

    /// TLS connector construction error.
    #[error("TLS error: {0}")]
    Tls(#[from] native_tls::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an unknown command error.
    #[inline]
    pub fn unknown_command(command: impl Into<String>) -> Self {
        Self::UnknownCommand {
            command: command.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a connection not found error.
    #[inline]
    pub fn connection_not_found(id: ConnectionId) -> Self {
        Self::ConnectionNotFound { id }
    }

    /// Creates an invalid URL error.
    #[inline]
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this error was caused by a malformed command.
    #[inline]
    #[must_use]
    pub fn is_command_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCommand { .. } | Self::InvalidArgument { .. }
        )
    }

    /// Returns `true` if this error came from the transport layer.
    #[inline]
    #[must_use]
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::WebSocket(_) | Self::Tls(_))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::unknown_command("wsPing");
        assert_eq!(err.to_string(), "Unknown command: wsPing");
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = Error::invalid_argument("missing field `url`");
        assert_eq!(err.to_string(), "Invalid argument: missing field `url`");
    }

    #[test]
    fn test_connection_not_found_display() {
        let id = ConnectionId::generate();
        let err = Error::connection_not_found(id);
        assert_eq!(err.to_string(), format!("Connection not found: {id}"));
    }

    #[test]
    fn test_is_command_error() {
        assert!(Error::unknown_command("x").is_command_error());
        assert!(Error::invalid_argument("x").is_command_error());
        assert!(!Error::invalid_url("x").is_command_error());
    }

    #[test]
    fn test_is_transport_error() {
        let ws_err: Error = WsError::ConnectionClosed.into();
        assert!(ws_err.is_transport_error());
        assert!(!Error::invalid_url("x").is_transport_error());
    }
}
