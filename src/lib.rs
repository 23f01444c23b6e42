//! WebSocket bridge - concurrent connection manager for host applications.
//!
//! This library lets a host application open, label, send on, receive
//! from, and close many concurrent WebSocket sessions through an
//! opaque-id, callback-oriented interface.
//!
//! # Architecture
//!
//! - Each session is a [`Connection`]: a cheap-clone handle over a
//!   background task that owns the socket and pumps its frames.
//! - The [`ConnectionRegistry`] is the lifecycle root: it generates ids,
//!   maps them to connections, and tears everything down at session end.
//! - Callbacks split into a one-shot connect result and a persistent
//!   stream channel; messages arriving before a listener is bound are
//!   buffered and flushed in arrival order on request.
//! - The [`HostBridge`] adapts named commands (`connect`, `addListener`,
//!   `send`, `sendBinary`, `close`) onto the registry and encodes callback
//!   payloads for the host.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use ws_bridge::{ConnectOptions, ConnectionRegistry};
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = Arc::new(ConnectionRegistry::new());
//!
//!     // Open a connection; the result arrives on the callback.
//!     let id = registry.connect(
//!         ConnectOptions::new("wss://example.com/socket").with_ping_interval_ms(30_000),
//!         Box::new(|id, outcome| println!("{id}: {outcome:?}")),
//!     );
//!
//!     // The connection is registered immediately, even while connecting.
//!     let connection = registry.lookup(id).expect("registered");
//!     connection.bind_listener(Box::new(|event| println!("{event:?}")), true);
//!
//!     // ... later, at session end:
//!     registry.remove_all();
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`bridge`] | Host command dispatch and callback encoding |
//! | [`config`] | Connection options and TLS trust policy |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Opaque connection id |
//! | [`protocol`] | Host-boundary message shapes (internal) |
//! | [`transport`] | Connection, dispatcher, buffer, registry (internal) |
//!
//! # TLS Trust Override
//!
//! Connecting to a `wss://` endpoint with an untrusted certificate fails
//! by default. A single connection can opt out of validation with
//! [`TlsPolicy::dangerously_accept_invalid`]: never process-wide, never
//! by default, and loudly logged when used.

// ============================================================================
// Modules
// ============================================================================

/// Host command dispatch and callback encoding.
///
/// Use [`HostBridge::new`] with a registry to accept named host commands.
pub mod bridge;

/// Connection options and TLS trust policy.
pub mod config;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Opaque connection identifier.
pub mod identifiers;

/// Host-boundary message shapes.
///
/// Internal module defining command requests and callback payloads.
pub mod protocol;

/// WebSocket transport layer.
///
/// Internal module with the connection state machine, callback dispatcher,
/// message buffer, and registry.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Bridge types
pub use bridge::{HostBridge, HostChannel};

// Configuration types
pub use config::{ConnectOptions, TlsPolicy};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::ConnectionId;

// Transport types
pub use transport::{
    ConnectCallback, ConnectOutcome, Connection, ConnectionRegistry, ConnectionState,
    MessagePayload, StreamEvent, StreamListener,
};
