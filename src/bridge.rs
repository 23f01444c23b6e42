//! Host bridge adapter.
//!
//! Decodes host commands into calls on the [`ConnectionRegistry`] and
//! encodes callback payloads back to the host. Commands are dispatched
//! through a name → handler table, so the adapter is independent of any
//! host runtime's calling convention.
//!
//! # Commands
//!
//! | Name | Arguments | Returns |
//! |------|-----------|---------|
//! | `connect` | `{url, timeout?, pingInterval?, headers?, acceptAllCerts?}` | `{id}`; async result on the channel |
//! | `addListener` | `{id, flushBuffer?}` | `null`; stream events on the channel |
//! | `send` | `{id, message}` | `true`/`false` |
//! | `sendBinary` | `{id, data}` | `true`/`false` |
//! | `close` | `{id, code?, reason?}` | `true`/`false` |
//!
//! Malformed arguments return [`Error::InvalidArgument`]; an unregistered
//! id returns [`Error::ConnectionNotFound`]; an unrecognized command name
//! returns [`Error::UnknownCommand`]. Errors are returned to the caller,
//! never swallowed.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::identifiers::ConnectionId;
use crate::protocol::command::{
    CloseRequest, ConnectRequest, ListenRequest, SendBinaryRequest, SendTextRequest,
};
use crate::protocol::payload;
use crate::transport::buffer::MessagePayload;
use crate::transport::connection::Connection;
use crate::transport::dispatcher::{ConnectOutcome, StreamEvent};
use crate::transport::registry::ConnectionRegistry;

// ============================================================================
// HostChannel
// ============================================================================

/// Callback channel back to the host.
///
/// One channel is handed in per command. For `connect` it receives the
/// one-shot result; for `addListener` it becomes the persistent stream
/// channel and every delivery passes `keep_open = true` so the host keeps
/// it alive across calls.
pub trait HostChannel: Send + Sync {
    /// Delivers a success payload.
    fn success(&self, payload: Value, keep_open: bool);

    /// Delivers an error payload.
    fn error(&self, payload: Value, keep_open: bool);
}

// ============================================================================
// HostBridge
// ============================================================================

/// Handler signature shared by every command.
type CommandHandler = fn(&HostBridge, Value, Arc<dyn HostChannel>) -> Result<Value>;

/// Routes host commands to the connection registry.
///
/// Owns a reference to the session's registry; create one bridge per host
/// session next to its registry.
pub struct HostBridge {
    registry: Arc<ConnectionRegistry>,
    handlers: FxHashMap<&'static str, CommandHandler>,
}

impl HostBridge {
    /// Creates a bridge over the given registry.
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        let mut handlers: FxHashMap<&'static str, CommandHandler> = FxHashMap::default();
        handlers.insert("connect", Self::handle_connect);
        handlers.insert("addListener", Self::handle_add_listener);
        handlers.insert("send", Self::handle_send);
        handlers.insert("sendBinary", Self::handle_send_binary);
        handlers.insert("close", Self::handle_close);

        Self { registry, handlers }
    }

    /// Returns the registry this bridge routes into.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Returns the registered command names.
    pub fn commands(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    /// Executes a host command.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownCommand`] for an unregistered command name
    /// - [`Error::InvalidArgument`] for malformed arguments
    /// - [`Error::ConnectionNotFound`] for an unregistered id
    pub fn execute(
        &self,
        command: &str,
        args: Value,
        channel: Arc<dyn HostChannel>,
    ) -> Result<Value> {
        let handler = self
            .handlers
            .get(command)
            .copied()
            .ok_or_else(|| Error::unknown_command(command))?;

        handler(self, args, channel)
    }
}

// ============================================================================
// HostBridge - Command Handlers
// ============================================================================

impl HostBridge {
    /// `connect`: opens a connection, returns `{id}` immediately.
    ///
    /// The async result arrives on `channel` exactly once: success
    /// `{id, statusCode}` or error `{id, code, message}`. Because the id is
    /// returned synchronously, the host may `addListener` while the
    /// connection is still connecting.
    fn handle_connect(&self, args: Value, channel: Arc<dyn HostChannel>) -> Result<Value> {
        let request: ConnectRequest = parse_args(args)?;
        let options = request.into_options();
        options.validate()?;

        if options.bypasses_tls_validation() {
            warn!(url = %options.url, "connect requested with TLS validation disabled");
        }

        let id = self.registry.connect(
            options,
            Box::new(move |id, outcome| match outcome {
                ConnectOutcome::Opened { status } => {
                    channel.success(payload::connect_success(id, status), false);
                }
                ConnectOutcome::Failed { code, message } => {
                    channel.error(payload::connect_failure(id, code, &message), false);
                }
            }),
        );

        debug!(id = %id, "connect dispatched");
        Ok(json!({ "id": id }))
    }

    /// `addListener`: binds the channel as the persistent stream listener.
    fn handle_add_listener(&self, args: Value, channel: Arc<dyn HostChannel>) -> Result<Value> {
        let request: ListenRequest = parse_args(args)?;
        let connection = self.lookup(request.id)?;
        let id = request.id;

        connection.bind_listener(
            Box::new(move |event| match event {
                StreamEvent::Message(MessagePayload::Text(text)) => {
                    channel.success(payload::message_event(id, &text), true);
                }
                StreamEvent::Message(MessagePayload::Binary(bytes)) => {
                    let encoded = payload::encode_binary_message(&bytes);
                    channel.success(payload::message_event(id, &encoded), true);
                }
                StreamEvent::Closed { code, reason } => {
                    channel.success(payload::close_event(id, code, &reason), true);
                }
                StreamEvent::Failed { code, message } => {
                    channel.error(payload::fail_event(id, code, &message), true);
                }
            }),
            request.flush_buffer,
        );

        debug!(id = %id, flush = request.flush_buffer, "stream listener bound");
        Ok(Value::Null)
    }

    /// `send`: queues a text frame; `true` if the connection accepted it.
    fn handle_send(&self, args: Value, _channel: Arc<dyn HostChannel>) -> Result<Value> {
        let request: SendTextRequest = parse_args(args)?;
        let connection = self.lookup(request.id)?;

        let accepted = connection.send_text(request.message);
        if !accepted {
            debug!(id = %request.id, "send rejected, connection not open");
        }
        Ok(Value::Bool(accepted))
    }

    /// `sendBinary`: decodes the indexed-object bytes and queues a binary
    /// frame; `true` if the connection accepted it.
    fn handle_send_binary(&self, args: Value, _channel: Arc<dyn HostChannel>) -> Result<Value> {
        let request: SendBinaryRequest = parse_args(args)?;
        let bytes = payload::decode_indexed_bytes(&request.data)?;
        let connection = self.lookup(request.id)?;

        let accepted = connection.send_binary(bytes);
        if !accepted {
            debug!(id = %request.id, "binary send rejected, connection not open");
        }
        Ok(Value::Bool(accepted))
    }

    /// `close`: initiates the closing handshake; `true` if accepted.
    fn handle_close(&self, args: Value, _channel: Arc<dyn HostChannel>) -> Result<Value> {
        let request: CloseRequest = parse_args(args)?;
        let connection = self.lookup(request.id)?;

        let accepted = connection.close(request.code, request.reason);
        Ok(Value::Bool(accepted))
    }

    fn lookup(&self, id: ConnectionId) -> Result<Connection> {
        self.registry
            .lookup(id)
            .ok_or_else(|| Error::connection_not_found(id))
    }
}

/// Deserializes command arguments, mapping failures to `InvalidArgument`.
fn parse_args<T: serde::de::DeserializeOwned>(args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|e| Error::invalid_argument(e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
