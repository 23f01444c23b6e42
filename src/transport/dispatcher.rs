//! Callback routing for one connection.
//!
//! Every connection owns a [`CallbackDispatcher`] that routes transport
//! events to the host's callbacks. Two channels exist side by side:
//!
//! - a **one-shot connect-result slot**, resolved exactly once with the
//!   outcome of the initial connect attempt;
//! - a **persistent stream listener**, invoked for every message, close,
//!   and post-connect failure. While no listener is bound, messages are
//!   absorbed by the [`MessageBuffer`].
//!
//! # Delivery Rules
//!
//! | Event | Listener bound | No listener |
//! |-------|----------------|-------------|
//! | message | delivered immediately | buffered |
//! | close | delivered | dropped |
//! | failure | delivered (+ connect slot if unfinished) | connect slot if unfinished |
//!
//! All routing state lives under a single mutex, so buffer-append, drain,
//! listener swap, and direct delivery are mutually exclusive: a message is
//! delivered exactly once, either via buffer-flush or directly, never both.

// ============================================================================
// Imports
// ============================================================================

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::identifiers::ConnectionId;
use crate::transport::buffer::{MessageBuffer, MessagePayload};

// ============================================================================
// Types
// ============================================================================

/// Outcome of the initial connect attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// Handshake succeeded with the upgrade response status.
    Opened {
        /// HTTP status of the upgrade response (normally 101).
        status: u16,
    },

    /// Handshake failed.
    Failed {
        /// HTTP status for rejected handshakes, 1006 otherwise.
        code: u16,
        /// Failure description.
        message: String,
    },
}

/// Event delivered on the persistent stream channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Inbound message frame.
    Message(MessagePayload),

    /// Closing handshake completed or initiated by the peer.
    Closed {
        /// Close code from the peer's close frame.
        code: u16,
        /// Close reason from the peer's close frame.
        reason: String,
    },

    /// Terminal transport failure after the connection opened.
    Failed {
        /// Transport failure code.
        code: u16,
        /// Failure description.
        message: String,
    },
}

/// One-shot connect-result callback.
///
/// Receives the id of the connection the result belongs to, so a single
/// host-side sink can serve many concurrent connect attempts.
pub type ConnectCallback = Box<dyn FnOnce(ConnectionId, ConnectOutcome) + Send>;

/// Persistent stream-event callback.
///
/// Invoked from the connection's I/O task while the dispatcher lock is
/// held; a listener must not bind listeners or flush buffers from inside
/// its own invocation.
pub type StreamListener = Box<dyn Fn(StreamEvent) + Send + Sync>;

// ============================================================================
// CallbackDispatcher
// ============================================================================

/// Routes transport events to the host callbacks of one connection.
pub struct CallbackDispatcher {
    id: ConnectionId,
    inner: Mutex<DispatchState>,
}

struct DispatchState {
    /// Taken on first resolution; `None` marks the result as delivered.
    connect_slot: Option<ConnectCallback>,
    listener: Option<StreamListener>,
    buffer: MessageBuffer,
}

impl CallbackDispatcher {
    /// Creates a dispatcher holding the connect-result callback.
    #[must_use]
    pub fn new(id: ConnectionId, on_connect: ConnectCallback) -> Self {
        Self {
            id,
            inner: Mutex::new(DispatchState {
                connect_slot: Some(on_connect),
                listener: None,
                buffer: MessageBuffer::new(),
            }),
        }
    }

    /// Resolves the one-shot connect result.
    ///
    /// The first call delivers `outcome`; any later call is a no-op.
    pub fn resolve_connect(&self, outcome: ConnectOutcome) {
        let slot = self.inner.lock().connect_slot.take();

        match slot {
            Some(callback) => callback(self.id, outcome),
            None => trace!(id = %self.id, "connect result already delivered"),
        }
    }

    /// Returns `true` if the connect result has been delivered.
    #[inline]
    #[must_use]
    pub fn connect_finished(&self) -> bool {
        self.inner.lock().connect_slot.is_none()
    }

    /// Binds the stream listener, replacing any previous binding.
    ///
    /// With `flush` set, buffered messages are delivered to the new
    /// listener in arrival order before this returns, and the buffer is
    /// left empty. Without it, buffered messages are retained and a later
    /// bind with `flush` set will deliver them.
    pub fn bind_listener(&self, listener: StreamListener, flush: bool) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if inner.listener.replace(listener).is_some() {
            debug!(id = %self.id, "stream listener replaced");
        }

        if flush {
            if let Some(bound) = &inner.listener {
                inner
                    .buffer
                    .drain_to(|payload| bound(StreamEvent::Message(payload)));
            }
        } else if !inner.buffer.is_empty() {
            debug!(
                id = %self.id,
                buffered = inner.buffer.len(),
                "listener bound without flush, buffer retained"
            );
        }
    }

    /// Routes an inbound message: direct delivery if bound, buffer if not.
    pub fn dispatch_message(&self, payload: MessagePayload) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        match &inner.listener {
            Some(listener) => listener(StreamEvent::Message(payload)),
            None => inner.buffer.push(payload),
        }
    }

    /// Delivers a close event to the bound listener.
    ///
    /// Close events are not buffered: with no listener bound the
    /// notification is dropped, and the terminal state remains queryable on
    /// the connection instead.
    pub fn dispatch_closed(&self, code: u16, reason: &str) {
        let inner = self.inner.lock();

        match &inner.listener {
            Some(listener) => listener(StreamEvent::Closed {
                code,
                reason: reason.to_string(),
            }),
            None => debug!(id = %self.id, code, reason, "close event dropped, no listener"),
        }
    }

    /// Delivers a terminal failure on every channel that is still open.
    ///
    /// Resolves the connect slot if the initial attempt had not finished,
    /// and notifies the bound listener if one exists.
    pub fn dispatch_failure(&self, code: u16, message: &str) {
        let connect_slot = {
            let mut inner = self.inner.lock();

            if let Some(listener) = &inner.listener {
                listener(StreamEvent::Failed {
                    code,
                    message: message.to_string(),
                });
            } else if inner.connect_slot.is_none() {
                warn!(id = %self.id, code, message, "failure dropped, no listener");
            }

            inner.connect_slot.take()
        };

        // Slot invocation happens outside the lock so a connect callback
        // may bind a listener.
        if let Some(callback) = connect_slot {
            callback(
                self.id,
                ConnectOutcome::Failed {
                    code,
                    message: message.to_string(),
                },
            );
        }
    }

    /// Returns the number of buffered messages.
    #[inline]
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.inner.lock().buffer.len()
    }

    /// Returns `true` if a stream listener is bound.
    #[inline]
    #[must_use]
    pub fn has_listener(&self) -> bool {
        self.inner.lock().listener.is_some()
    }
}

// ============================================================================
// Tests
// ============================================================================
