//! WebSocket connection state machine and event loop.
//!
//! A [`Connection`] is a cheap-clone handle over a background task that
//! owns the socket. The handle offers synchronous, non-blocking operations
//! (`send_text`, `send_binary`, `close`); the task performs the handshake,
//! pumps frames, and routes everything through the connection's
//! [`CallbackDispatcher`].
//!
//! # State Machine
//!
//! ```text
//! Connecting ──handshake ok──► Open ──close()──► Closing ──ack──► Closed
//!     │                          │                  │
//!     └────── transport error ───┴──────────────────┘──► Failed
//! ```
//!
//! `Closed` and `Failed` are terminal. A `close()` issued while still
//! `Connecting` is accepted: the close frame is queued and goes out as soon
//! as the handshake completes.

// ============================================================================
// Imports
// ============================================================================

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep_until, timeout};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request as HandshakeRequest;
use tokio_tungstenite::tungstenite::http::{HeaderName, HeaderValue};
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::{Bytes, Error as WsError, Message};
use tokio_tungstenite::{
    Connector, MaybeTlsStream, WebSocketStream, connect_async_tls_with_config,
};
use tracing::{debug, error, trace, warn};

use crate::config::ConnectOptions;
use crate::error::{Error, Result};
use crate::identifiers::ConnectionId;
use crate::transport::buffer::MessagePayload;
use crate::transport::dispatcher::{
    CallbackDispatcher, ConnectCallback, ConnectOutcome, StreamListener,
};

// ============================================================================
// Constants
// ============================================================================

/// Close code reported for abnormal transport failures (RFC 6455 7.4.1).
const ABNORMAL_CLOSE_CODE: u16 = 1006;

/// Close code reported when the peer's close frame carried no status.
const NO_STATUS_CLOSE_CODE: u16 = 1005;

// ============================================================================
// ConnectionState
// ============================================================================

/// Lifecycle state of one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Handshake in progress.
    Connecting,
    /// Frames flowing; sends accepted.
    Open,
    /// Close frame queued or sent, awaiting acknowledgment.
    Closing,
    /// Closing handshake completed (terminal).
    Closed,
    /// Transport failure (terminal).
    Failed,
}

impl ConnectionState {
    /// Returns `true` for terminal states.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Failed)
    }

    /// Returns `true` if message sends are accepted.
    #[inline]
    #[must_use]
    pub const fn can_send(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns `true` if a close request is accepted.
    #[inline]
    #[must_use]
    pub const fn can_close(&self) -> bool {
        matches!(self, Self::Connecting | Self::Open)
    }
}

// ============================================================================
// ConnectionCommand
// ============================================================================

/// Commands from handle methods to the event loop.
enum ConnectionCommand {
    /// Write a text frame.
    SendText(String),
    /// Write a binary frame.
    SendBinary(Vec<u8>),
    /// Initiate the closing handshake.
    Close { code: u16, reason: String },
}

// ============================================================================
// ConnectionShared
// ============================================================================

/// State shared between handles and the event loop.
pub(crate) struct ConnectionShared {
    id: ConnectionId,
    state: Mutex<ConnectionState>,
    dispatcher: CallbackDispatcher,
}

impl ConnectionShared {
    fn current_state(&self) -> ConnectionState {
        *self.state.lock()
    }

    /// `Connecting → Open`; a no-op from any other state (a close issued
    /// during the handshake must not be overwritten).
    fn transition_open(&self) {
        let mut state = self.state.lock();
        if *state == ConnectionState::Connecting {
            *state = ConnectionState::Open;
        }
    }

    /// Any non-terminal state → `Closed`.
    fn transition_closed(&self) {
        let mut state = self.state.lock();
        if !state.is_terminal() {
            *state = ConnectionState::Closed;
        }
    }

    /// Marks the connection failed and delivers the failure on every open
    /// callback channel. No-op once terminal.
    fn fail(&self, code: u16, message: &str) {
        {
            let mut state = self.state.lock();
            if state.is_terminal() {
                trace!(id = %self.id, code, message, "failure after terminal state ignored");
                return;
            }
            *state = ConnectionState::Failed;
        }

        self.dispatcher.dispatch_failure(code, message);
    }
}

// ============================================================================
// Connection
// ============================================================================

/// Handle to one WebSocket connection.
///
/// # Thread Safety
///
/// `Connection` is `Send + Sync` and cheap to clone; all operations are
/// non-blocking. State checks and command submission happen under the
/// state lock, so a send observed as accepted was queued while the
/// connection was `Open`.
pub struct Connection {
    id: ConnectionId,
    command_tx: mpsc::UnboundedSender<ConnectionCommand>,
    shared: Arc<ConnectionShared>,
}

impl Clone for Connection {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            command_tx: self.command_tx.clone(),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Connection {
    /// Creates the handle and the connect task for it.
    ///
    /// The caller registers the handle first and then spawns the task, so
    /// the connection is visible in the registry before the handshake can
    /// produce any event.
    pub(crate) fn prepare(
        id: ConnectionId,
        options: ConnectOptions,
        on_connect: ConnectCallback,
    ) -> (Self, impl Future<Output = ()> + Send) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let shared = Arc::new(ConnectionShared {
            id,
            state: Mutex::new(ConnectionState::Connecting),
            dispatcher: CallbackDispatcher::new(id, on_connect),
        });

        let task = run_connection(Arc::clone(&shared), options, command_rx);

        (
            Self {
                id,
                command_tx,
                shared,
            },
            task,
        )
    }

    /// Returns the connection id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Returns the current lifecycle state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.shared.current_state()
    }

    /// Queues a text frame.
    ///
    /// Returns `true` if the connection was `Open` and the frame was
    /// accepted for writing; acceptance does not wait for the write.
    pub fn send_text(&self, text: impl Into<String>) -> bool {
        let state = self.shared.state.lock();
        if !state.can_send() {
            return false;
        }
        self.command_tx
            .send(ConnectionCommand::SendText(text.into()))
            .is_ok()
    }

    /// Queues a binary frame.
    ///
    /// Same acceptance semantics as [`Connection::send_text`].
    pub fn send_binary(&self, bytes: Vec<u8>) -> bool {
        let state = self.shared.state.lock();
        if !state.can_send() {
            return false;
        }
        self.command_tx
            .send(ConnectionCommand::SendBinary(bytes))
            .is_ok()
    }

    /// Initiates the closing handshake.
    ///
    /// Accepted from `Connecting` or `Open`; the state moves to `Closing`
    /// and the peer's acknowledgment drives it to `Closed`. Returns `false`
    /// from any other state.
    pub fn close(&self, code: u16, reason: impl Into<String>) -> bool {
        let mut state = self.shared.state.lock();
        if !state.can_close() {
            return false;
        }

        let accepted = self
            .command_tx
            .send(ConnectionCommand::Close {
                code,
                reason: reason.into(),
            })
            .is_ok();

        if accepted {
            *state = ConnectionState::Closing;
        }
        accepted
    }

    /// Binds the stream listener; see
    /// [`CallbackDispatcher::bind_listener`].
    pub fn bind_listener(&self, listener: StreamListener, flush: bool) {
        self.shared.dispatcher.bind_listener(listener, flush);
    }

    /// Returns the number of messages waiting for a listener.
    #[inline]
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.shared.dispatcher.buffered_len()
    }

    /// Returns `true` if the connect result has been delivered.
    #[inline]
    #[must_use]
    pub fn connect_finished(&self) -> bool {
        self.shared.dispatcher.connect_finished()
    }
}

// ============================================================================
// Connect Task
// ============================================================================

/// Performs the handshake, then runs the event loop until the connection
/// reaches a terminal state.
async fn run_connection(
    shared: Arc<ConnectionShared>,
    options: ConnectOptions,
    command_rx: mpsc::UnboundedReceiver<ConnectionCommand>,
) {
    let (request, connector) = match prepare_handshake(&options) {
        Ok(parts) => parts,
        Err(e) => {
            shared.fail(ABNORMAL_CLOSE_CODE, &e.to_string());
            return;
        }
    };

    let connect = connect_async_tls_with_config(request, None, false, connector);
    let connected = if options.timeout_ms > 0 {
        match timeout(Duration::from_millis(options.timeout_ms), connect).await {
            Ok(result) => result,
            Err(_) => {
                shared.fail(ABNORMAL_CLOSE_CODE, "connection timed out");
                return;
            }
        }
    } else {
        connect.await
    };

    let (ws_stream, response) = match connected {
        Ok(pair) => pair,
        Err(e) => {
            let (code, message) = handshake_failure(&e);
            shared.fail(code, &message);
            return;
        }
    };

    let status = response.status().as_u16();
    shared.transition_open();
    shared
        .dispatcher
        .resolve_connect(ConnectOutcome::Opened { status });
    debug!(id = %shared.id, status, "connection open");

    run_event_loop(shared, &options, ws_stream, command_rx).await;
}

/// Builds the upgrade request (with headers) and the optional TLS
/// connector for this connection.
fn prepare_handshake(
    options: &ConnectOptions,
) -> Result<(HandshakeRequest, Option<Connector>)> {
    let mut request = options.url.as_str().into_client_request()?;

    for (name, value) in &options.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::invalid_argument(format!("invalid header name: {name:?}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| Error::invalid_argument(format!("invalid header value for {name:?}")))?;
        request.headers_mut().insert(header_name, header_value);
    }

    Ok((request, build_connector(options)?))
}

/// Returns the trust-all TLS connector when this single connection opted
/// into it, `None` (library default validation) otherwise.
fn build_connector(options: &ConnectOptions) -> Result<Option<Connector>> {
    if !options.bypasses_tls_validation() {
        return Ok(None);
    }

    warn!(url = %options.url, "certificate and hostname validation disabled for this connection");

    let tls = native_tls::TlsConnector::builder()
        .danger_accept_invalid_certs(true)
        .danger_accept_invalid_hostnames(true)
        .build()?;

    Ok(Some(Connector::NativeTls(tls)))
}

/// Maps a handshake error to a `{code, message}` failure pair.
///
/// Rejected upgrades keep their HTTP status; everything else reports the
/// abnormal-closure code.
fn handshake_failure(error: &WsError) -> (u16, String) {
    match error {
        WsError::Http(response) => (
            response.status().as_u16(),
            format!("handshake rejected: {}", response.status()),
        ),
        other => (ABNORMAL_CLOSE_CODE, other.to_string()),
    }
}

// ============================================================================
// Event Loop
// ============================================================================

/// Pumps inbound frames, outbound commands, pings, and the idle watchdog.
async fn run_event_loop(
    shared: Arc<ConnectionShared>,
    options: &ConnectOptions,
    ws_stream: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
    mut command_rx: mpsc::UnboundedReceiver<ConnectionCommand>,
) {
    let (mut ws_write, mut ws_read) = ws_stream.split();

    let ping_enabled = options.ping_interval_ms > 0;
    let ping_period = Duration::from_millis(options.ping_interval_ms.max(1));
    let mut ping = interval_at(Instant::now() + ping_period, ping_period);
    ping.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let idle_enabled = options.timeout_ms > 0;
    let idle_window = Duration::from_millis(options.timeout_ms.max(1));
    let mut idle_deadline = Instant::now() + idle_window;

    loop {
        tokio::select! {
            message = ws_read.next() => {
                idle_deadline = Instant::now() + idle_window;
                match message {
                    Some(Ok(Message::Text(text))) => {
                        trace!(id = %shared.id, len = text.len(), "text frame");
                        shared
                            .dispatcher
                            .dispatch_message(MessagePayload::Text(text.as_str().to_owned()));
                    }

                    Some(Ok(Message::Binary(bytes))) => {
                        trace!(id = %shared.id, len = bytes.len(), "binary frame");
                        shared
                            .dispatcher
                            .dispatch_message(MessagePayload::Binary(bytes.to_vec()));
                    }

                    Some(Ok(Message::Close(frame))) => {
                        let (code, reason) = match frame {
                            Some(frame) => {
                                (u16::from(frame.code), frame.reason.as_str().to_owned())
                            }
                            None => (NO_STATUS_CLOSE_CODE, String::new()),
                        };
                        debug!(id = %shared.id, code, reason = %reason, "close frame received");
                        shared.transition_closed();
                        shared.dispatcher.dispatch_closed(code, &reason);
                        break;
                    }

                    // Ping/Pong are answered by the protocol layer.
                    Some(Ok(_)) => {}

                    Some(Err(e)) => {
                        error!(id = %shared.id, error = %e, "WebSocket error");
                        shared.fail(ABNORMAL_CLOSE_CODE, &e.to_string());
                        break;
                    }

                    None => {
                        shared.fail(ABNORMAL_CLOSE_CODE, "connection reset");
                        break;
                    }
                }
            }

            command = command_rx.recv() => {
                match command {
                    Some(ConnectionCommand::SendText(text)) => {
                        if let Err(e) = ws_write.send(Message::Text(text.into())).await {
                            warn!(id = %shared.id, error = %e, "text send failed");
                        }
                    }

                    Some(ConnectionCommand::SendBinary(bytes)) => {
                        if let Err(e) = ws_write.send(Message::Binary(bytes.into())).await {
                            warn!(id = %shared.id, error = %e, "binary send failed");
                        }
                    }

                    Some(ConnectionCommand::Close { code, reason }) => {
                        debug!(id = %shared.id, code, reason = %reason, "closing handshake initiated");
                        let frame = CloseFrame {
                            code: CloseCode::from(code),
                            reason: reason.into(),
                        };
                        if let Err(e) = ws_write.send(Message::Close(Some(frame))).await {
                            warn!(id = %shared.id, error = %e, "close send failed");
                            shared.fail(ABNORMAL_CLOSE_CODE, &e.to_string());
                            break;
                        }
                        // Keep reading until the peer acknowledges.
                    }

                    None => {
                        // Every handle is gone; nothing can observe this
                        // connection anymore.
                        debug!(id = %shared.id, "all handles dropped, closing socket");
                        let _ = ws_write.close().await;
                        shared.transition_closed();
                        break;
                    }
                }
            }

            _ = ping.tick(), if ping_enabled => {
                if let Err(e) = ws_write.send(Message::Ping(Bytes::new())).await {
                    warn!(id = %shared.id, error = %e, "ping send failed");
                }
            }

            _ = sleep_until(idle_deadline), if idle_enabled => {
                shared.fail(ABNORMAL_CLOSE_CODE, "read timed out");
                break;
            }
        }
    }

    debug!(id = %shared.id, "event loop terminated");
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::net::TcpListener;
    use tokio::sync::mpsc as async_mpsc;
    use tokio::time::sleep;

    use crate::transport::dispatcher::StreamEvent;

    /// Binds a loopback echo server; text and binary frames come straight
    /// back, close frames are acknowledged by the protocol layer.
    async fn spawn_echo_server() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind echo server");
        let port = listener.local_addr().expect("local addr").port();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut ws = tokio_tungstenite::accept_async(stream)
                        .await
                        .expect("ws accept");
                    while let Some(Ok(message)) = ws.next().await {
                        match message {
                            Message::Text(_) | Message::Binary(_) => {
                                if ws.send(message).await.is_err() {
                                    break;
                                }
                            }
                            _ => {}
                        }
                    }
                });
            }
        });

        port
    }

    fn spawn_with(
        options: ConnectOptions,
    ) -> (Connection, async_mpsc::UnboundedReceiver<ConnectOutcome>) {
        let (result_tx, result_rx) = async_mpsc::unbounded_channel();
        let (connection, task) = Connection::prepare(
            ConnectionId::generate(),
            options,
            Box::new(move |_, outcome| {
                let _ = result_tx.send(outcome);
            }),
        );
        tokio::spawn(task);
        (connection, result_rx)
    }

    fn connect_to(
        url: impl Into<String>,
    ) -> (Connection, async_mpsc::UnboundedReceiver<ConnectOutcome>) {
        spawn_with(ConnectOptions::new(url.into()))
    }

    fn event_sink() -> (
        StreamListener,
        async_mpsc::UnboundedReceiver<StreamEvent>,
    ) {
        let (tx, rx) = async_mpsc::unbounded_channel();
        let listener: StreamListener = Box::new(move |event| {
            let _ = tx.send(event);
        });
        (listener, rx)
    }

    async fn wait_buffered(connection: &Connection, count: usize) {
        for _ in 0..100 {
            if connection.buffered_len() >= count {
                return;
            }
            sleep(Duration::from_millis(10)).await;
        }
        panic!("expected {count} buffered message(s), saw {}", connection.buffered_len());
    }

    #[tokio::test]
    async fn test_connect_delivers_one_shot_success() {
        let port = spawn_echo_server().await;
        let (connection, mut results) = connect_to(format!("ws://127.0.0.1:{port}"));

        let outcome = results.recv().await.expect("connect outcome");
        assert_eq!(outcome, ConnectOutcome::Opened { status: 101 });
        assert_eq!(connection.state(), ConnectionState::Open);
        assert!(connection.connect_finished());
    }

    #[tokio::test]
    async fn test_connect_failure_is_terminal() {
        // Nothing listens on port 1.
        let (connection, mut results) = connect_to("ws://127.0.0.1:1");

        let outcome = results.recv().await.expect("connect outcome");
        match outcome {
            ConnectOutcome::Failed { code, .. } => assert_eq!(code, ABNORMAL_CLOSE_CODE),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(connection.state(), ConnectionState::Failed);
    }

    #[tokio::test]
    async fn test_connect_timeout_fails() {
        // A listener that accepts but never speaks WebSocket.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        tokio::spawn(async move {
            let _held = listener.accept().await;
            sleep(Duration::from_secs(60)).await;
        });

        let options = ConnectOptions::new(format!("ws://127.0.0.1:{port}")).with_timeout_ms(200);
        let (connection, mut results) = spawn_with(options);

        let outcome = results.recv().await.expect("connect outcome");
        assert_eq!(
            outcome,
            ConnectOutcome::Failed {
                code: ABNORMAL_CLOSE_CODE,
                message: "connection timed out".into()
            }
        );
        assert_eq!(connection.state(), ConnectionState::Failed);
    }

    #[tokio::test]
    async fn test_send_rejected_before_open() {
        let (connection, _task) = Connection::prepare(
            ConnectionId::generate(),
            ConnectOptions::new("ws://127.0.0.1:1"),
            Box::new(|_, _| {}),
        );

        // Task never spawned: still Connecting.
        assert_eq!(connection.state(), ConnectionState::Connecting);
        assert!(!connection.send_text("early"));
        assert!(!connection.send_binary(vec![1]));
    }

    #[tokio::test]
    async fn test_echo_buffers_then_flushes_in_order() {
        let port = spawn_echo_server().await;
        let (connection, mut results) = connect_to(format!("ws://127.0.0.1:{port}"));
        results.recv().await.expect("connect outcome");

        assert!(connection.send_text("first"));
        assert!(connection.send_text("second"));
        wait_buffered(&connection, 2).await;

        let (listener, mut events) = event_sink();
        connection.bind_listener(listener, true);

        assert_eq!(
            events.recv().await,
            Some(StreamEvent::Message(MessagePayload::Text("first".into())))
        );
        assert_eq!(
            events.recv().await,
            Some(StreamEvent::Message(MessagePayload::Text("second".into())))
        );
        assert_eq!(connection.buffered_len(), 0);
    }

    #[tokio::test]
    async fn test_binary_echo_roundtrip() {
        let port = spawn_echo_server().await;
        let (connection, mut results) = connect_to(format!("ws://127.0.0.1:{port}"));
        results.recv().await.expect("connect outcome");

        let (listener, mut events) = event_sink();
        connection.bind_listener(listener, true);

        assert!(connection.send_binary(vec![72, 105]));
        assert_eq!(
            events.recv().await,
            Some(StreamEvent::Message(MessagePayload::Binary(vec![72, 105])))
        );
    }

    #[tokio::test]
    async fn test_close_drives_closing_to_closed() {
        let port = spawn_echo_server().await;
        let (connection, mut results) = connect_to(format!("ws://127.0.0.1:{port}"));
        results.recv().await.expect("connect outcome");

        let (listener, mut events) = event_sink();
        connection.bind_listener(listener, true);

        assert!(connection.close(1000, "bye"));
        assert_eq!(connection.state(), ConnectionState::Closing);

        let event = events.recv().await.expect("close event");
        assert!(matches!(event, StreamEvent::Closed { code: 1000, .. }));
        assert_eq!(connection.state(), ConnectionState::Closed);

        // Terminal: no further sends or closes, and no further events.
        assert!(!connection.send_text("late"));
        assert!(!connection.close(1000, "again"));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_close_rejected_after_terminal() {
        let (connection, mut results) = connect_to("ws://127.0.0.1:1");
        results.recv().await.expect("connect outcome");

        assert_eq!(connection.state(), ConnectionState::Failed);
        assert!(!connection.close(1000, "too late"));
    }

    #[test]
    fn test_state_predicates() {
        assert!(ConnectionState::Open.can_send());
        assert!(!ConnectionState::Connecting.can_send());
        assert!(!ConnectionState::Closing.can_send());

        assert!(ConnectionState::Connecting.can_close());
        assert!(ConnectionState::Open.can_close());
        assert!(!ConnectionState::Closed.can_close());

        assert!(ConnectionState::Closed.is_terminal());
        assert!(ConnectionState::Failed.is_terminal());
        assert!(!ConnectionState::Open.is_terminal());
    }

    #[test]
    fn test_handshake_failure_maps_codes() {
        let (code, message) = handshake_failure(&WsError::ConnectionClosed);
        assert_eq!(code, ABNORMAL_CLOSE_CODE);
        assert!(!message.is_empty());
    }

    #[test]
    fn test_prepare_handshake_applies_headers() {
        let options = ConnectOptions::new("ws://example.com/socket")
            .with_header("Authorization", "Bearer token");
        let (request, connector) = prepare_handshake(&options).expect("handshake parts");

        assert_eq!(
            request
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok()),
            Some("Bearer token")
        );
        assert!(connector.is_none());
    }

    #[test]
    fn test_prepare_handshake_rejects_bad_header() {
        let options = ConnectOptions::new("ws://example.com").with_header("bad name", "v");
        assert!(prepare_handshake(&options).is_err());
    }

    #[test]
    fn test_connector_only_for_insecure_wss() {
        use crate::config::TlsPolicy;

        let verified = ConnectOptions::new("wss://example.com");
        assert!(build_connector(&verified).expect("connector").is_none());

        let insecure = ConnectOptions::new("wss://example.com")
            .with_tls_policy(TlsPolicy::dangerously_accept_invalid());
        assert!(build_connector(&insecure).expect("connector").is_some());

        // The override is inert for plain ws:// URLs.
        let plain = ConnectOptions::new("ws://example.com")
            .with_tls_policy(TlsPolicy::dangerously_accept_invalid());
        assert!(build_connector(&plain).expect("connector").is_none());
    }
}
