//! Connection registry and lifecycle root.
//!
//! Maps opaque connection ids to live [`Connection`] handles. A registry
//! instance is owned by the host application's session: create one per
//! session, tear it down with [`ConnectionRegistry::remove_all`] when the
//! session ends. It is never a global.
//!
//! A connection stays registered for the registry's whole lifetime:
//! closing or failing changes its state but keeps the entry, so hosts can
//! still query terminal state by id. Only `remove_all` empties the map.

// ============================================================================
// Imports
// ============================================================================

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, info, trace};

use crate::config::ConnectOptions;
use crate::identifiers::ConnectionId;
use crate::transport::connection::Connection;
use crate::transport::dispatcher::ConnectCallback;

// ============================================================================
// Constants
// ============================================================================

/// Close code used for bulk teardown.
const TEARDOWN_CLOSE_CODE: u16 = 1000;

/// Close reason used for bulk teardown.
const TEARDOWN_CLOSE_REASON: &str = "Disconnect";

// ============================================================================
// ConnectionRegistry
// ============================================================================

/// Concurrency-safe mapping from connection id to [`Connection`].
///
/// Thread-safe: commands arrive from host threads while connect tasks and
/// event loops run on the runtime's workers.
///
/// # Example
///
/// ```ignore
/// let registry = Arc::new(ConnectionRegistry::new());
///
/// let id = registry.connect(options, Box::new(|id, outcome| { ... }));
/// let connection = registry.lookup(id).expect("registered before spawn");
///
/// registry.remove_all();
/// ```
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: RwLock<FxHashMap<ConnectionId, Connection>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        debug!("connection registry created");
        Self {
            connections: RwLock::new(FxHashMap::default()),
        }
    }

    /// Opens a new connection and returns its generated id.
    ///
    /// The connection is inserted in `Connecting` state before its connect
    /// task is spawned, so a lookup with the returned id can only observe a
    /// not-yet-open connection, never a missing one. Exactly one connect
    /// result is delivered to `on_connect` later.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect(&self, options: ConnectOptions, on_connect: ConnectCallback) -> ConnectionId {
        let id = ConnectionId::generate();
        let (connection, task) = Connection::prepare(id, options, on_connect);

        self.connections.write().insert(id, connection);
        tokio::spawn(task);

        debug!(id = %id, "connection registered");
        id
    }

    /// Looks up a connection by id.
    ///
    /// Returns a cheap clone of the handle; `None` if the id was never
    /// registered or the registry has been torn down.
    #[must_use]
    pub fn lookup(&self, id: ConnectionId) -> Option<Connection> {
        self.connections.read().get(&id).cloned()
    }

    /// Returns the number of registered connections.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.connections.read().len()
    }

    /// Returns `true` if no connections are registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connections.read().is_empty()
    }

    /// Closes every live connection and clears the map.
    ///
    /// Best-effort: each connection gets `close(1000, "Disconnect")` if it
    /// still accepts one, and the map is emptied without waiting for close
    /// acknowledgments. In-flight acks may race the teardown and be
    /// dropped.
    pub fn remove_all(&self) {
        let drained: Vec<_> = {
            let mut connections = self.connections.write();
            connections.drain().collect()
        };

        let count = drained.len();
        for (id, connection) in drained {
            if !connection.close(TEARDOWN_CLOSE_CODE, TEARDOWN_CLOSE_REASON) {
                trace!(id = %id, "connection already terminal at teardown");
            }
        }

        if count > 0 {
            info!(count, "registry teardown complete");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
