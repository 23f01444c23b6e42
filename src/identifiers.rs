//! Type-safe identifier for WebSocket connections.
//!
//! A [`ConnectionId`] is an opaque handle generated when a connection is
//! created. Hosts treat it as a string token: it is handed out by `connect`,
//! and every later command names its target connection with it.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ConnectionId
// ============================================================================

/// Opaque unique identifier for one WebSocket session.
///
/// Generated at connection creation, unique for the lifetime of the
/// registry. Serializes as the hyphenated UUID string the host sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generates a new random connection id.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[inline]
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ConnectionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_unique() {
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_roundtrip() {
        let id = ConnectionId::generate();
        let parsed: ConnectionId = id.to_string().parse().expect("parse own display");
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<ConnectionId>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let id = ConnectionId::generate();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{id}\""));

        let back: ConnectionId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, back);
    }
}
