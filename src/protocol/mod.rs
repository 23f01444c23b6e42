//! Host-boundary message types.
//!
//! This module defines the shapes crossing the host bridge: typed command
//! requests coming in, and callback payloads going out.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Typed request structs for the five bridge commands |
//! | `payload` | Callback payload builders and the binary boundary codec |

// ============================================================================
// Submodules
// ============================================================================

/// Typed command request structs.
pub mod command;

/// Callback payload builders and binary codec.
pub mod payload;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{
    CloseRequest, ConnectRequest, ListenRequest, SendBinaryRequest, SendTextRequest,
};
pub use payload::{decode_indexed_bytes, encode_indexed_bytes};
