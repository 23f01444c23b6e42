//! Callback payloads and the binary boundary codec.
//!
//! Builders for the payload shapes delivered back to the host:
//!
//! - connect success: `{id, statusCode}`
//! - connect failure: `{id, code, message}`
//! - message event: `{type: "onMessage", id, message}`
//! - close event: `{type: "onClose", id, code, reason}`
//! - failure event: `{type: "onFail", id, code, message}`
//!
//! Plus the boundary encoding for byte sequences: a JSON object whose keys
//! are stringified sequential indices mapping to byte values, e.g.
//! `{"0":72,"1":105}` for `[72, 105]`.

// ============================================================================
// Imports
// ============================================================================

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Map, Value, json};

use crate::error::{Error, Result};
use crate::identifiers::ConnectionId;

// ============================================================================
// Connect Result Payloads
// ============================================================================

/// Builds the one-shot connect success payload.
#[inline]
#[must_use]
pub fn connect_success(id: ConnectionId, status_code: u16) -> Value {
    json!({ "id": id, "statusCode": status_code })
}

/// Builds the one-shot connect failure payload.
#[inline]
#[must_use]
pub fn connect_failure(id: ConnectionId, code: u16, message: &str) -> Value {
    json!({ "id": id, "code": code, "message": message })
}

// ============================================================================
// Stream Event Payloads
// ============================================================================

/// Builds an `onMessage` stream event payload.
#[inline]
#[must_use]
pub fn message_event(id: ConnectionId, message: &str) -> Value {
    json!({ "type": "onMessage", "id": id, "message": message })
}

/// Builds an `onClose` stream event payload.
#[inline]
#[must_use]
pub fn close_event(id: ConnectionId, code: u16, reason: &str) -> Value {
    json!({ "type": "onClose", "id": id, "code": code, "reason": reason })
}

/// Builds an `onFail` stream event payload.
#[inline]
#[must_use]
pub fn fail_event(id: ConnectionId, code: u16, message: &str) -> Value {
    json!({ "type": "onFail", "id": id, "code": code, "message": message })
}

// ============================================================================
// Binary Boundary Codec
// ============================================================================

/// Encodes inbound binary frame bytes for an `onMessage` payload.
///
/// Binary frames cross the boundary base64-encoded; text frames pass
/// through verbatim.
#[inline]
#[must_use]
pub fn encode_binary_message(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decodes the indexed-object byte encoding into a byte vector.
///
/// Bytes are placed by their parsed key index, not by map iteration order,
/// so `{"1":105,"0":72}` and `{"0":72,"1":105}` both decode to `[72, 105]`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the value is not an object, a key
/// is not a valid index into the sequence, or a value is outside 0–255.
pub fn decode_indexed_bytes(value: &Value) -> Result<Vec<u8>> {
    let map = value.as_object().ok_or_else(|| {
        Error::invalid_argument("binary payload must be an object of index keys")
    })?;

    let mut bytes = vec![0u8; map.len()];

    for (key, entry) in map {
        let index: usize = key.parse().map_err(|_| {
            Error::invalid_argument(format!("non-numeric byte index: {key:?}"))
        })?;

        if index >= bytes.len() {
            return Err(Error::invalid_argument(format!(
                "byte index {index} out of range for {} bytes",
                bytes.len()
            )));
        }

        let byte = entry
            .as_u64()
            .filter(|b| *b <= u64::from(u8::MAX))
            .ok_or_else(|| {
                Error::invalid_argument(format!("byte value at index {index} is not 0-255"))
            })?;

        bytes[index] = byte as u8;
    }

    Ok(bytes)
}

/// Encodes a byte slice into the indexed-object form.
#[must_use]
pub fn encode_indexed_bytes(bytes: &[u8]) -> Value {
    let mut map = Map::with_capacity(bytes.len());
    for (index, byte) in bytes.iter().enumerate() {
        map.insert(index.to_string(), Value::from(u64::from(*byte)));
    }
    Value::Object(map)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_connect_success_shape() {
        let id = ConnectionId::generate();
        let payload = connect_success(id, 101);

        assert_eq!(payload["id"], json!(id.to_string()));
        assert_eq!(payload["statusCode"], json!(101));
    }

    #[test]
    fn test_connect_failure_shape() {
        let id = ConnectionId::generate();
        let payload = connect_failure(id, 1006, "connection refused");

        assert_eq!(payload["code"], json!(1006));
        assert_eq!(payload["message"], json!("connection refused"));
    }

    #[test]
    fn test_message_event_shape() {
        let id = ConnectionId::generate();
        let payload = message_event(id, "hello");

        assert_eq!(payload["type"], json!("onMessage"));
        assert_eq!(payload["id"], json!(id.to_string()));
        assert_eq!(payload["message"], json!("hello"));
    }

    #[test]
    fn test_close_event_shape() {
        let id = ConnectionId::generate();
        let payload = close_event(id, 1000, "Disconnect");

        assert_eq!(payload["type"], json!("onClose"));
        assert_eq!(payload["code"], json!(1000));
        assert_eq!(payload["reason"], json!("Disconnect"));
    }

    #[test]
    fn test_fail_event_shape() {
        let id = ConnectionId::generate();
        let payload = fail_event(id, 1006, "reset");

        assert_eq!(payload["type"], json!("onFail"));
        assert_eq!(payload["code"], json!(1006));
    }

    #[test]
    fn test_decode_indexed_bytes_basic() {
        let decoded = decode_indexed_bytes(&json!({"0": 72, "1": 105})).expect("decode");
        assert_eq!(decoded, vec![72, 105]);
    }

    #[test]
    fn test_decode_indexed_bytes_key_order_irrelevant() {
        let decoded = decode_indexed_bytes(&json!({"1": 105, "0": 72})).expect("decode");
        assert_eq!(decoded, vec![72, 105]);
    }

    #[test]
    fn test_decode_indexed_bytes_empty() {
        let decoded = decode_indexed_bytes(&json!({})).expect("decode");
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(decode_indexed_bytes(&json!([72, 105])).is_err());
        assert!(decode_indexed_bytes(&json!("Hi")).is_err());
    }

    #[test]
    fn test_decode_rejects_non_numeric_key() {
        assert!(decode_indexed_bytes(&json!({"zero": 72})).is_err());
    }

    #[test]
    fn test_decode_rejects_out_of_range_index() {
        // Two entries but an index pointing past the sequence length.
        assert!(decode_indexed_bytes(&json!({"0": 72, "5": 105})).is_err());
    }

    #[test]
    fn test_decode_rejects_oversized_value() {
        assert!(decode_indexed_bytes(&json!({"0": 256})).is_err());
        assert!(decode_indexed_bytes(&json!({"0": -1})).is_err());
    }

    #[test]
    fn test_encode_binary_message_base64() {
        assert_eq!(encode_binary_message(b"Hi"), "SGk=");
    }

    proptest! {
        #[test]
        fn prop_indexed_bytes_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let encoded = encode_indexed_bytes(&bytes);
            let decoded = decode_indexed_bytes(&encoded).expect("roundtrip decode");
            prop_assert_eq!(decoded, bytes);
        }
    }
}
