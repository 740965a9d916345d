// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

use serde_json::Value as JsonValue;

use super::literal::parse_literal;
use crate::{declared::Kind, payload::OpaquePayload, value::Value, ProtocolError};

/// Encode a non-tensor value as a byte payload called `name`.
///
/// Strings are sent as their UTF-8 bytes; anything else is rendered as
/// compact JSON first.
pub fn encode(value: &JsonValue, name: &str) -> Result<OpaquePayload, ProtocolError> {
    let bytes = match value {
        JsonValue::String(text) => text.as_bytes().to_vec(),
        other => serde_json::to_vec(other).map_err(|e| ProtocolError::Internal(e.into()))?,
    };

    Ok(OpaquePayload::new(name, bytes))
}

/// Decode an opaque payload according to the declared `kind`.
///
/// * [`Kind::Bytes`] returns the raw bytes.
/// * [`Kind::Str`] returns the UTF-8 text.
/// * Every other kind parses the text as a literal and checks that it
///   matches the kind.
pub fn decode(payload: &OpaquePayload, kind: Kind) -> Result<Value, ProtocolError> {
    if kind == Kind::Bytes {
        return Ok(Value::Bytes(payload.data.clone()));
    }

    let text = text(payload)?;
    if kind == Kind::Str {
        return Ok(Value::Opaque(JsonValue::String(text.to_owned())));
    }

    let value = parse_literal(text).map_err(|reason| ProtocolError::MalformedLiteral {
        name: payload.name.clone(),
        reason,
    })?;

    if !kind.accepts(&value) {
        return Err(ProtocolError::MalformedLiteral {
            name: payload.name.clone(),
            reason: format!("expected a {} but found {}", kind, value),
        });
    }

    Ok(Value::Opaque(value))
}

pub(crate) fn text(payload: &OpaquePayload) -> Result<&str, ProtocolError> {
    std::str::from_utf8(&payload.data).map_err(|e| ProtocolError::MalformedLiteral {
        name: payload.name.clone(),
        reason: format!("invalid UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn round_trip(value: JsonValue, kind: Kind) -> Value {
        let payload = encode(&value, "a").unwrap();
        decode(&payload, kind).unwrap()
    }

    #[test]
    fn string_is_raw_utf8() {
        let payload = encode(&json!("abc"), "a").unwrap();
        assert_eq!(payload.data, vec![97, 98, 99]);
        assert_eq!(payload.shape, vec![3]);
        assert_eq!(payload.datatype, "BYTES");

        assert_eq!(decode(&payload, Kind::Str).unwrap(), Value::from("abc"));
    }

    #[test]
    fn round_trips() {
        assert_eq!(round_trip(json!("abc"), Kind::Str), Value::from("abc"));
        assert_eq!(
            round_trip(json!({"a": 1}), Kind::Dict),
            Value::Opaque(json!({"a": 1}))
        );
        assert_eq!(
            round_trip(json!([1, 2, 3]), Kind::List),
            Value::Opaque(json!([1, 2, 3]))
        );
        assert_eq!(round_trip(json!(42), Kind::Int), Value::Opaque(json!(42)));
    }

    #[test]
    fn canonical_text_is_json() {
        let payload = encode(&json!({"a": 1}), "a").unwrap();
        assert_eq!(payload.data, br#"{"a":1}"#.to_vec());
    }

    #[test]
    fn legacy_literal() {
        let payload = OpaquePayload::new("a", b"{'a': (1, 2)}".to_vec());
        assert_eq!(
            decode(&payload, Kind::Dict).unwrap(),
            Value::Opaque(json!({"a": [1, 2]}))
        );
    }

    #[test]
    fn malformed() {
        let payload = OpaquePayload::new("a", b"abc".to_vec());
        assert!(matches!(
            decode(&payload, Kind::Dict),
            Err(ProtocolError::MalformedLiteral { ref name, .. }) if name == "a"
        ));
    }

    #[test]
    fn kind_mismatch() {
        let payload = encode(&json!([1, 2]), "a").unwrap();
        assert!(matches!(
            decode(&payload, Kind::Dict),
            Err(ProtocolError::MalformedLiteral { .. })
        ));
    }

    #[test]
    fn bytes_pass_through() {
        let payload = OpaquePayload::new("a", vec![0, 159, 146, 150]);
        assert_eq!(
            decode(&payload, Kind::Bytes).unwrap(),
            Value::Bytes(vec![0, 159, 146, 150])
        );
        assert!(decode(&payload, Kind::Str).is_err());
    }
}
