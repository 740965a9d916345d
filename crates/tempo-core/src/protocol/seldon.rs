use serde_json::{json, Value as JsonValue};

use super::{malformed, single_argument, Protocol, ProtocolKind};
use crate::{
    codec::{nested, parse_literal},
    declared::{DeclaredType, Kind},
    value::{Arguments, Decoded, Value},
    ProtocolError,
};

const NAME: &str = "seldon";

/// The Seldon Core V1 prediction protocol.
///
/// Carries one value per message: tensors as `data.ndarray`, strings as
/// `strData` and anything else as `jsonData`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeldonProtocol;

impl SeldonProtocol {
    fn encode(&self, args: &Arguments) -> Result<JsonValue, ProtocolError> {
        match single_argument(NAME, args)? {
            Value::Tensor(tensor) => Ok(json!({
                "data": {
                    "names": [],
                    "ndarray": nested::to_nested(tensor, "ndarray")?,
                }
            })),
            Value::Opaque(JsonValue::String(text)) => Ok(json!({ "strData": text })),
            Value::Opaque(value) => Ok(json!({ "jsonData": value })),
            Value::Bytes(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => Ok(json!({ "strData": text })),
                Err(_) => Err(ProtocolError::UnsupportedValue {
                    protocol: NAME,
                    what: "non UTF-8 bytes",
                }),
            },
        }
    }

    fn decode(&self, body: &JsonValue, declared: &DeclaredType) -> Result<Decoded, ProtocolError> {
        let value = if let Some(data) = body.get("data") {
            let kind = declared.resolve("ndarray", 0);
            if !kind.is_tensor() {
                return Err(ProtocolError::UnsupportedDeclaredType {
                    name: "data".to_owned(),
                    index: 0,
                    tag: "ndarray".to_owned(),
                    kind,
                });
            }

            let ndarray = data
                .get("ndarray")
                .ok_or_else(|| malformed(NAME, "has data without an ndarray"))?;

            Value::Tensor(nested::from_nested(ndarray, "ndarray")?)
        } else if let Some(text) = body.get("strData") {
            let text = text
                .as_str()
                .ok_or_else(|| malformed(NAME, "has a non-string strData"))?;

            decode_text(text, declared.resolve("strData", 0))?
        } else if let Some(value) = body.get("jsonData") {
            let kind = declared
                .get_by_name("jsonData")
                .or_else(|| declared.get_by_index(0));
            decode_json(value, kind)?
        } else {
            return Err(malformed(
                NAME,
                "has none of data, strData or jsonData",
            ));
        };

        Ok(Decoded::Single(value))
    }
}

/// `strData` holds text, but a model declaring a literal kind gets it parsed.
fn decode_text(text: &str, kind: Kind) -> Result<Value, ProtocolError> {
    match kind {
        Kind::Str | Kind::Tensor | Kind::Json => Ok(Value::from(text)),
        Kind::Bytes => Ok(Value::Bytes(text.as_bytes().to_vec())),
        _ => {
            let literal = parse_literal(text).map_err(|reason| ProtocolError::MalformedLiteral {
                name: "strData".to_owned(),
                reason,
            })?;

            if !kind.accepts(&literal) {
                return Err(ProtocolError::MalformedLiteral {
                    name: "strData".to_owned(),
                    reason: format!("expected a {} literal", kind),
                });
            }

            Ok(Value::Opaque(literal))
        }
    }
}

/// `jsonData` holds a structured value, which must fit the declared kind
/// when there is one.
fn decode_json(value: &JsonValue, kind: Option<Kind>) -> Result<Value, ProtocolError> {
    let kind = match kind {
        Some(kind) => kind,
        None => return Ok(Value::Opaque(value.clone())),
    };

    if matches!(kind, Kind::Tensor | Kind::Bytes) {
        return Err(ProtocolError::UnsupportedDeclaredType {
            name: "jsonData".to_owned(),
            index: 0,
            tag: "jsonData".to_owned(),
            kind,
        });
    }

    if !kind.accepts(value) {
        return Err(ProtocolError::MalformedLiteral {
            name: "jsonData".to_owned(),
            reason: format!("expected a {} value", kind),
        });
    }

    Ok(Value::Opaque(value.clone()))
}

impl Protocol for SeldonProtocol {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Seldon
    }

    fn predict_path(&self, _model_name: &str) -> String {
        "/api/v1.0/predictions".to_owned()
    }

    fn status_path(&self, _model_name: &str) -> String {
        "/health/status".to_owned()
    }

    fn encode_request(&self, args: &Arguments) -> Result<JsonValue, ProtocolError> {
        self.encode(args)
    }

    fn decode_request(
        &self,
        body: &JsonValue,
        declared: &DeclaredType,
    ) -> Result<Decoded, ProtocolError> {
        self.decode(body, declared)
    }

    fn encode_response(
        &self,
        model_name: &str,
        outputs: &Arguments,
    ) -> Result<JsonValue, ProtocolError> {
        let mut body = self.encode(outputs)?;
        if let Some(object) = body.as_object_mut() {
            let mut path = serde_json::Map::new();
            path.insert(model_name.to_owned(), JsonValue::from(""));
            object.insert("meta".to_owned(), json!({ "requestPath": path }));
        }

        Ok(body)
    }

    fn decode_response(
        &self,
        body: &JsonValue,
        declared: &DeclaredType,
    ) -> Result<Decoded, ProtocolError> {
        self.decode(body, declared)
    }
}
