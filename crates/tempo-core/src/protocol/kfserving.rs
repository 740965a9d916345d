use serde_json::Value as JsonValue;

use super::{malformed, single_argument, Protocol, ProtocolKind};
use crate::{
    codec::nested,
    declared::DeclaredType,
    value::{Arguments, Decoded, Value},
    ProtocolError,
};

const NAME: &str = "kfserving-v1";

/// The TensorFlow Serving style protocol of KFServing V1: a single tensor
/// under `instances` going in and `predictions` coming back.
#[derive(Debug, Clone, Copy, Default)]
pub struct KfServingV1Protocol;

impl KfServingV1Protocol {
    fn encode(&self, key: &str, args: &Arguments) -> Result<JsonValue, ProtocolError> {
        match single_argument(NAME, args)? {
            Value::Tensor(tensor) => {
                let mut body = serde_json::Map::new();
                body.insert(key.to_owned(), nested::to_nested(tensor, key)?);
                Ok(JsonValue::Object(body))
            }
            Value::Opaque(_) => Err(ProtocolError::UnsupportedValue {
                protocol: NAME,
                what: "opaque values",
            }),
            Value::Bytes(_) => Err(ProtocolError::UnsupportedValue {
                protocol: NAME,
                what: "raw bytes",
            }),
        }
    }

    fn decode(
        &self,
        key: &str,
        body: &JsonValue,
        declared: &DeclaredType,
    ) -> Result<Decoded, ProtocolError> {
        let kind = declared.resolve(key, 0);
        if !kind.is_tensor() {
            return Err(ProtocolError::UnsupportedDeclaredType {
                name: key.to_owned(),
                index: 0,
                tag: "ndarray".to_owned(),
                kind,
            });
        }

        let data = body
            .get(key)
            .ok_or_else(|| malformed(NAME, format!("is missing {}", key)))?;

        Ok(Decoded::Single(Value::Tensor(nested::from_nested(data, key)?)))
    }
}

impl Protocol for KfServingV1Protocol {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::KfServingV1
    }

    fn predict_path(&self, model_name: &str) -> String {
        format!("/v1/models/{}:predict", model_name)
    }

    fn status_path(&self, model_name: &str) -> String {
        format!("/v1/models/{}", model_name)
    }

    fn encode_request(&self, args: &Arguments) -> Result<JsonValue, ProtocolError> {
        self.encode("instances", args)
    }

    fn decode_request(
        &self,
        body: &JsonValue,
        declared: &DeclaredType,
    ) -> Result<Decoded, ProtocolError> {
        self.decode("instances", body, declared)
    }

    fn encode_response(
        &self,
        _model_name: &str,
        outputs: &Arguments,
    ) -> Result<JsonValue, ProtocolError> {
        self.encode("predictions", outputs)
    }

    fn decode_response(
        &self,
        body: &JsonValue,
        declared: &DeclaredType,
    ) -> Result<Decoded, ProtocolError> {
        self.decode("predictions", body, declared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declared::Kind;
    use serde_json::json;
    use tract_core::prelude::Tensor;

    #[test]
    fn instances() {
        let tensor = Tensor::from_shape(&[2, 2], &[1i64, 2, 3, 4]).unwrap();
        let body = KfServingV1Protocol
            .encode_request(&Arguments::single(tensor.clone()))
            .unwrap();
        assert_eq!(body, json!({"instances": [[1, 2], [3, 4]]}));

        let decoded = KfServingV1Protocol
            .decode_request(&body, &DeclaredType::new())
            .unwrap();
        assert_eq!(decoded, Decoded::Single(Value::Tensor(tensor)));
    }

    #[test]
    fn predictions() {
        let tensor = Tensor::from_shape(&[2], &[0.5f64, 1.5]).unwrap();
        let body = KfServingV1Protocol
            .encode_response("m", &Arguments::single(tensor.clone()))
            .unwrap();
        assert_eq!(body, json!({"predictions": [0.5, 1.5]}));

        let decoded = KfServingV1Protocol
            .decode_response(&body, &DeclaredType::new())
            .unwrap();
        assert_eq!(decoded.as_single(), Some(&Value::Tensor(tensor)));
    }

    #[test]
    fn only_tensors() {
        assert!(matches!(
            KfServingV1Protocol.encode_request(&Arguments::single("text")),
            Err(ProtocolError::UnsupportedValue { .. })
        ));

        let declared = DeclaredType::new().with(Kind::Dict);
        assert!(matches!(
            KfServingV1Protocol.decode_request(&json!({"instances": [1]}), &declared),
            Err(ProtocolError::UnsupportedDeclaredType { .. })
        ));
    }

    #[test]
    fn ragged_instances() {
        let result = KfServingV1Protocol
            .decode_request(&json!({"instances": [[1, 2], [3]]}), &DeclaredType::new());
        assert!(matches!(result, Err(ProtocolError::ShapeMismatch { .. })));
    }

    #[test]
    fn missing_key() {
        assert!(matches!(
            KfServingV1Protocol.decode_response(&json!({"instances": [1]}), &DeclaredType::new()),
            Err(ProtocolError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn paths() {
        assert_eq!(
            KfServingV1Protocol.predict_path("iris"),
            "/v1/models/iris:predict"
        );
        assert_eq!(KfServingV1Protocol.status_path("iris"), "/v1/models/iris");
    }
}
