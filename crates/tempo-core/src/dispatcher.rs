// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

/*!
Reconstructing typed values from request and response envelopes.

Each payload's declared kind is resolved by its own name, then its own
position, then defaults to a tensor. `BYTES` payloads always go through
the opaque codec; other payloads are only accepted where a tensor is
declared.
*/

use log::debug;

use crate::{
    codec::opaque,
    declared::DeclaredType,
    payload::{InferenceRequest, InferenceResponse, Payload},
    value::{Decoded, Value},
    ProtocolError,
};

/// Decode the inputs of `request` against the declared input kinds.
pub fn parse_request(
    request: &InferenceRequest,
    declared: &DeclaredType,
) -> Result<Decoded, ProtocolError> {
    let decoded = decode_payloads(&request.inputs, declared)?;
    debug!("decoded request with {} input(s)", decoded.len());
    Ok(decoded)
}

/// Decode the outputs of `response` against the declared output kinds.
pub fn parse_response(
    response: &InferenceResponse,
    declared: &DeclaredType,
) -> Result<Decoded, ProtocolError> {
    let decoded = decode_payloads(&response.outputs, declared)?;
    debug!(
        "decoded response from {} with {} output(s)",
        response.model_name,
        decoded.len()
    );
    Ok(decoded)
}

/// Decode the payload found at `index`.
pub fn decode_payload(
    payload: &Payload,
    index: usize,
    declared: &DeclaredType,
) -> Result<Value, ProtocolError> {
    let kind = declared.resolve(payload.name(), index);

    match payload {
        Payload::Opaque(opaque) => opaque::decode(opaque, kind),
        Payload::Tensor(tensor) if kind.is_tensor() => Ok(Value::Tensor(tensor.decode()?)),
        Payload::Tensor(tensor) => Err(ProtocolError::UnsupportedDeclaredType {
            name: tensor.name.clone(),
            index,
            tag: tensor.datatype.clone(),
            kind,
        }),
    }
}

fn decode_payloads(
    payloads: &[Payload],
    declared: &DeclaredType,
) -> Result<Decoded, ProtocolError> {
    let mut values = payloads
        .iter()
        .enumerate()
        .map(|(index, payload)| {
            let value = decode_payload(payload, index, declared)?;
            Ok((payload.name().to_owned(), value))
        })
        .collect::<Result<Vec<_>, ProtocolError>>()?;

    if values.len() == 1 {
        if let Some((_, value)) = values.pop() {
            return Ok(Decoded::Single(value));
        }
    }

    Ok(Decoded::Named(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assembler::{build_request, build_response},
        declared::Kind,
        value::Arguments,
    };
    use serde_json::json;
    use tract_core::prelude::Tensor;

    fn tensor(offset: f64) -> Tensor {
        Tensor::from_shape(&[1, 4], &[offset, offset + 1.0, offset + 2.0, offset + 3.0]).unwrap()
    }

    #[test]
    fn single_input_is_unwrapped() {
        let request = build_request(&Arguments::single(tensor(1.0))).unwrap();
        let decoded = parse_request(&request, &DeclaredType::new()).unwrap();

        assert_eq!(decoded, Decoded::Single(Value::Tensor(tensor(1.0))));
    }

    #[test]
    fn two_outputs_in_order() {
        let response =
            build_response("m", &Arguments::positional([tensor(1.0), tensor(5.0)])).unwrap();
        let declared = DeclaredType::new().with(Kind::Tensor).with(Kind::Tensor);

        let decoded = parse_response(&response, &declared).unwrap();
        assert_eq!(
            decoded,
            Decoded::Named(vec![
                ("output0".to_owned(), Value::Tensor(tensor(1.0))),
                ("output1".to_owned(), Value::Tensor(tensor(5.0))),
            ])
        );
    }

    #[test]
    fn output_kind_uses_its_own_index() {
        let response = build_response(
            "m",
            &Arguments::positional([Value::Tensor(tensor(0.0)), Value::from(json!({"a": 1}))]),
        )
        .unwrap();
        let declared = DeclaredType::new().with(Kind::Tensor).with(Kind::Dict);

        let decoded = parse_response(&response, &declared).unwrap();
        assert_eq!(decoded.get("output1"), Some(&Value::Opaque(json!({"a": 1}))));
    }

    #[test]
    fn bytes_output_declared_dict() {
        let response = build_response("m", &Arguments::single(json!({"a": 1}))).unwrap();
        let declared = DeclaredType::new().with(Kind::Dict);

        let decoded = parse_response(&response, &declared).unwrap();
        assert_eq!(decoded, Decoded::Single(Value::Opaque(json!({"a": 1}))));
    }

    #[test]
    fn tensor_payload_with_text_declared() {
        let request = build_request(&Arguments::named([("a", tensor(0.0))])).unwrap();
        let declared = DeclaredType::new().with_named("a", Kind::Str);

        assert!(matches!(
            parse_request(&request, &declared),
            Err(ProtocolError::UnsupportedDeclaredType { ref name, index: 0, kind: Kind::Str, .. })
                if name == "a"
        ));
    }

    #[test]
    fn named_lookup_wins() {
        let request = build_request(&Arguments::named([
            ("text", Value::from("hello")),
            ("x", Value::from(tensor(0.0))),
        ]))
        .unwrap();
        let declared = DeclaredType::new()
            .with_named("x", Kind::Tensor)
            .with_named("text", Kind::Str);

        let decoded = parse_request(&request, &declared).unwrap();
        assert_eq!(decoded.get("text"), Some(&Value::from("hello")));
        assert_eq!(decoded.get("x"), Some(&Value::Tensor(tensor(0.0))));
    }

    #[test]
    fn empty_request() {
        let decoded = parse_request(&InferenceRequest::default(), &DeclaredType::new()).unwrap();
        assert!(decoded.is_empty());
    }
}
