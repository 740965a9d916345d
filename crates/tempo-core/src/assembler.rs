// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

/*!
Building request and response envelopes from call arguments.

Tensors go through the tensor codec, everything else through the opaque
codec. Positional arguments get synthetic names: `input-{index}` for
requests and `output{index}` for responses.
*/

use log::debug;

use crate::{
    codec::{opaque, tensor},
    payload::{InferenceRequest, InferenceResponse, OpaquePayload, Parameters, Payload, CONTENT_TYPE_NUMPY},
    value::{ArgumentStyle, Arguments, Value},
    ProtocolError,
};

/// Build a request from `args`.
///
/// A request made of exactly one tensor is marked with the `np` content
/// type.
///
/// # Errors
///
/// Fails with [`ProtocolError::MixedArgumentStyle`] if `args` has both
/// positional and named arguments, or with whatever the codecs raise.
pub fn build_request(args: &Arguments) -> Result<InferenceRequest, ProtocolError> {
    let inputs = encode_arguments(args, |index| format!("input-{}", index))?;

    let single_tensor = match args.style()? {
        ArgumentStyle::Positional([value]) => value.is_tensor(),
        ArgumentStyle::Named([(_, value)]) => value.is_tensor(),
        _ => false,
    };

    let parameters = single_tensor.then(|| Parameters::with_content_type(CONTENT_TYPE_NUMPY));

    debug!("built request with {} input(s)", inputs.len());
    Ok(InferenceRequest {
        id: None,
        inputs,
        parameters,
    })
}

/// Build a response from the values returned by `model_name`.
pub fn build_response(
    model_name: &str,
    args: &Arguments,
) -> Result<InferenceResponse, ProtocolError> {
    let outputs = encode_arguments(args, |index| format!("output{}", index))?;

    debug!(
        "built response for {} with {} output(s)",
        model_name,
        outputs.len()
    );
    Ok(InferenceResponse {
        model_name: model_name.to_owned(),
        model_version: None,
        id: None,
        parameters: None,
        outputs,
    })
}

/// Encode a single value as a payload called `name`.
pub fn encode_value(value: &Value, name: &str) -> Result<Payload, ProtocolError> {
    match value {
        Value::Tensor(t) => Ok(Payload::Tensor(tensor::encode(t, name)?)),
        Value::Opaque(v) => Ok(Payload::Opaque(opaque::encode(v, name)?)),
        Value::Bytes(bytes) => Ok(Payload::Opaque(OpaquePayload::new(name, bytes.clone()))),
    }
}

fn encode_arguments(
    args: &Arguments,
    synthetic_name: impl Fn(usize) -> String,
) -> Result<Vec<Payload>, ProtocolError> {
    match args.style()? {
        ArgumentStyle::Positional(values) => values
            .iter()
            .enumerate()
            .map(|(index, value)| encode_value(value, &synthetic_name(index)))
            .collect(),
        ArgumentStyle::Named(pairs) => pairs
            .iter()
            .map(|(name, value)| encode_value(value, name))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tract_core::prelude::Tensor;

    fn tensor() -> Tensor {
        Tensor::from_shape(&[1, 4], &[1.0f64, 2.0, 3.0, 4.0]).unwrap()
    }

    #[test]
    fn single_tensor_request() {
        let request = build_request(&Arguments::single(tensor())).unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "inputs": [{
                    "name": "input-0",
                    "datatype": "FP64",
                    "shape": [1, 4],
                    "data": [1.0, 2.0, 3.0, 4.0]
                }],
                "parameters": {"content_type": "np"}
            })
        );
    }

    #[test]
    fn single_named_tensor_is_marked() {
        let request = build_request(&Arguments::named([("x", tensor())])).unwrap();
        assert_eq!(request.inputs[0].name(), "x");
        assert!(request.parameters.is_some());
    }

    #[test]
    fn two_arguments_are_not_marked() {
        let args = Arguments::positional([tensor(), tensor()]);
        let request = build_request(&args).unwrap();

        assert_eq!(request.inputs.len(), 2);
        assert_eq!(request.inputs[1].name(), "input-1");
        assert!(request.parameters.is_none());
        assert!(serde_json::to_value(&request)
            .unwrap()
            .get("parameters")
            .is_none());
    }

    #[test]
    fn single_opaque_is_not_marked() {
        let request = build_request(&Arguments::single("abc")).unwrap();
        assert!(request.parameters.is_none());
        assert!(matches!(&request.inputs[0], Payload::Opaque(o) if o.data == b"abc"));
    }

    #[test]
    fn mixed_style_is_rejected() {
        let args = Arguments::single(tensor()).with_named("b", "text");
        assert!(matches!(
            build_request(&args),
            Err(ProtocolError::MixedArgumentStyle { .. })
        ));
        assert!(matches!(
            build_response("m", &args),
            Err(ProtocolError::MixedArgumentStyle { .. })
        ));
    }

    #[test]
    fn response_names() {
        let response = build_response("my-model", &Arguments::positional([tensor(), tensor()])).unwrap();

        assert_eq!(response.model_name, "my-model");
        assert_eq!(response.outputs[0].name(), "output0");
        assert_eq!(response.outputs[1].name(), "output1");
    }

    #[test]
    fn order_is_kept() {
        let args = Arguments::named([("b", Value::from("1")), ("a", Value::from(tensor()))]);
        let request = build_request(&args).unwrap();

        assert_eq!(request.inputs[0].name(), "b");
        assert_eq!(request.inputs[1].name(), "a");
    }
}
