// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

/*!
The V2 inference envelope and the payloads it carries.

Payloads are told apart by their datatype: `BYTES` payloads are opaque
byte strings, everything else is a tensor. Tensor datatypes are kept as
received so that unknown tags are reported while decoding, together with
the payload they belong to.
*/

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use tract_core::prelude::Tensor;

use crate::{
    codec::{opaque, tensor},
    registry::WireTypeTag,
    ProtocolError,
};

/// The content type marking a request made of a single tensor.
pub const CONTENT_TYPE_NUMPY: &str = "np";

/// Extra envelope or payload parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, JsonValue>,
}

impl Parameters {
    pub fn with_content_type(content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            extra: Default::default(),
        }
    }
}

/// A named, typed, shaped flat array of numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorPayload {
    pub name: String,
    pub datatype: String,
    pub shape: Vec<usize>,
    pub data: Vec<JsonValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
}

impl TensorPayload {
    /// Reconstruct the tensor this payload describes.
    pub fn decode(&self) -> Result<Tensor, ProtocolError> {
        tensor::decode(&self.name, &self.data, &self.datatype, &self.shape)
    }
}

/// A named byte string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpaquePayload {
    pub name: String,
    pub datatype: String,
    pub shape: Vec<usize>,
    pub data: Vec<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
}

impl OpaquePayload {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            datatype: WireTypeTag::Bytes.as_str().to_owned(),
            shape: vec![data.len()],
            data,
            parameters: None,
        }
    }

    pub fn text(&self) -> Result<&str, ProtocolError> {
        opaque::text(self)
    }
}

/// Either kind of payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Tensor(TensorPayload),
    Opaque(OpaquePayload),
}

impl Payload {
    pub fn name(&self) -> &str {
        match self {
            Payload::Tensor(payload) => &payload.name,
            Payload::Opaque(payload) => &payload.name,
        }
    }

    pub fn datatype(&self) -> &str {
        match self {
            Payload::Tensor(payload) => &payload.datatype,
            Payload::Opaque(payload) => &payload.datatype,
        }
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RawPayload {
            name: String,
            datatype: String,
            #[serde(default)]
            shape: Option<Vec<usize>>,
            #[serde(default)]
            data: Vec<JsonValue>,
            #[serde(default)]
            parameters: Option<Parameters>,
        }

        let raw = RawPayload::deserialize(deserializer)?;
        if raw.datatype != WireTypeTag::Bytes.as_str() {
            return Ok(Payload::Tensor(TensorPayload {
                name: raw.name,
                datatype: raw.datatype,
                shape: raw.shape.unwrap_or_else(|| vec![raw.data.len()]),
                data: raw.data,
                parameters: raw.parameters,
            }));
        }

        let mut data = vec![];
        collect_bytes(&raw.data, &mut data)
            .map_err(|reason| D::Error::custom(format!("payload '{}': {}", raw.name, reason)))?;

        Ok(Payload::Opaque(OpaquePayload {
            name: raw.name,
            datatype: raw.datatype,
            shape: raw.shape.unwrap_or_else(|| vec![data.len()]),
            data,
            parameters: raw.parameters,
        }))
    }
}

/// `BYTES` data arrives either as byte values or as strings.
fn collect_bytes(values: &[JsonValue], out: &mut Vec<u8>) -> Result<(), String> {
    for value in values {
        match value {
            JsonValue::String(s) => out.extend_from_slice(s.as_bytes()),
            JsonValue::Array(inner) => collect_bytes(inner, out)?,
            JsonValue::Number(n) => {
                let byte = n
                    .as_u64()
                    .and_then(|v| u8::try_from(v).ok())
                    .ok_or_else(|| format!("byte value {} out of range", n))?;
                out.push(byte);
            }
            other => return Err(format!("unexpected byte value {}", other)),
        }
    }

    Ok(())
}

/// An inference request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InferenceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub inputs: Vec<Payload>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
}

/// An inference response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InferenceResponse {
    pub model_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,

    pub outputs: Vec<Payload>,
}
