// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

/*!
Wire protocols spoken by serving backends.

Every protocol knows where to send predictions and status checks for a
model, and how to turn arguments into a JSON body and back.

| Protocol       | Arguments      | Predict path                  |
| -------------- | -------------- | ----------------------------- |
| V2             | any number     | `/v2/models/{name}/infer`     |
| Seldon         | exactly one    | `/api/v1.0/predictions`       |
| KFServing V1   | one tensor     | `/v1/models/{name}:predict`   |
 */

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::str::FromStr;

mod kfserving;
mod seldon;
mod v2;

pub use kfserving::KfServingV1Protocol;
pub use seldon::SeldonProtocol;
pub use v2::V2Protocol;

use crate::{
    declared::DeclaredType,
    value::{Arguments, Decoded, Value},
    ProtocolError,
};

/// A request/response wire format.
pub trait Protocol: Send + Sync {
    /// Which protocol this is.
    fn kind(&self) -> ProtocolKind;

    /// The HTTP path predictions for `model_name` are posted to.
    fn predict_path(&self, model_name: &str) -> String;

    /// The HTTP path answering whether `model_name` is ready.
    fn status_path(&self, model_name: &str) -> String;

    /// Build a request body from call arguments.
    fn encode_request(&self, args: &Arguments) -> Result<JsonValue, ProtocolError>;

    /// Reconstruct call arguments from a request body.
    fn decode_request(
        &self,
        body: &JsonValue,
        declared: &DeclaredType,
    ) -> Result<Decoded, ProtocolError>;

    /// Build a response body from the values a model returned.
    fn encode_response(
        &self,
        model_name: &str,
        outputs: &Arguments,
    ) -> Result<JsonValue, ProtocolError>;

    /// Reconstruct return values from a response body.
    fn decode_response(
        &self,
        body: &JsonValue,
        declared: &DeclaredType,
    ) -> Result<Decoded, ProtocolError>;
}

/// The known protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProtocolKind {
    #[default]
    V2,
    Seldon,
    #[serde(rename = "kfserving-v1")]
    KfServingV1,
}

impl ProtocolKind {
    /// Get the implementation for this protocol.
    pub fn protocol(self) -> &'static dyn Protocol {
        match self {
            ProtocolKind::V2 => &V2Protocol,
            ProtocolKind::Seldon => &SeldonProtocol,
            ProtocolKind::KfServingV1 => &KfServingV1Protocol,
        }
    }
}

impl FromStr for ProtocolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v2" => Ok(ProtocolKind::V2),
            "seldon" => Ok(ProtocolKind::Seldon),
            "kfserving-v1" => Ok(ProtocolKind::KfServingV1),
            _ => Err(format!("unknown protocol: {}", s)),
        }
    }
}

impl std::fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolKind::V2 => f.pad("v2"),
            ProtocolKind::Seldon => f.pad("seldon"),
            ProtocolKind::KfServingV1 => f.pad("kfserving-v1"),
        }
    }
}

/// Protocols carrying a single value require exactly one argument.
fn single_argument<'a>(
    protocol: &'static str,
    args: &'a Arguments,
) -> Result<&'a Value, ProtocolError> {
    match args.get(0) {
        Some(value) if args.len() == 1 => Ok(value),
        _ => Err(ProtocolError::UnsupportedArity {
            protocol,
            count: args.len(),
        }),
    }
}

fn malformed(protocol: &str, what: impl std::fmt::Display) -> ProtocolError {
    ProtocolError::MalformedEnvelope(format!("{} body {}", protocol, what))
}
