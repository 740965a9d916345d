use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{malformed, Protocol, ProtocolKind};
use crate::{
    assembler::{build_request, build_response},
    declared::DeclaredType,
    dispatcher::{parse_request, parse_response},
    payload::{InferenceRequest, InferenceResponse},
    value::{Arguments, Decoded},
    ProtocolError,
};

/// The V2 inference protocol used by KFServing and MLServer.
#[derive(Debug, Clone, Copy, Default)]
pub struct V2Protocol;

impl Protocol for V2Protocol {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::V2
    }

    fn predict_path(&self, model_name: &str) -> String {
        format!("/v2/models/{}/infer", model_name)
    }

    fn status_path(&self, model_name: &str) -> String {
        format!("/v2/models/{}/ready", model_name)
    }

    fn encode_request(&self, args: &Arguments) -> Result<JsonValue, ProtocolError> {
        let request = build_request(args)?;
        serde_json::to_value(request).map_err(|e| ProtocolError::Internal(e.into()))
    }

    fn decode_request(
        &self,
        body: &JsonValue,
        declared: &DeclaredType,
    ) -> Result<Decoded, ProtocolError> {
        let request = InferenceRequest::deserialize(body).map_err(|e| malformed("v2", e))?;
        parse_request(&request, declared)
    }

    fn encode_response(
        &self,
        model_name: &str,
        outputs: &Arguments,
    ) -> Result<JsonValue, ProtocolError> {
        let response = build_response(model_name, outputs)?;
        serde_json::to_value(response).map_err(|e| ProtocolError::Internal(e.into()))
    }

    fn decode_response(
        &self,
        body: &JsonValue,
        declared: &DeclaredType,
    ) -> Result<Decoded, ProtocolError> {
        let response = InferenceResponse::deserialize(body).map_err(|e| malformed("v2", e))?;
        parse_response(&response, declared)
    }
}
