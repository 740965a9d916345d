// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

use serde_json::Value as JsonValue;
use std::sync::Arc;
use tempo_core::prelude::Arguments;

use crate::{context::RequestContext, details::ModelDetails, error::TempoError};

/// Anything that can be called like a model: local models, remote models
/// and pipelines.
pub trait Invocable: Send + Sync {
    fn details(&self) -> &ModelDetails;

    /// Run a prediction.
    fn invoke(&self, ctx: &RequestContext, args: Arguments) -> Result<Arguments, TempoError>;

    /// Whether the model can take predictions right now.
    fn ready(&self) -> Result<bool, TempoError> {
        Ok(true)
    }

    /// Decode a request body using this model's protocol and declared inputs.
    fn decode_request(&self, body: &JsonValue) -> Result<Arguments, TempoError> {
        let details = self.details();
        let decoded = details
            .protocol
            .protocol()
            .decode_request(body, &details.inputs)?;

        Ok(decoded.into_arguments())
    }

    /// Encode the values a prediction returned using this model's protocol.
    fn encode_response(&self, outputs: &Arguments) -> Result<JsonValue, TempoError> {
        let details = self.details();
        Ok(details
            .protocol
            .protocol()
            .encode_response(&details.name, outputs)?)
    }

    /// The serving path: decode the body, predict and encode the outputs.
    fn handle(&self, ctx: &RequestContext, body: &JsonValue) -> Result<JsonValue, TempoError> {
        let args = self.decode_request(body)?;
        let outputs = self.invoke(ctx, args)?;
        self.encode_response(&outputs)
    }
}

impl<T: Invocable + ?Sized> Invocable for Arc<T> {
    fn details(&self) -> &ModelDetails {
        self.as_ref().details()
    }

    fn invoke(&self, ctx: &RequestContext, args: Arguments) -> Result<Arguments, TempoError> {
        self.as_ref().invoke(ctx, args)
    }

    fn ready(&self) -> Result<bool, TempoError> {
        self.as_ref().ready()
    }
}

impl<T: Invocable + ?Sized> Invocable for Box<T> {
    fn details(&self) -> &ModelDetails {
        self.as_ref().details()
    }

    fn invoke(&self, ctx: &RequestContext, args: Arguments) -> Result<Arguments, TempoError> {
        self.as_ref().invoke(ctx, args)
    }

    fn ready(&self) -> Result<bool, TempoError> {
        self.as_ref().ready()
    }
}

/// Recover a runtime error that travelled through user code as `anyhow`.
pub(crate) fn from_user_error(error: anyhow::Error) -> TempoError {
    error.downcast::<TempoError>().unwrap_or_else(TempoError::Internal)
}
