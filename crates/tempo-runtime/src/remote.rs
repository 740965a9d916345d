// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

/*!
Calling models deployed behind an HTTP endpoint.
 */

use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value as JsonValue;
use std::time::{Duration, Instant};
use tempo_core::prelude::Arguments;

use crate::{
    context::RequestContext,
    details::ModelDetails,
    error::TempoError,
    invocable::Invocable,
    runtime::{Endpoint, RuntimeOptions},
};

/// Header carrying the request id across services.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// A deployed model, invoked over HTTP with its own protocol.
pub struct RemoteModel {
    details: ModelDetails,
    endpoint: Endpoint,
    client: Client,
}

impl RemoteModel {
    /// Reach `details` on the runtime described by `options`.
    pub fn new(details: ModelDetails, options: &RuntimeOptions) -> Result<Self, TempoError> {
        let endpoint = options.endpoint(&details.name)?;
        Self::with_endpoint(details, endpoint, options.timeout())
    }

    pub fn with_endpoint(
        details: ModelDetails,
        endpoint: Endpoint,
        timeout: Duration,
    ) -> Result<Self, TempoError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            details,
            endpoint,
            client,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Poll [`Invocable::ready`] until it succeeds or `timeout` passes.
    pub fn wait_ready(&self, timeout: Duration) -> Result<bool, TempoError> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.ready()? {
                return Ok(true);
            }

            if Instant::now() >= deadline {
                return Ok(false);
            }

            std::thread::sleep(Duration::from_millis(250));
        }
    }

    fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = match &self.endpoint.host_header {
            Some(host) => builder.header(reqwest::header::HOST, host),
            None => builder,
        };

        match &self.endpoint.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

impl Invocable for RemoteModel {
    fn details(&self) -> &ModelDetails {
        &self.details
    }

    fn invoke(&self, ctx: &RequestContext, args: Arguments) -> Result<Arguments, TempoError> {
        let protocol = self.details.protocol.protocol();
        let body = protocol.encode_request(&args)?;
        let url = self.endpoint.url(&protocol.predict_path(&self.details.name));

        debug!("posting request {} to {}", ctx.request_id(), url);
        let response = self
            .prepare(self.client.post(&url))
            .header(REQUEST_ID_HEADER, ctx.request_id())
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TempoError::Remote {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let body: JsonValue = response.json()?;
        let decoded = protocol.decode_response(&body, &self.details.outputs)?;
        Ok(decoded.into_arguments())
    }

    fn ready(&self) -> Result<bool, TempoError> {
        let protocol = self.details.protocol.protocol();
        let url = self.endpoint.url(&protocol.status_path(&self.details.name));

        match self.prepare(self.client.get(&url)).send() {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) if e.is_connect() || e.is_timeout() => {
                debug!("{} is not reachable: {}", url, e);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl std::fmt::Debug for RemoteModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteModel")
            .field("details", &self.details)
            .field("endpoint", &self.endpoint.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::RuntimeKind;

    #[test]
    fn unreachable_is_not_ready() {
        let endpoint = Endpoint::new("http://127.0.0.1:1");
        let model = RemoteModel::with_endpoint(
            ModelDetails::new("nowhere"),
            endpoint,
            Duration::from_millis(200),
        )
        .unwrap();

        assert!(!model.ready().unwrap());
        assert!(!model.wait_ready(Duration::from_millis(0)).unwrap());
    }

    #[test]
    fn endpoint_from_runtime() {
        let options = RuntimeOptions {
            port: 9001,
            ..RuntimeOptions::new(RuntimeKind::Docker)
        };
        let model = RemoteModel::new(ModelDetails::new("iris"), &options).unwrap();
        assert_eq!(model.endpoint().base_url, "http://localhost:9001");
    }

    #[test]
    fn transport_errors() {
        let model = RemoteModel::with_endpoint(
            ModelDetails::new("nowhere"),
            Endpoint::new("http://127.0.0.1:1"),
            Duration::from_millis(200),
        )
        .unwrap();

        let result = model.invoke(&RequestContext::new("nowhere"), Arguments::single("x"));
        assert!(matches!(result, Err(TempoError::Transport(_))));
    }
}
