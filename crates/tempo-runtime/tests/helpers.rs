// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

#![allow(dead_code)]

use serde_json::json;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tempo_core::tract_core::prelude::Tensor;
use tempo_runtime::prelude::*;

pub fn doubler(name: &str, protocol: ProtocolKind) -> Model {
    let details = ModelDetails::new(name)
        .with_protocol(protocol)
        .with_inputs(DeclaredType::new().with(Kind::Tensor))
        .with_outputs(DeclaredType::new().with(Kind::Tensor));

    ModelBuilder::new(details)
        .with_fn(|_ctx: &RequestContext, args: Arguments| {
            let tensor = args
                .get(0)
                .and_then(Value::as_tensor)
                .ok_or_else(|| anyhow::anyhow!("expected a tensor"))?;

            let doubled = tensor
                .as_slice::<f64>()?
                .iter()
                .map(|v| v * 2.0)
                .collect::<Vec<_>>();

            Ok(Arguments::single(Tensor::from_shape(
                tensor.shape(),
                &doubled,
            )?))
        })
        .build()
        .unwrap()
}

pub fn tagger(name: &str) -> Model {
    let details = ModelDetails::new(name)
        .with_inputs(DeclaredType::new().with_named("text", Kind::Str))
        .with_outputs(DeclaredType::new().with(Kind::Dict));

    ModelBuilder::new(details)
        .with_fn(|ctx: &RequestContext, args: Arguments| {
            let text = args
                .get(0)
                .and_then(Value::as_str)
                .ok_or_else(|| anyhow::anyhow!("expected text"))?;

            if text.is_empty() {
                anyhow::bail!("nothing to tag");
            }

            Ok(Arguments::single(json!({
                "length": text.len(),
                "request": ctx.request_id(),
            })))
        })
        .build()
        .unwrap()
}

/// Start serving `model` on an ephemeral port and return where it listens.
#[cfg(feature = "serve")]
pub fn spawn_server(model: Arc<dyn Invocable>) -> SocketAddr {
    spawn_limited_server(model, tempo_runtime::server::DEFAULT_MAX_BODY_BYTES)
}

#[cfg(feature = "serve")]
pub fn spawn_limited_server(model: Arc<dyn Invocable>, max_body_bytes: usize) -> SocketAddr {
    let server = tempo_runtime::server::ModelServer::bind(model, "127.0.0.1", 0)
        .unwrap()
        .with_max_body_bytes(max_body_bytes);
    let addr = server.local_addr().unwrap();
    std::thread::spawn(move || server.run(2));
    addr
}

pub fn remote_for(addr: SocketAddr, details: &ModelDetails) -> RemoteModel {
    RemoteModel::with_endpoint(
        details.clone(),
        Endpoint::new(format!("http://{}", addr)),
        Duration::from_secs(5),
    )
    .unwrap()
}
