// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

use anyhow::Result;
use clap::Parser;
use std::{path::PathBuf, sync::Arc};
use tempo::runtime::{
    prelude::{Arguments, Model, ModelBuilder, ModelDetails, ProjectConfig, RequestContext},
    server,
};

/// Serve a model from a project that echoes its inputs back, to exercise
/// clients against the declared API.
#[derive(Parser, Debug)]
#[clap()]
pub(crate) struct Args {
    /// The project file.
    project: PathBuf,

    /// The model to stand in for.
    model: String,

    /// Defaults to the port of the project's runtime.
    #[clap(short, long)]
    port: Option<u16>,

    #[clap(short, long, default_value = "8")]
    threads: usize,

    #[clap(long, default_value = "0.0.0.0")]
    host: String,

    /// Refuse request bodies larger than this.
    #[clap(long, default_value_t = server::DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: usize,
}

pub(super) fn serve(config: Args) -> Result<()> {
    let project = ProjectConfig::load(&config.project)?;
    let model = echo_model(project.model(&config.model)?.clone())?;
    let port = config.port.unwrap_or(project.runtime.port);

    server::ModelServer::bind(Arc::new(model), &config.host, port)?
        .with_max_body_bytes(config.max_body_bytes)
        .run(config.threads);
    Ok(())
}

fn echo_model(details: ModelDetails) -> Result<Model> {
    Ok(ModelBuilder::new(details)
        .with_fn(|_ctx: &RequestContext, args: Arguments| Ok(args))
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempo::runtime::prelude::{DeclaredType, Invocable, Kind, ProtocolKind};

    #[test]
    fn echoes_with_the_declared_api() {
        let details = ModelDetails::new("echo")
            .with_protocol(ProtocolKind::Seldon)
            .with_inputs(DeclaredType::new().with(Kind::Dict));
        let model = echo_model(details).unwrap();

        let reply = model
            .handle(&RequestContext::new("echo"), &json!({"strData": "{'a': 1}"}))
            .unwrap();
        assert_eq!(reply["jsonData"], json!({"a": 1}));
    }
}
