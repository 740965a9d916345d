// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

use anyhow::Result;
use clap::Parser;
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use tempo::runtime::prelude::ProjectConfig;

use super::values::parse_arguments;

/// Print the request body a model's protocol would send.
#[derive(Parser, Debug)]
#[clap()]
pub(crate) struct Args {
    /// The project file.
    project: PathBuf,

    /// The model to build a request for.
    model: String,

    /// A JSON array of positional arguments.
    arguments: String,

    /// Print on a single line.
    #[clap(long)]
    compact: bool,
}

pub(super) fn request(config: Args) -> Result<()> {
    let project = ProjectConfig::load(&config.project)?;
    let body = request_body(&project, &config.model, &config.arguments)?;

    if config.compact {
        println!("{}", body);
    } else {
        println!("{}", serde_json::to_string_pretty(&body)?);
    }

    Ok(())
}

fn request_body(project: &ProjectConfig, model: &str, arguments: &str) -> Result<JsonValue> {
    let details = project.model(model)?;
    let args = parse_arguments(arguments)?;
    Ok(details.protocol.protocol().encode_request(&args)?)
}
