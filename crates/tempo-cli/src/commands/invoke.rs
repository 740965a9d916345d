// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

use anyhow::Result;
use clap::Parser;
use log::info;
use std::{path::PathBuf, time::Instant};
use tempo::runtime::prelude::{Invocable, ProjectConfig, RequestContext};

use super::values::{parse_arguments, render};

/// Call a deployed model and print what it returned.
#[derive(Parser, Debug)]
#[clap()]
pub(crate) struct Args {
    /// The project file.
    project: PathBuf,

    /// The model to call.
    model: String,

    /// A JSON array of positional arguments.
    arguments: String,

    /// Reuse a request id instead of generating one.
    #[clap(long)]
    request_id: Option<String>,
}

pub(super) fn invoke(config: Args) -> Result<()> {
    let project = ProjectConfig::load(&config.project)?;
    let remote = project.remote(&config.model)?;
    let args = parse_arguments(&config.arguments)?;

    let ctx = match config.request_id {
        Some(id) => RequestContext::with_request_id(&config.model, id),
        None => RequestContext::new(&config.model),
    };

    let start = Instant::now();
    let outputs = remote.invoke(&ctx, args)?;
    info!(
        "request {} took {:.2?}",
        ctx.request_id(),
        start.elapsed()
    );

    println!("{}", serde_json::to_string_pretty(&render(&outputs)?)?);
    Ok(())
}
