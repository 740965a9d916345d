// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

/*!
The Tempo runtime turns plain functions into servable models, composes
models into pipelines and calls models deployed elsewhere.

```no_run
use tempo_runtime::prelude::*;
use std::sync::Arc;

let details = ModelDetails::new("classifier")
    .with_platform(Platform::Sklearn)
    .with_protocol(ProtocolKind::Seldon);

let local = ModelBuilder::new(details.clone())
    .with_fn(|_ctx: &RequestContext, args: Arguments| Ok(args))
    .build()?;

let config = ProjectConfig::from_toml("[runtime]\nkind = \"docker\"\nport = 9000\n")?;
let remote = RemoteModel::new(details, &config.runtime)?;

let pipeline = PipelineBuilder::new(ModelDetails::new("both"))
    .with_named_model("local", local)
    .with_named_model("remote", remote)
    .with_fn(|members: &Members, ctx: &RequestContext, args: Arguments| {
        let args = members.invoke("local", ctx, args)?;
        Ok(members.invoke("remote", ctx, args)?)
    })
    .build()?;

let outputs = pipeline.invoke(&RequestContext::new("both"), Arguments::single("hello"))?;
# Ok::<(), Box<dyn std::error::Error>>(())
```

With the `serve` feature any model can be put behind an HTTP server
speaking its protocol, see [`server::serve`].
 */

#![warn(rust_2018_idioms)]

mod config;
mod context;
mod details;
mod error;
mod invocable;
mod model;
mod pipeline;
mod remote;
mod runtime;
#[cfg(feature = "serve")]
pub mod server;

#[doc(inline)]
pub use crate::error::TempoError;
pub use config::ProjectConfig;
pub use context::RequestContext;
pub use details::{ModelDetails, Platform};
pub use invocable::Invocable;
pub use model::{Model, ModelBuilder, Predictor};
pub use pipeline::{Members, Pipeline, PipelineBuilder};
pub use remote::{RemoteModel, REQUEST_ID_HEADER};
pub use runtime::{Endpoint, RuntimeKind, RuntimeOptions};

/// Everything needed to define, compose and call models.
pub mod prelude {
    pub use super::{
        Endpoint, Invocable, Members, Model, ModelBuilder, ModelDetails, Pipeline,
        PipelineBuilder, Platform, Predictor, ProjectConfig, RemoteModel, RequestContext,
        RuntimeKind, RuntimeOptions, TempoError,
    };
    pub use tempo_core::prelude::*;
}
