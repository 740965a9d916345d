// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

/*!
Local models: a [`ModelDetails`] paired with something that predicts.

```no_run
use tempo_runtime::prelude::*;

let model = ModelBuilder::new(ModelDetails::new("echo"))
    .with_fn(|_ctx: &RequestContext, args: Arguments| Ok(args))
    .build()?;

let outputs = model.invoke(&RequestContext::new("echo"), Arguments::single("hello"))?;
# Ok::<(), Box<dyn std::error::Error>>(())
```
 */

use log::{debug, info};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tempo_core::prelude::Arguments;

use crate::{
    context::RequestContext,
    details::ModelDetails,
    error::TempoError,
    invocable::{from_user_error, Invocable},
};

/// The user-provided part of a model.
pub trait Predictor: Send + Sync {
    /// Prepare for predictions, e.g. by reading artifacts from disk. Called
    /// once, before the first prediction.
    fn load(&mut self, _details: &ModelDetails) -> anyhow::Result<()> {
        Ok(())
    }

    fn predict(&self, ctx: &RequestContext, args: Arguments) -> anyhow::Result<Arguments>;
}

impl<F> Predictor for F
where
    F: Fn(&RequestContext, Arguments) -> anyhow::Result<Arguments> + Send + Sync,
{
    fn predict(&self, ctx: &RequestContext, args: Arguments) -> anyhow::Result<Arguments> {
        self(ctx, args)
    }
}

/// Builder for [`Model`].
pub struct ModelBuilder {
    details: ModelDetails,
    predictor: Option<Box<dyn Predictor>>,
}

impl ModelBuilder {
    pub fn new(details: ModelDetails) -> Self {
        Self {
            details,
            predictor: None,
        }
    }

    /// Predict with a plain function.
    pub fn with_fn<F>(self, function: F) -> Self
    where
        F: Fn(&RequestContext, Arguments) -> anyhow::Result<Arguments> + Send + Sync + 'static,
    {
        self.with_predictor(function)
    }

    pub fn with_predictor(mut self, predictor: impl Predictor + 'static) -> Self {
        self.predictor = Some(Box::new(predictor));
        self
    }

    pub fn build(self) -> Result<Model, TempoError> {
        let predictor = self
            .predictor
            .ok_or_else(|| TempoError::MissingPredictor(self.details.name.clone()))?;

        Ok(Model {
            details: self.details,
            predictor: RwLock::new(predictor),
            loaded: AtomicBool::new(false),
        })
    }
}

/// A model running in this process.
pub struct Model {
    details: ModelDetails,
    predictor: RwLock<Box<dyn Predictor>>,
    loaded: AtomicBool,
}

impl Model {
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Load the predictor unless that already happened.
    pub fn ensure_loaded(&self) -> Result<(), TempoError> {
        if self.is_loaded() {
            return Ok(());
        }

        let mut predictor = self.predictor.write();
        if !self.is_loaded() {
            info!("loading model {}", self.details.name);
            predictor.load(&self.details).map_err(from_user_error)?;
            self.loaded.store(true, Ordering::Release);
        }

        Ok(())
    }
}

impl Invocable for Model {
    fn details(&self) -> &ModelDetails {
        &self.details
    }

    fn invoke(&self, ctx: &RequestContext, args: Arguments) -> Result<Arguments, TempoError> {
        self.ensure_loaded()?;

        debug!(
            "predicting with {} for request {}",
            self.details.name,
            ctx.request_id()
        );
        self.predictor
            .read()
            .predict(ctx, args)
            .map_err(from_user_error)
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("details", &self.details)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
