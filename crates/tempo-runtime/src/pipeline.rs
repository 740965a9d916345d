// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

/*!
Pipelines compose several models behind one model interface.

The pipeline function gets the [`Members`] and calls them by name; each
member sees a child of the pipeline's [`RequestContext`].
 */

use log::debug;
use std::sync::Arc;
use tempo_core::prelude::Arguments;

use crate::{
    context::RequestContext,
    details::ModelDetails,
    error::TempoError,
    invocable::{from_user_error, Invocable},
};

type PipelineFn =
    dyn Fn(&Members, &RequestContext, Arguments) -> anyhow::Result<Arguments> + Send + Sync;

/// The named models a pipeline may call.
#[derive(Default, Clone)]
pub struct Members {
    models: Vec<(String, Arc<dyn Invocable>)>,
}

impl Members {
    pub fn get(&self, name: &str) -> Result<&Arc<dyn Invocable>, TempoError> {
        self.models
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, model)| model)
            .ok_or_else(|| TempoError::UnknownModel(name.to_owned()))
    }

    /// Call the member `name` under a child of `ctx`.
    pub fn invoke(
        &self,
        name: &str,
        ctx: &RequestContext,
        args: Arguments,
    ) -> Result<Arguments, TempoError> {
        let model = self.get(name)?;
        debug!("{} calling member {}", ctx.model_name(), name);
        model.invoke(&ctx.child(name), args)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    fn all_ready(&self) -> Result<bool, TempoError> {
        #[cfg(feature = "threaded")]
        {
            use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

            self.models
                .par_iter()
                .map(|(_, model)| model.ready())
                .collect::<Result<Vec<_>, _>>()
                .map(|ready| ready.into_iter().all(|r| r))
        }
        #[cfg(not(feature = "threaded"))]
        {
            for (_, model) in &self.models {
                if !model.ready()? {
                    return Ok(false);
                }
            }

            Ok(true)
        }
    }
}

/// Builder for [`Pipeline`].
pub struct PipelineBuilder {
    details: ModelDetails,
    members: Members,
    function: Option<Box<PipelineFn>>,
}

impl PipelineBuilder {
    pub fn new(details: ModelDetails) -> Self {
        Self {
            details,
            members: Members::default(),
            function: None,
        }
    }

    /// Add a member under its own model name.
    pub fn with_model(self, model: impl Invocable + 'static) -> Self {
        let name = model.details().name.clone();
        self.with_named_model(name, model)
    }

    /// Add a member under `name`.
    pub fn with_named_model(mut self, name: impl Into<String>, model: impl Invocable + 'static) -> Self {
        self.members.models.push((name.into(), Arc::new(model)));
        self
    }

    pub fn with_fn<F>(mut self, function: F) -> Self
    where
        F: Fn(&Members, &RequestContext, Arguments) -> anyhow::Result<Arguments>
            + Send
            + Sync
            + 'static,
    {
        self.function = Some(Box::new(function));
        self
    }

    pub fn build(self) -> Result<Pipeline, TempoError> {
        let function = self
            .function
            .ok_or_else(|| TempoError::MissingPredictor(self.details.name.clone()))?;

        Ok(Pipeline {
            details: self.details,
            members: self.members,
            function,
        })
    }
}

/// A model made of other models.
pub struct Pipeline {
    details: ModelDetails,
    members: Members,
    function: Box<PipelineFn>,
}

impl Pipeline {
    pub fn members(&self) -> &Members {
        &self.members
    }
}

impl Invocable for Pipeline {
    fn details(&self) -> &ModelDetails {
        &self.details
    }

    fn invoke(&self, ctx: &RequestContext, args: Arguments) -> Result<Arguments, TempoError> {
        (self.function)(&self.members, ctx, args).map_err(from_user_error)
    }

    fn ready(&self) -> Result<bool, TempoError> {
        self.members.all_ready()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("details", &self.details)
            .field("members", &self.members.names().collect::<Vec<_>>())
            .finish()
    }
}
