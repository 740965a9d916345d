// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

/*!
Project files describing a runtime and the models deployed on it.

```toml
[runtime]
kind = "kubernetes"
ingress = "ingress.local"
namespace = "models"

[[models]]
name = "classifier"
platform = "sklearn"
protocol = "seldon"
uri = "gs://bucket/classifier"
inputs = [{ kind = "tensor" }]
outputs = [{ kind = "tensor" }]
```
 */

use serde::{Deserialize, Serialize};
use std::path::Path;
use tempo_core::prelude::ProtocolKind;

use crate::{
    details::ModelDetails,
    error::TempoError,
    remote::RemoteModel,
    runtime::{RuntimeKind, RuntimeOptions},
};

/// A parsed and validated project file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub runtime: RuntimeOptions,

    #[serde(default)]
    pub models: Vec<ModelDetails>,
}

impl ProjectConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TempoError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| TempoError::Config(format!("cannot read {}: {}", path.display(), e)))?;

        Self::from_toml(&text)
    }

    /// Parse a project file.
    ///
    /// Runtime kinds and protocols are checked before the rest of the
    /// file so that they fail with their own errors.
    pub fn from_toml(text: &str) -> Result<Self, TempoError> {
        let table = text
            .parse::<toml::Table>()
            .map_err(|e| TempoError::Config(e.to_string()))?;

        validate_tags(&table)?;

        let config: ProjectConfig = toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| TempoError::Config(e.to_string()))?;

        for (index, model) in config.models.iter().enumerate() {
            if config.models[..index].iter().any(|m| m.name == model.name) {
                return Err(TempoError::Config(format!(
                    "model {:?} is declared twice",
                    model.name
                )));
            }
        }

        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, TempoError> {
        toml::to_string_pretty(self).map_err(|e| TempoError::Config(e.to_string()))
    }

    pub fn model(&self, name: &str) -> Result<&ModelDetails, TempoError> {
        self.models
            .iter()
            .find(|model| model.name == name)
            .ok_or_else(|| TempoError::UnknownModel(name.to_owned()))
    }

    /// A client for the model `name` as deployed on the configured runtime.
    pub fn remote(&self, name: &str) -> Result<RemoteModel, TempoError> {
        RemoteModel::new(self.model(name)?.clone(), &self.runtime)
    }
}

fn validate_tags(table: &toml::Table) -> Result<(), TempoError> {
    if let Some(kind) = table
        .get("runtime")
        .and_then(|runtime| runtime.get("kind"))
        .and_then(toml::Value::as_str)
    {
        kind.parse::<RuntimeKind>()?;
    }

    let models = table.get("models").and_then(toml::Value::as_array);
    for model in models.into_iter().flatten() {
        if let Some(protocol) = model.get("protocol").and_then(toml::Value::as_str) {
            protocol
                .parse::<ProtocolKind>()
                .map_err(|_| TempoError::UnknownProtocol(protocol.to_owned()))?;
        }
    }

    Ok(())
}
