// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

use serde::{Deserialize, Serialize};
use std::{path::PathBuf, str::FromStr};
use tempo_core::prelude::{DeclaredType, ProtocolKind};

/// The framework a model artifact was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Sklearn,
    Xgboost,
    Tensorflow,
    Pytorch,
    Onnx,
    Mlflow,
    #[default]
    Custom,
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sklearn" => Ok(Platform::Sklearn),
            "xgboost" => Ok(Platform::Xgboost),
            "tensorflow" => Ok(Platform::Tensorflow),
            "pytorch" => Ok(Platform::Pytorch),
            "onnx" => Ok(Platform::Onnx),
            "mlflow" => Ok(Platform::Mlflow),
            "custom" => Ok(Platform::Custom),
            _ => Err(format!("unknown platform: {}", s)),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Sklearn => f.pad("sklearn"),
            Platform::Xgboost => f.pad("xgboost"),
            Platform::Tensorflow => f.pad("tensorflow"),
            Platform::Pytorch => f.pad("pytorch"),
            Platform::Onnx => f.pad("onnx"),
            Platform::Mlflow => f.pad("mlflow"),
            Platform::Custom => f.pad("custom"),
        }
    }
}

/// Everything known about a model besides how it predicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDetails {
    pub name: String,

    #[serde(default)]
    pub platform: Platform,

    /// Where the artifact lives, e.g. a bucket URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Where the artifact is, or will be, on local disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_folder: Option<PathBuf>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub protocol: ProtocolKind,

    #[serde(default)]
    pub inputs: DeclaredType,

    #[serde(default)]
    pub outputs: DeclaredType,
}

impl ModelDetails {
    /// A custom model speaking V2 with undeclared (tensor) inputs and outputs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            platform: Platform::Custom,
            uri: None,
            local_folder: None,
            description: String::new(),
            protocol: ProtocolKind::V2,
            inputs: DeclaredType::new(),
            outputs: DeclaredType::new(),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn with_local_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.local_folder = Some(folder.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_protocol(mut self, protocol: ProtocolKind) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn with_inputs(mut self, inputs: DeclaredType) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: DeclaredType) -> Self {
        self.outputs = outputs;
        self
    }
}
