// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

use tempo_core::ProtocolError;
use thiserror::Error;

/// Errors that can be returned by the Tempo runtime.
#[derive(Error, Debug)]
pub enum TempoError {
    #[error("unknown model {0:?}")]
    UnknownModel(String),

    #[error("unknown runtime kind {0:?}, expected one of docker, kubernetes, kfserving or enterprise")]
    UnknownRuntimeKind(String),

    #[error("unknown protocol {0:?}, expected one of v2, seldon or kfserving-v1")]
    UnknownProtocol(String),

    #[error("model {0:?} was built without a predictor")]
    MissingPredictor(String),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote model answered with status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("internal error occured: {0}")]
    Internal(anyhow::Error),
}
