// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

use crate::declared::Kind;
use thiserror::Error;
use tract_core::prelude::DatumType;

/// Errors raised while marshalling values to and from the wire.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("payload '{name}' has element type {datum_type:?} which has no wire type tag")]
    UnsupportedElementType { name: String, datum_type: DatumType },

    #[error("unknown wire type tag {tag:?}{}", field(.name))]
    UnknownTypeTag { tag: String, name: Option<String> },

    #[error("payload '{name}' has {len} elements but shape {shape:?} requires {expected}")]
    ShapeMismatch {
        name: String,
        shape: Vec<usize>,
        len: usize,
        expected: usize,
    },

    #[error("cannot mix positional and named arguments ({positional} positional, {named} named)")]
    MixedArgumentStyle { positional: usize, named: usize },

    #[error("payload '{name}' at index {index} with datatype {tag} cannot be decoded as {kind}")]
    UnsupportedDeclaredType {
        name: String,
        index: usize,
        tag: String,
        kind: Kind,
    },

    #[error("payload '{name}' does not hold a valid literal: {reason}")]
    MalformedLiteral { name: String, reason: String },

    #[error("payload '{name}' element {index} is not a valid {tag} value: {value}")]
    InvalidElement {
        name: String,
        index: usize,
        tag: String,
        value: String,
    },

    #[error("the {protocol} protocol takes exactly one argument but got {count}")]
    UnsupportedArity { protocol: &'static str, count: usize },

    #[error("the {protocol} protocol cannot carry {what}")]
    UnsupportedValue {
        protocol: &'static str,
        what: &'static str,
    },

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("internal error occured: {0}")]
    Internal(anyhow::Error),
}

fn field(name: &Option<String>) -> String {
    match name {
        Some(name) => format!(" for payload '{}'", name),
        None => String::new(),
    }
}
