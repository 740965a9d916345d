// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::str::FromStr;

/// The kind of value a model expects for one argument or return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// A numeric n-dimensional array.
    #[serde(alias = "ndarray", alias = "array")]
    Tensor,

    /// Text, sent as its UTF-8 bytes.
    #[serde(alias = "string")]
    Str,

    /// Raw bytes, passed through untouched.
    Bytes,

    Dict,
    List,
    Int,
    Float,
    Bool,

    /// Any literal value.
    Json,
}

impl Kind {
    pub fn is_tensor(self) -> bool {
        self == Kind::Tensor
    }

    /// Whether a decoded literal has the shape this kind promises.
    pub(crate) fn accepts(self, value: &JsonValue) -> bool {
        match self {
            Kind::Dict => value.is_object(),
            Kind::List => value.is_array(),
            Kind::Int => value.is_i64() || value.is_u64(),
            Kind::Float => value.is_number(),
            Kind::Bool => value.is_boolean(),
            Kind::Str => value.is_string(),
            Kind::Tensor | Kind::Bytes | Kind::Json => true,
        }
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tensor" | "ndarray" | "array" => Ok(Kind::Tensor),
            "str" | "string" => Ok(Kind::Str),
            "bytes" => Ok(Kind::Bytes),
            "dict" => Ok(Kind::Dict),
            "list" => Ok(Kind::List),
            "int" => Ok(Kind::Int),
            "float" => Ok(Kind::Float),
            "bool" => Ok(Kind::Bool),
            "json" => Ok(Kind::Json),
            _ => Err(format!("unknown declared kind: {}", s)),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Tensor => f.pad("tensor"),
            Kind::Str => f.pad("str"),
            Kind::Bytes => f.pad("bytes"),
            Kind::Dict => f.pad("dict"),
            Kind::List => f.pad("list"),
            Kind::Int => f.pad("int"),
            Kind::Float => f.pad("float"),
            Kind::Bool => f.pad("bool"),
            Kind::Json => f.pad("json"),
        }
    }
}

/// One declared argument or return value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub kind: Kind,
}

/// The ordered, optionally named kinds of a model's inputs or outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclaredType {
    slots: Vec<Slot>,
}

impl DeclaredType {
    /// Create an empty declaration; every lookup resolves to [`Kind::Tensor`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unnamed slot.
    pub fn with(mut self, kind: Kind) -> Self {
        self.slots.push(Slot { name: None, kind });
        self
    }

    /// Append a named slot.
    pub fn with_named(mut self, name: impl Into<String>, kind: Kind) -> Self {
        self.slots.push(Slot {
            name: Some(name.into()),
            kind,
        });
        self
    }

    pub fn get_by_name(&self, name: &str) -> Option<Kind> {
        self.slots
            .iter()
            .find(|slot| slot.name.as_deref() == Some(name))
            .map(|slot| slot.kind)
    }

    pub fn get_by_index(&self, index: usize) -> Option<Kind> {
        self.slots.get(index).map(|slot| slot.kind)
    }

    /// Resolve the kind for a payload, by name, then by position, then
    /// defaulting to a tensor.
    pub fn resolve(&self, name: &str, index: usize) -> Kind {
        self.get_by_name(name)
            .or_else(|| self.get_by_index(index))
            .unwrap_or(Kind::Tensor)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }
}

impl FromIterator<Kind> for DeclaredType {
    fn from_iter<T: IntoIterator<Item = Kind>>(iter: T) -> Self {
        Self {
            slots: iter
                .into_iter()
                .map(|kind| Slot { name: None, kind })
                .collect(),
        }
    }
}
