// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

use serde_json::Value as JsonValue;
use tract_core::prelude::Tensor;

use crate::ProtocolError;

/// A typed argument or return value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric array, sent through the tensor codec.
    Tensor(Tensor),

    /// Any other value, sent as text through the opaque codec.
    Opaque(JsonValue),

    /// Raw bytes, sent and received unchanged.
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_tensor(&self) -> bool {
        matches!(self, Value::Tensor(_))
    }

    pub fn as_tensor(&self) -> Option<&Tensor> {
        match self {
            Value::Tensor(tensor) => Some(tensor),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&JsonValue> {
        match self {
            Value::Opaque(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_opaque().and_then(JsonValue::as_str)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl From<Tensor> for Value {
    fn from(tensor: Tensor) -> Self {
        Value::Tensor(tensor)
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        Value::Opaque(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Opaque(JsonValue::String(value.to_owned()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Opaque(JsonValue::String(value))
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

/// The arguments of one call: either all positional or all named.
///
/// Mixing both is allowed while building but rejected when encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    positional: Vec<Value>,
    named: Vec<(String, Value)>,
}

pub(crate) enum ArgumentStyle<'a> {
    Positional(&'a [Value]),
    Named(&'a [(String, Value)]),
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a call with a single positional argument.
    pub fn single(value: impl Into<Value>) -> Self {
        Self::positional([value])
    }

    pub fn positional<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            named: vec![],
        }
    }

    pub fn named<K: Into<String>, V: Into<Value>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            positional: vec![],
            named: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.positional.push(value.into());
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.named.push((name.into(), value.into()));
    }

    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }

    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get an argument by position. Named arguments are indexed in insertion order.
    pub fn get(&self, index: usize) -> Option<&Value> {
        if self.named.is_empty() {
            self.positional.get(index)
        } else {
            self.named.get(index).map(|(_, v)| v)
        }
    }

    pub fn get_named(&self, name: &str) -> Option<&Value> {
        self.named.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Iterate over all arguments, with their names when named.
    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, &Value)> {
        self.positional
            .iter()
            .map(|v| (None, v))
            .chain(self.named.iter().map(|(k, v)| (Some(k.as_str()), v)))
    }

    pub fn into_values(self) -> Vec<Value> {
        self.positional
            .into_iter()
            .chain(self.named.into_iter().map(|(_, v)| v))
            .collect()
    }

    pub(crate) fn style(&self) -> Result<ArgumentStyle<'_>, ProtocolError> {
        match (self.positional.is_empty(), self.named.is_empty()) {
            (false, false) => Err(ProtocolError::MixedArgumentStyle {
                positional: self.positional.len(),
                named: self.named.len(),
            }),
            (true, false) => Ok(ArgumentStyle::Named(&self.named)),
            _ => Ok(ArgumentStyle::Positional(&self.positional)),
        }
    }
}

/// Values reconstructed from an envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The envelope held exactly one payload.
    Single(Value),

    /// The envelope held zero or several payloads, in wire order.
    Named(Vec<(String, Value)>),
}

impl Decoded {
    pub fn len(&self) -> usize {
        match self {
            Decoded::Single(_) => 1,
            Decoded::Named(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_single(&self) -> Option<&Value> {
        match self {
            Decoded::Single(value) => Some(value),
            Decoded::Named(_) => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Decoded::Single(_) => None,
            Decoded::Named(values) => values.iter().find(|(k, _)| k == name).map(|(_, v)| v),
        }
    }

    /// Turn into call arguments: a single value becomes one positional argument.
    pub fn into_arguments(self) -> Arguments {
        match self {
            Decoded::Single(value) => Arguments::single(value),
            Decoded::Named(values) => Arguments::named(values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_is_rejected() {
        let args = Arguments::new().with("a").with_named("b", "c");
        assert!(matches!(
            args.style(),
            Err(ProtocolError::MixedArgumentStyle {
                positional: 1,
                named: 1
            })
        ));
    }

    #[test]
    fn get_by_index_on_named() {
        let args = Arguments::named([("x", "1"), ("y", "2")]);
        assert_eq!(args.get(1).and_then(Value::as_str), Some("2"));
        assert_eq!(args.get_named("x").and_then(Value::as_str), Some("1"));
        assert!(args.get(2).is_none());
    }

    #[test]
    fn decoded_into_arguments() {
        let args = Decoded::Single("abc".into()).into_arguments();
        assert_eq!(args.len(), 1);
        assert_eq!(args.get(0).and_then(Value::as_str), Some("abc"));

        let args = Decoded::Named(vec![("a".to_owned(), "x".into())]).into_arguments();
        assert_eq!(args.get_named("a").and_then(Value::as_str), Some("x"));
    }
}
