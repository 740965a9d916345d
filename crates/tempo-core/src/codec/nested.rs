// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

/*!
Tensors as nested JSON arrays, the way the Seldon and KFServing V1
protocols carry them.
*/

use serde_json::Value as JsonValue;
use tract_core::prelude::Tensor;

use super::tensor;
use crate::{registry::WireTypeTag, ProtocolError};

/// Render `tensor` as nested arrays following its shape.
pub fn to_nested(tensor: &Tensor, name: &str) -> Result<JsonValue, ProtocolError> {
    let payload = tensor::encode(tensor, name)?;
    let mut flat = payload.data.into_iter();
    Ok(nest(&mut flat, &payload.shape))
}

fn nest(flat: &mut impl Iterator<Item = JsonValue>, shape: &[usize]) -> JsonValue {
    match shape.split_first() {
        None => flat.next().unwrap_or(JsonValue::Null),
        Some((&dim, rest)) => JsonValue::Array((0..dim).map(|_| nest(flat, rest)).collect()),
    }
}

/// Build a tensor from nested arrays.
///
/// The shape is read off the first element at each depth and every
/// sibling must agree with it. All-boolean leaves give a `BOOL` tensor,
/// all-integer leaves an `INT64` tensor and any other numbers `FP64`.
pub fn from_nested(value: &JsonValue, name: &str) -> Result<Tensor, ProtocolError> {
    let mut shape = vec![];
    let mut cursor = value;
    while let JsonValue::Array(items) = cursor {
        shape.push(items.len());
        match items.first() {
            Some(first) => cursor = first,
            None => break,
        }
    }

    let mut leaves = vec![];
    if !collect(value, &shape, &mut leaves) {
        return Err(ProtocolError::ShapeMismatch {
            name: name.to_owned(),
            shape: shape.clone(),
            len: count_leaves(value),
            expected: tensor::element_count(&shape).unwrap_or(usize::MAX),
        });
    }

    let tag = if leaves.iter().all(|v| v.is_boolean()) && !leaves.is_empty() {
        WireTypeTag::Bool
    } else if leaves.iter().all(|v| v.is_i64()) && !leaves.is_empty() {
        WireTypeTag::Int64
    } else {
        WireTypeTag::Fp64
    };

    tensor::decode(name, &leaves, tag.as_str(), &shape)
}

/// Collect the leaves, returning false if the array is ragged.
fn collect(value: &JsonValue, shape: &[usize], out: &mut Vec<JsonValue>) -> bool {
    match (value, shape.split_first()) {
        (JsonValue::Array(items), Some((&dim, rest))) => {
            items.len() == dim && items.iter().all(|item| collect(item, rest, out))
        }
        (JsonValue::Array(_), None) => false,
        (_, Some(_)) => false,
        (leaf, None) => {
            out.push(leaf.clone());
            true
        }
    }
}

fn count_leaves(value: &JsonValue) -> usize {
    match value {
        JsonValue::Array(items) => items.iter().map(count_leaves).sum(),
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_round_trip() {
        let tensor = Tensor::from_shape(&[2, 2], &[1.5f64, 2.0, 3.0, 4.0]).unwrap();
        let nested = to_nested(&tensor, "x").unwrap();
        assert_eq!(nested, json!([[1.5, 2.0], [3.0, 4.0]]));

        assert_eq!(from_nested(&nested, "x").unwrap(), tensor);
    }

    #[test]
    fn integers_stay_integers() {
        let tensor = from_nested(&json!([[1, 2, 3]]), "x").unwrap();
        assert_eq!(tensor.shape(), &[1, 3]);
        assert_eq!(tensor.as_slice::<i64>().unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn mixed_numbers_are_floats() {
        let tensor = from_nested(&json!([1, 2.5]), "x").unwrap();
        assert_eq!(tensor.as_slice::<f64>().unwrap(), &[1.0, 2.5]);
    }

    #[test]
    fn scalar() {
        let tensor = from_nested(&json!(3), "x").unwrap();
        assert!(tensor.shape().is_empty());
        assert_eq!(to_nested(&tensor, "x").unwrap(), json!(3));
    }

    #[test]
    fn ragged() {
        assert!(matches!(
            from_nested(&json!([[1, 2], [3]]), "x"),
            Err(ProtocolError::ShapeMismatch { len: 3, expected: 4, .. })
        ));
        assert!(from_nested(&json!([[1, 2], [3, [4]]]), "x").is_err());
    }

    #[test]
    fn not_numbers() {
        assert!(matches!(
            from_nested(&json!(["a", "b"]), "x"),
            Err(ProtocolError::InvalidElement { .. })
        ));
    }
}
