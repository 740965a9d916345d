// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

use serde_json::{Number, Value as JsonValue};
use tract_core::prelude::{f16, Datum, Tensor};

use crate::{
    payload::TensorPayload,
    registry::{tag_for, ElementType, WireTypeTag},
    ProtocolError,
};

/// Encode `tensor` as a payload called `name`.
///
/// # Errors
///
/// Fails with [`ProtocolError::UnsupportedElementType`] if the tensor
/// holds something other than booleans or numbers, and with
/// [`ProtocolError::InvalidElement`] for non-finite floats which JSON
/// cannot carry.
pub fn encode(tensor: &Tensor, name: &str) -> Result<TensorPayload, ProtocolError> {
    let element = ElementType::from_datum_type(tensor.datum_type()).ok_or_else(|| {
        ProtocolError::UnsupportedElementType {
            name: name.to_owned(),
            datum_type: tensor.datum_type(),
        }
    })?;

    let tag = tag_for(element);
    let data = match element {
        ElementType::Bool => flatten::<bool>(tensor, name, tag, |v| Some(JsonValue::Bool(v)))?,
        ElementType::U8 => flatten::<u8>(tensor, name, tag, |v| Some(v.into()))?,
        ElementType::U16 => flatten::<u16>(tensor, name, tag, |v| Some(v.into()))?,
        ElementType::U32 => flatten::<u32>(tensor, name, tag, |v| Some(v.into()))?,
        ElementType::U64 => flatten::<u64>(tensor, name, tag, |v| Some(v.into()))?,
        ElementType::I8 => flatten::<i8>(tensor, name, tag, |v| Some(v.into()))?,
        ElementType::I16 => flatten::<i16>(tensor, name, tag, |v| Some(v.into()))?,
        ElementType::I32 => flatten::<i32>(tensor, name, tag, |v| Some(v.into()))?,
        ElementType::I64 => flatten::<i64>(tensor, name, tag, |v| Some(v.into()))?,
        ElementType::F16 => flatten::<f16>(tensor, name, tag, |v| single(v.to_f32()))?,
        ElementType::F32 => flatten::<f32>(tensor, name, tag, single)?,
        ElementType::F64 => flatten::<f64>(tensor, name, tag, float)?,
    };

    Ok(TensorPayload {
        name: name.to_owned(),
        datatype: tag.as_str().to_owned(),
        shape: tensor.shape().to_vec(),
        data,
        parameters: None,
    })
}

/// Decode flat (or nested, row-major) `data` into a tensor of `shape`.
///
/// # Errors
///
/// * [`ProtocolError::UnknownTypeTag`] if `tag` isn't a numeric tag.
/// * [`ProtocolError::ShapeMismatch`] if the number of elements doesn't
///   match the shape.
/// * [`ProtocolError::InvalidElement`] if an element doesn't fit the tag.
pub fn decode(
    name: &str,
    data: &[JsonValue],
    tag: &str,
    shape: &[usize],
) -> Result<Tensor, ProtocolError> {
    let element = tag
        .parse::<WireTypeTag>()
        .ok()
        .and_then(WireTypeTag::element_type)
        .ok_or_else(|| ProtocolError::UnknownTypeTag {
            tag: tag.to_owned(),
            name: Some(name.to_owned()),
        })?;

    let mut flat = Vec::with_capacity(data.len());
    collect_leaves(data, &mut flat);

    let expected = element_count(shape);
    if expected != Some(flat.len()) {
        return Err(ProtocolError::ShapeMismatch {
            name: name.to_owned(),
            shape: shape.to_vec(),
            len: flat.len(),
            expected: expected.unwrap_or(usize::MAX),
        });
    }

    let target = Target { name, tag, shape };
    match element {
        ElementType::Bool => target.build::<bool>(&flat, |v| {
            v.as_bool()
                .or_else(|| v.as_u64().filter(|n| *n <= 1).map(|n| n == 1))
        }),
        ElementType::U8 => target.build::<u8>(&flat, |v| v.as_u64().and_then(|n| n.try_into().ok())),
        ElementType::U16 => target.build::<u16>(&flat, |v| v.as_u64().and_then(|n| n.try_into().ok())),
        ElementType::U32 => target.build::<u32>(&flat, |v| v.as_u64().and_then(|n| n.try_into().ok())),
        ElementType::U64 => target.build::<u64>(&flat, JsonValue::as_u64),
        ElementType::I8 => target.build::<i8>(&flat, |v| v.as_i64().and_then(|n| n.try_into().ok())),
        ElementType::I16 => target.build::<i16>(&flat, |v| v.as_i64().and_then(|n| n.try_into().ok())),
        ElementType::I32 => target.build::<i32>(&flat, |v| v.as_i64().and_then(|n| n.try_into().ok())),
        ElementType::I64 => target.build::<i64>(&flat, JsonValue::as_i64),
        ElementType::F16 => target.build::<f16>(&flat, |v| v.as_f64().map(f16::from_f64)),
        ElementType::F32 => target.build::<f32>(&flat, |v| v.as_f64().map(|f| f as f32)),
        ElementType::F64 => target.build::<f64>(&flat, JsonValue::as_f64),
    }
}

/// The number of elements `shape` holds, or `None` if it overflows.
pub(crate) fn element_count(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |count, dim| count.checked_mul(*dim))
}

/// Gather the scalar leaves of possibly nested arrays, in row-major order.
pub(crate) fn collect_leaves<'a>(values: &'a [JsonValue], out: &mut Vec<&'a JsonValue>) {
    for value in values {
        match value {
            JsonValue::Array(inner) => collect_leaves(inner, out),
            leaf => out.push(leaf),
        }
    }
}

fn float(value: f64) -> Option<JsonValue> {
    Number::from_f64(value).map(JsonValue::Number)
}

/// Widen through the shortest decimal that reads back as the same `f32`,
/// so `0.1f32` goes out as `0.1`.
fn single(value: f32) -> Option<JsonValue> {
    value.to_string().parse::<f64>().ok().and_then(float)
}

fn flatten<T: Datum + Copy>(
    tensor: &Tensor,
    name: &str,
    tag: WireTypeTag,
    convert: impl Fn(T) -> Option<JsonValue>,
) -> Result<Vec<JsonValue>, ProtocolError> {
    let values = tensor.as_slice::<T>().map_err(ProtocolError::Internal)?;

    values
        .iter()
        .enumerate()
        .map(|(index, v)| {
            convert(*v).ok_or_else(|| ProtocolError::InvalidElement {
                name: name.to_owned(),
                index,
                tag: tag.as_str().to_owned(),
                value: format!("{:?}", v),
            })
        })
        .collect()
}

struct Target<'a> {
    name: &'a str,
    tag: &'a str,
    shape: &'a [usize],
}

impl Target<'_> {
    fn build<T: Datum + Copy>(
        &self,
        flat: &[&JsonValue],
        convert: impl Fn(&JsonValue) -> Option<T>,
    ) -> Result<Tensor, ProtocolError> {
        let values = flat
            .iter()
            .enumerate()
            .map(|(index, v)| {
                convert(v).ok_or_else(|| ProtocolError::InvalidElement {
                    name: self.name.to_owned(),
                    index,
                    tag: self.tag.to_owned(),
                    value: v.to_string(),
                })
            })
            .collect::<Result<Vec<T>, _>>()?;

        Tensor::from_shape(self.shape, &values).map_err(ProtocolError::Internal)
    }
}
