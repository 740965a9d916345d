// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

/*!
Mapping between in-memory element types and wire type tags.

Both half and single precision floats are sent as `FP32`; the reverse
lookup of `FP32` always gives single precision. `BYTES` is the opaque
marker and has no numeric element type.
*/

use std::str::FromStr;
use tract_core::prelude::DatumType;

use crate::ProtocolError;

/// The scalar kinds a tensor may hold on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F16,
    F32,
    F64,
}

impl ElementType {
    pub const ALL: [ElementType; 12] = [
        ElementType::Bool,
        ElementType::U8,
        ElementType::U16,
        ElementType::U32,
        ElementType::U64,
        ElementType::I8,
        ElementType::I16,
        ElementType::I32,
        ElementType::I64,
        ElementType::F16,
        ElementType::F32,
        ElementType::F64,
    ];

    /// The tract datum type backing this element type.
    pub fn datum_type(self) -> DatumType {
        match self {
            ElementType::Bool => DatumType::Bool,
            ElementType::U8 => DatumType::U8,
            ElementType::U16 => DatumType::U16,
            ElementType::U32 => DatumType::U32,
            ElementType::U64 => DatumType::U64,
            ElementType::I8 => DatumType::I8,
            ElementType::I16 => DatumType::I16,
            ElementType::I32 => DatumType::I32,
            ElementType::I64 => DatumType::I64,
            ElementType::F16 => DatumType::F16,
            ElementType::F32 => DatumType::F32,
            ElementType::F64 => DatumType::F64,
        }
    }

    /// Find the element type for a tract datum type, if it has one.
    pub fn from_datum_type(datum_type: DatumType) -> Option<Self> {
        ElementType::ALL
            .into_iter()
            .find(|element| element.datum_type() == datum_type)
    }
}

/// The fixed set of datatype tokens used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireTypeTag {
    Bool,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    Fp16,
    Fp32,
    Fp64,
    Bytes,
}

impl WireTypeTag {
    pub const ALL: [WireTypeTag; 13] = [
        WireTypeTag::Bool,
        WireTypeTag::Uint8,
        WireTypeTag::Uint16,
        WireTypeTag::Uint32,
        WireTypeTag::Uint64,
        WireTypeTag::Int8,
        WireTypeTag::Int16,
        WireTypeTag::Int32,
        WireTypeTag::Int64,
        WireTypeTag::Fp16,
        WireTypeTag::Fp32,
        WireTypeTag::Fp64,
        WireTypeTag::Bytes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WireTypeTag::Bool => "BOOL",
            WireTypeTag::Uint8 => "UINT8",
            WireTypeTag::Uint16 => "UINT16",
            WireTypeTag::Uint32 => "UINT32",
            WireTypeTag::Uint64 => "UINT64",
            WireTypeTag::Int8 => "INT8",
            WireTypeTag::Int16 => "INT16",
            WireTypeTag::Int32 => "INT32",
            WireTypeTag::Int64 => "INT64",
            WireTypeTag::Fp16 => "FP16",
            WireTypeTag::Fp32 => "FP32",
            WireTypeTag::Fp64 => "FP64",
            WireTypeTag::Bytes => "BYTES",
        }
    }

    /// The numeric element type for this tag. `None` for `BYTES`.
    pub fn element_type(self) -> Option<ElementType> {
        let element = match self {
            WireTypeTag::Bool => ElementType::Bool,
            WireTypeTag::Uint8 => ElementType::U8,
            WireTypeTag::Uint16 => ElementType::U16,
            WireTypeTag::Uint32 => ElementType::U32,
            WireTypeTag::Uint64 => ElementType::U64,
            WireTypeTag::Int8 => ElementType::I8,
            WireTypeTag::Int16 => ElementType::I16,
            WireTypeTag::Int32 => ElementType::I32,
            WireTypeTag::Int64 => ElementType::I64,
            WireTypeTag::Fp16 => ElementType::F16,
            WireTypeTag::Fp32 => ElementType::F32,
            WireTypeTag::Fp64 => ElementType::F64,
            WireTypeTag::Bytes => return None,
        };

        Some(element)
    }
}

impl FromStr for WireTypeTag {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WireTypeTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownTypeTag {
                tag: s.to_owned(),
                name: None,
            })
    }
}

impl std::fmt::Display for WireTypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Get the wire tag used to send `element`.
pub fn tag_for(element: ElementType) -> WireTypeTag {
    match element {
        ElementType::Bool => WireTypeTag::Bool,
        ElementType::U8 => WireTypeTag::Uint8,
        ElementType::U16 => WireTypeTag::Uint16,
        ElementType::U32 => WireTypeTag::Uint32,
        ElementType::U64 => WireTypeTag::Uint64,
        ElementType::I8 => WireTypeTag::Int8,
        ElementType::I16 => WireTypeTag::Int16,
        ElementType::I32 => WireTypeTag::Int32,
        ElementType::I64 => WireTypeTag::Int64,
        ElementType::F16 | ElementType::F32 => WireTypeTag::Fp32,
        ElementType::F64 => WireTypeTag::Fp64,
    }
}

/// Get the element type a numeric wire tag decodes to.
///
/// # Errors
///
/// Returns [`ProtocolError::UnknownTypeTag`] for anything that isn't a
/// numeric tag, including `BYTES`.
pub fn element_type_for(tag: &str) -> Result<ElementType, ProtocolError> {
    tag.parse::<WireTypeTag>()?
        .element_type()
        .ok_or_else(|| ProtocolError::UnknownTypeTag {
            tag: tag.to_owned(),
            name: None,
        })
}
