// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

#![allow(dead_code)]

use tempo_core::tract_core::prelude::{Datum, Tensor};

pub fn tensor<T: Datum + Copy>(shape: &[usize], data: &[T]) -> Tensor {
    Tensor::from_shape(shape, data).unwrap()
}

pub fn row(offset: f64) -> Tensor {
    tensor(&[1, 4], &[offset, offset + 1.0, offset + 2.0, offset + 3.0])
}
