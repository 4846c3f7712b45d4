// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # ndtensor
//!
//! Dense, strided, row-major N-dimensional tensors of `f64`.
//!
//! This crate provides:
//! - [`Shape`] and [`ShapeRegistry`]: interned size/stride descriptors, so
//!   "same shape" is a pointer comparison.
//! - [`Tensor`]: an owned flat buffer plus its shape, with indexing, entry
//!   iteration, and in-place [`scale`](Tensor::scale).
//! - [`Odometer`]: carry-based row-major multi-index enumeration.
//! - Elementwise arithmetic: [`sum`], [`difference`], [`hadamard_product`],
//!   [`hadamard_quotient`].
//! - [`product`]: single-pass generalized contraction over `d` shared axes.
//! - Nested-array and `{type, size, data}` JSON conversions.
//!
//! # Design Goals
//! - Eager and dense: no broadcasting, no sparse storage, no lazy graphs.
//! - Every public entry point validates its input and fails with a
//!   [`TensorError`] before producing anything.
//! - Clean error types via `thiserror`.
//!
//! # Example
//! ```
//! use ndtensor::{product, NestedArray, Tensor};
//!
//! let a = Tensor::from_array(&NestedArray::from(vec![vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]])).unwrap();
//! let b = Tensor::from_array(&NestedArray::from(vec![vec![2.0, 0.0], vec![1.0, 2.0], vec![0.0, 1.0]])).unwrap();
//! let c = product(&a, &b, 1).unwrap().into_tensor().unwrap();
//! assert_eq!(c.to_array(), NestedArray::from(vec![vec![4.0, 7.0], vec![8.0, 14.0]]));
//! ```

mod error;
mod odometer;
mod ops;
mod serialize;
mod shape;
mod tensor;

pub use error::TensorError;
pub use odometer::Odometer;
pub use ops::{
    difference, hadamard_product, hadamard_quotient, product, product_naive, sum, Contraction,
};
pub use serialize::{NestedArray, TensorRecord, RECORD_TYPE};
pub use shape::{Shape, ShapeRegistry};
pub use tensor::{Entries, Entry, Tensor};
