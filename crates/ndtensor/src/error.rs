// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor construction, indexing, and arithmetic.

/// Errors that can occur during tensor operations.
///
/// Every failure is raised before any output is produced; operations never
/// return partial results.
#[derive(Debug, thiserror::Error)]
pub enum TensorError {
    /// A size sequence is empty, contains a zero, or contains a non-integer.
    #[error("invalid shape {dims:?}: {detail}")]
    InvalidShape { dims: Vec<f64>, detail: &'static str },

    /// Operand shapes are incompatible for the requested operation.
    #[error("incompatible shapes for {op}: {lhs:?} vs {rhs:?}")]
    ShapeMismatch {
        op: &'static str,
        lhs: Vec<usize>,
        rhs: Vec<usize>,
    },

    /// A buffer length does not match the element count of its shape.
    #[error("buffer length mismatch: shape {dims:?} needs {expected} elements, got {actual}")]
    BufferLengthMismatch {
        dims: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    /// An index vector has the wrong number of components.
    #[error("rank mismatch: expected {expected} indices, got {actual}")]
    RankMismatch { expected: usize, actual: usize },

    /// A multi-index component lies outside its axis.
    #[error("index {index} out of range for axis {axis} of extent {extent}")]
    IndexOutOfRange {
        axis: usize,
        index: usize,
        extent: usize,
    },

    /// A flat key lies outside `0..len`.
    #[error("key {key} out of range for tensor of length {len}")]
    KeyOutOfRange { key: usize, len: usize },

    /// A contraction degree is zero or exceeds an operand's rank.
    #[error("invalid contraction degree {degree} for ranks {basis_rank} and {factor_rank}")]
    InvalidDegree {
        degree: usize,
        basis_rank: usize,
        factor_rank: usize,
    },

    /// An n-ary elementwise operation received fewer operands than it needs.
    #[error("{op} needs at least {required} operands, got {actual}")]
    TooFewOperands {
        op: &'static str,
        required: usize,
        actual: usize,
    },

    /// A nested array or JSON record is malformed.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Textual JSON could not be parsed.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl TensorError {
    pub(crate) fn invalid_shape(dims: &[usize], detail: &'static str) -> Self {
        Self::InvalidShape {
            dims: dims.iter().map(|&d| d as f64).collect(),
            detail,
        }
    }
}
