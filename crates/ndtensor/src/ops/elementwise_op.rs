// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Entrywise arithmetic over tensors of one interned shape.
//!
//! Operands must share the *same* shape descriptor (pointer identity, see
//! [`Shape::same`](crate::Shape::same)). Results are folded left to right:
//! `difference(&[a, b, c])` is `(a - b) - c`.

use crate::{Tensor, TensorError};

/// Entrywise sum of two or more tensors.
///
/// # Errors
/// [`TensorError::TooFewOperands`] for fewer than two operands,
/// [`TensorError::ShapeMismatch`] if any operand has a different shape.
///
/// # Examples
/// ```
/// use ndtensor::{sum, Tensor};
/// let a = Tensor::from_vec(&[2], vec![1.0, 2.0]).unwrap();
/// let b = Tensor::from_vec(&[2], vec![10.0, 20.0]).unwrap();
/// assert_eq!(sum(&[&a, &b, &b]).unwrap().as_slice(), &[21.0, 42.0]);
/// ```
pub fn sum(operands: &[&Tensor]) -> Result<Tensor, TensorError> {
    fold_entrywise("sum", operands, |acc, x| acc + x)
}

/// Entrywise difference `operands[0] - operands[1] - ...`.
pub fn difference(operands: &[&Tensor]) -> Result<Tensor, TensorError> {
    fold_entrywise("difference", operands, |acc, x| acc - x)
}

/// Entrywise (Hadamard) product of two or more tensors.
pub fn hadamard_product(operands: &[&Tensor]) -> Result<Tensor, TensorError> {
    fold_entrywise("hadamard_product", operands, |acc, x| acc * x)
}

/// Entrywise quotient `operands[0] / operands[1] / ...`.
///
/// Division follows IEEE 754: dividing by zero yields an infinity or NaN.
pub fn hadamard_quotient(operands: &[&Tensor]) -> Result<Tensor, TensorError> {
    fold_entrywise("hadamard_quotient", operands, |acc, x| acc / x)
}

fn fold_entrywise(
    op: &'static str,
    operands: &[&Tensor],
    f: impl Fn(f64, f64) -> f64,
) -> Result<Tensor, TensorError> {
    let (first, rest) = match operands {
        [first, rest @ ..] if !rest.is_empty() => (*first, rest),
        _ => {
            return Err(TensorError::TooFewOperands {
                op,
                required: 2,
                actual: operands.len(),
            })
        }
    };

    if let Some(other) = rest.iter().find(|t| !t.shape().same(first.shape())) {
        return Err(TensorError::ShapeMismatch {
            op,
            lhs: first.dims().to_vec(),
            rhs: other.dims().to_vec(),
        });
    }

    let mut acc = first.as_slice().to_vec();
    for t in rest {
        acc.iter_mut()
            .zip(t.as_slice())
            .for_each(|(a, &x)| *a = f(*a, x));
    }
    Tensor::from_shape_vec(first.shape().clone(), acc)
}

impl Tensor {
    /// Returns `self + rhs` as a new tensor.
    pub fn add(&self, rhs: &Tensor) -> Result<Tensor, TensorError> {
        sum(&[self, rhs])
    }

    /// Returns `self - rhs` as a new tensor.
    pub fn subtract(&self, rhs: &Tensor) -> Result<Tensor, TensorError> {
        difference(&[self, rhs])
    }

    /// Returns the entrywise product `self * rhs` as a new tensor.
    pub fn hadamard_multiply(&self, rhs: &Tensor) -> Result<Tensor, TensorError> {
        hadamard_product(&[self, rhs])
    }

    /// Returns the entrywise quotient `self / rhs` as a new tensor.
    pub fn hadamard_divide(&self, rhs: &Tensor) -> Result<Tensor, TensorError> {
        hadamard_quotient(&[self, rhs])
    }
}
