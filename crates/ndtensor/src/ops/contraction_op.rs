// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Generalized tensor contraction.
//!
//! `product(basis, factor, d)` sums over the last `d` axes of `basis` paired
//! with the first `d` axes of `factor`:
//!
//! ```text
//! result[b.., f..] = sum over c.. of basis[b.., c..] * factor[c.., f..]
//! ```
//!
//! `d = 1` on two matrices is matrix multiplication; `d` equal to both ranks
//! is the full inner product and yields a scalar.
//!
//! # Single-pass kernel
//! The kernel walks one [`Odometer`] over the virtual shape
//! `[basis.dims.., factor.dims[d..]..]`, whose axes fall into three zones:
//!
//! ```text
//!   0 .. free         basis-only axes     (b..)
//!   free .. rank_b    contracted axes     (c..)
//!   rank_b .. end     factor-only axes    (f..)
//! ```
//!
//! It keeps three running flat offsets (result, basis, factor) and updates
//! them in O(1) per step from the carry position alone. Each zone is a
//! trailing block of the buffers it touches, so "increment this axis and
//! zero everything to its right" is a `+1` in those buffers. The zones differ
//! only in which buffers that applies to:
//!
//! * basis-only carry: result `+1`, basis `+1`, factor back to `0`.
//! * contracted carry: basis `+1`, factor `+1`, and the result offset, which
//!   just swept the whole factor-only block, rewinds to its start:
//!   `- (product(factor.dims[d..]) - 1)`, i.e. `factor.strides[d - 1] - 1`.
//! * factor-only carry: result `+1`, factor `+1`.
//!
//! Several virtual indices land on the same result cell, so every visit
//! accumulates into it.

use crate::{Odometer, Tensor, TensorError};

/// The outcome of [`product`]: a tensor, or a scalar when every axis of both
/// operands is contracted.
#[derive(Debug, Clone)]
pub enum Contraction {
    /// Full contraction over all axes of both operands.
    Scalar(f64),
    /// At least one free axis survives.
    Tensor(Tensor),
}

impl Contraction {
    /// Returns the scalar result, if this was a full contraction.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Contraction::Scalar(x) => Some(*x),
            Contraction::Tensor(_) => None,
        }
    }

    /// Returns the tensor result, if any axes survived.
    pub fn as_tensor(&self) -> Option<&Tensor> {
        match self {
            Contraction::Scalar(_) => None,
            Contraction::Tensor(t) => Some(t),
        }
    }

    /// Consumes the result, returning the tensor if any axes survived.
    pub fn into_tensor(self) -> Option<Tensor> {
        match self {
            Contraction::Scalar(_) => None,
            Contraction::Tensor(t) => Some(t),
        }
    }
}

/// Validated layout of one contraction.
#[derive(Debug)]
struct Plan {
    /// Number of basis-only axes.
    free: usize,
    basis_rank: usize,
    /// `[basis.dims.., factor.dims[degree..]..]`.
    extents: Vec<usize>,
    /// `[basis.dims[..free].., factor.dims[degree..]..]`; empty for a scalar.
    result_dims: Vec<usize>,
    /// Result-offset correction applied on a contracted-axis carry.
    rewind: usize,
}

impl Plan {
    fn new(basis: &Tensor, factor: &Tensor, degree: usize) -> Result<Self, TensorError> {
        let basis_rank = basis.dimension();
        let factor_rank = factor.dimension();
        if degree == 0 || degree > basis_rank || degree > factor_rank {
            return Err(TensorError::InvalidDegree {
                degree,
                basis_rank,
                factor_rank,
            });
        }

        let free = basis_rank - degree;
        if basis.dims()[free..] != factor.dims()[..degree] {
            return Err(TensorError::ShapeMismatch {
                op: "product",
                lhs: basis.dims().to_vec(),
                rhs: factor.dims().to_vec(),
            });
        }

        let trailing = &factor.dims()[degree..];
        let extents = [basis.dims(), trailing].concat();
        let result_dims = [&basis.dims()[..free], trailing].concat();
        let rewind = factor.strides()[degree - 1] - 1;

        Ok(Self {
            free,
            basis_rank,
            extents,
            result_dims,
            rewind,
        })
    }

    fn result_len(&self) -> usize {
        self.result_dims.iter().product()
    }

    fn finish(self, out: Vec<f64>) -> Result<Contraction, TensorError> {
        if self.result_dims.is_empty() {
            Ok(Contraction::Scalar(out[0]))
        } else {
            Tensor::from_vec(&self.result_dims, out).map(Contraction::Tensor)
        }
    }
}

/// Contracts the last `degree` axes of `basis` with the first `degree` axes
/// of `factor` in a single pass.
///
/// The result has shape `[basis.dims[..rank - degree].., factor.dims[degree..]..]`.
/// When `degree` equals the rank of both operands the result collapses to
/// [`Contraction::Scalar`] instead of a rank-0 tensor.
///
/// # Errors
/// [`TensorError::InvalidDegree`] if `degree` is zero or exceeds either rank,
/// [`TensorError::ShapeMismatch`] if the contracted axes differ in size.
///
/// # Examples
/// ```
/// use ndtensor::{product, Tensor};
/// let v = Tensor::from_vec(&[3], vec![1.0, 2.0, 3.0]).unwrap();
/// let w = Tensor::from_vec(&[3], vec![2.0, 4.0, 6.0]).unwrap();
/// assert_eq!(product(&v, &w, 1).unwrap().as_scalar(), Some(28.0));
/// ```
pub fn product(basis: &Tensor, factor: &Tensor, degree: usize) -> Result<Contraction, TensorError> {
    let plan = Plan::new(basis, factor, degree)?;
    tracing::debug!(
        basis = %basis.shape(),
        factor = %factor.shape(),
        degree,
        result = ?plan.result_dims,
        "contracting"
    );

    let mut out = vec![0.0; plan.result_len()];
    contract_single_pass(&plan, basis.as_slice(), factor.as_slice(), &mut out);
    plan.finish(out)
}

fn contract_single_pass(plan: &Plan, basis: &[f64], factor: &[f64], out: &mut [f64]) {
    let mut odometer = Odometer::new(&plan.extents);
    let (mut r, mut b, mut f) = (0usize, 0usize, 0usize);
    loop {
        out[r] += basis[b] * factor[f];
        match odometer.advance() {
            None => break,
            Some(pos) if pos < plan.free => {
                r += 1;
                b += 1;
                f = 0;
            }
            Some(pos) if pos < plan.basis_rank => {
                b += 1;
                f += 1;
                r -= plan.rewind;
            }
            Some(_) => {
                r += 1;
                f += 1;
            }
        }
    }
}

/// Reference contraction: for every basis entry, scan every factor entry and
/// skip those whose contracted indices disagree.
///
/// Quadratic in the operand sizes. Kept for verifying [`product`] and as a
/// benchmark baseline; same contract and errors as [`product`].
pub fn product_naive(
    basis: &Tensor,
    factor: &Tensor,
    degree: usize,
) -> Result<Contraction, TensorError> {
    let plan = Plan::new(basis, factor, degree)?;
    let result_strides: Vec<usize> = (0..plan.result_dims.len())
        .map(|i| plan.result_dims[i + 1..].iter().product())
        .collect();

    let mut out = vec![0.0; plan.result_len()];
    for b in basis.entries() {
        let (b_free, b_shared) = b.indices.split_at(plan.free);
        for f in factor.entries() {
            let (f_shared, f_free) = f.indices.split_at(degree);
            if b_shared != f_shared {
                continue;
            }
            let r: usize = b_free
                .iter()
                .chain(f_free)
                .zip(&result_strides)
                .map(|(i, s)| i * s)
                .sum();
            out[r] += b.value * f.value;
        }
    }
    plan.finish(out)
}
