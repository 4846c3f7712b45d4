// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The dense tensor type and its entry iterator.

use crate::{Odometer, Shape, TensorError};
use std::fmt;

/// An owned, dense, n-dimensional array of `f64` in row-major order.
///
/// A tensor pairs a flat buffer with an interned [`Shape`]. Flat key `k` and
/// multi-index `(i_0, .., i_{d-1})` are related by `k = sum(i_p * strides[p])`.
///
/// # Mutation
/// The shape of a tensor never changes. [`scale`](Tensor::scale) is the only
/// operation that writes into an existing buffer; every other operation
/// (elementwise arithmetic, [`map`](Tensor::map), contraction) allocates a
/// fresh result.
///
/// # Ownership
/// Constructors that accept a buffer take the `Vec<f64>` by value, so a
/// buffer backs at most one tensor.
#[derive(Debug, Clone)]
pub struct Tensor {
    shape: Shape,
    data: Vec<f64>,
}

impl Tensor {
    /// Creates a zero-filled tensor.
    ///
    /// # Examples
    /// ```
    /// use ndtensor::Tensor;
    /// let t = Tensor::zeros(&[2, 3]).unwrap();
    /// assert_eq!(t.length(), 6);
    /// assert_eq!(t.dimension(), 2);
    /// ```
    pub fn zeros(dims: &[usize]) -> Result<Self, TensorError> {
        Ok(Self::with_shape(Shape::new(dims)?))
    }

    /// Creates a zero-filled rank-1 tensor of length `len`.
    pub fn vector(len: usize) -> Result<Self, TensorError> {
        Self::zeros(&[len])
    }

    /// Creates a tensor that takes ownership of `data`.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidShape`] for an invalid size sequence and
    /// [`TensorError::BufferLengthMismatch`] if `data.len()` differs from the
    /// product of `dims`.
    pub fn from_vec(dims: &[usize], data: Vec<f64>) -> Result<Self, TensorError> {
        Self::from_shape_vec(Shape::new(dims)?, data)
    }

    /// Creates a zero-filled tensor of an already interned shape.
    pub fn with_shape(shape: Shape) -> Self {
        let data = vec![0.0; shape.num_elements()];
        Self { shape, data }
    }

    /// Creates a tensor of an already interned shape that takes ownership of `data`.
    pub fn from_shape_vec(shape: Shape, data: Vec<f64>) -> Result<Self, TensorError> {
        if data.len() != shape.num_elements() {
            return Err(TensorError::BufferLengthMismatch {
                dims: shape.dims().to_vec(),
                expected: shape.num_elements(),
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Returns the tensor's interned shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the size of every axis.
    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    /// Returns the row-major strides.
    pub fn strides(&self) -> &[usize] {
        self.shape.strides()
    }

    /// Returns the rank.
    pub fn dimension(&self) -> usize {
        self.shape.rank()
    }

    /// Returns the number of entries, which always equals the buffer length.
    pub fn length(&self) -> usize {
        self.data.len()
    }

    /// Returns the flat buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Releases the flat buffer.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Maps a multi-index to its flat key.
    ///
    /// # Errors
    /// [`TensorError::RankMismatch`] if `indices.len()` differs from the rank,
    /// [`TensorError::IndexOutOfRange`] if any component exceeds its axis.
    pub fn key_at(&self, indices: &[usize]) -> Result<usize, TensorError> {
        if indices.len() != self.dimension() {
            return Err(TensorError::RankMismatch {
                expected: self.dimension(),
                actual: indices.len(),
            });
        }
        let mut key = 0;
        for (axis, ((&index, &extent), &stride)) in indices
            .iter()
            .zip(self.dims())
            .zip(self.strides())
            .enumerate()
        {
            if index >= extent {
                return Err(TensorError::IndexOutOfRange {
                    axis,
                    index,
                    extent,
                });
            }
            key += index * stride;
        }
        Ok(key)
    }

    /// Returns the value at a multi-index.
    pub fn data_at(&self, indices: &[usize]) -> Result<f64, TensorError> {
        Ok(self.data[self.key_at(indices)?])
    }

    /// Maps a flat key back to its multi-index. Inverse of [`key_at`](Tensor::key_at).
    ///
    /// # Errors
    /// [`TensorError::KeyOutOfRange`] if `key >= self.length()`.
    pub fn indices_for(&self, key: usize) -> Result<Vec<usize>, TensorError> {
        if key >= self.length() {
            return Err(TensorError::KeyOutOfRange {
                key,
                len: self.length(),
            });
        }
        let mut rest = key;
        Ok(self
            .strides()
            .iter()
            .map(|&stride| {
                let index = rest / stride;
                rest %= stride;
                index
            })
            .collect())
    }

    /// Multiplies every entry by `factor` **in place** and returns `self`.
    ///
    /// This is the one mutating operation; use [`map`](Tensor::map) for a
    /// scaled copy.
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        self.data.iter_mut().for_each(|x| *x *= factor);
        self
    }

    /// Applies `f` to every entry, returning a new tensor of the same shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Tensor {
        Tensor {
            shape: self.shape.clone(),
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    /// Returns a lazy, row-major iterator over `(key, value, indices)` entries.
    ///
    /// Each call opens an independent pass over the buffer. The borrow keeps
    /// the buffer frozen for the lifetime of the iterator.
    ///
    /// # Examples
    /// ```
    /// use ndtensor::Tensor;
    /// let t = Tensor::from_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// let last = t.entries().last().unwrap();
    /// assert_eq!((last.key, last.value, last.indices), (3, 4.0, vec![1, 1]));
    /// ```
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            data: &self.data,
            odometer: Odometer::new(self.shape.dims()),
            key: 0,
        }
    }
}

/// One item produced by [`Tensor::entries`].
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Flat position in the buffer.
    pub key: usize,
    /// The value stored at `key`.
    pub value: f64,
    /// The multi-index of `key`.
    pub indices: Vec<usize>,
}

/// Row-major entry iterator returned by [`Tensor::entries`].
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    data: &'a [f64],
    odometer: Odometer<'a>,
    key: usize,
}

impl Iterator for Entries<'_> {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        let indices = self.odometer.next()?;
        let key = self.key;
        self.key += 1;
        Some(Entry {
            key,
            value: self.data[key],
            indices,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.data.len() - self.key;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Entries<'_> {}

/// Prints the tensor as nested brackets, e.g. `[[1, 2], [3, 4]]`.
impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn level(
            f: &mut fmt::Formatter<'_>,
            data: &[f64],
            dims: &[usize],
            strides: &[usize],
        ) -> fmt::Result {
            write!(f, "[")?;
            for i in 0..dims[0] {
                if i > 0 {
                    write!(f, ", ")?;
                }
                if dims.len() == 1 {
                    write!(f, "{}", data[i])?;
                } else {
                    let block = &data[i * strides[0]..(i + 1) * strides[0]];
                    level(f, block, &dims[1..], &strides[1..])?;
                }
            }
            write!(f, "]")
        }
        level(f, &self.data, self.dims(), self.strides())
    }
}
