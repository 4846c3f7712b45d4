// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Row-major multi-index enumeration.
//!
//! An [`Odometer`] walks every multi-index of a shape, last axis fastest,
//! using one mutable index vector: no recursion and no materialised index
//! lists. Each step reports the *carry position*, the axis that was
//! incremented while every axis to its right rolled back to zero. The
//! contraction kernel keys its offset updates off that position.

/// Carry-and-reset enumeration of all multi-indices of `extents`.
///
/// The odometer starts at the all-zero index. [`advance`](Odometer::advance)
/// moves to the next index and returns the carry position; the
/// [`Iterator`] impl yields owned copies of every index including the first.
///
/// An empty extent list has exactly one (empty) multi-index. An extent of
/// zero yields nothing.
///
/// # Examples
/// ```
/// use ndtensor::Odometer;
/// let visited: Vec<Vec<usize>> = Odometer::new(&[2, 2]).collect();
/// assert_eq!(visited, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
/// ```
#[derive(Debug, Clone)]
pub struct Odometer<'a> {
    extents: &'a [usize],
    indices: Vec<usize>,
    /// Set once the current index has been handed out by `next`.
    emitted: bool,
    exhausted: bool,
}

impl<'a> Odometer<'a> {
    /// Creates an odometer positioned at the all-zero multi-index.
    pub fn new(extents: &'a [usize]) -> Self {
        Self {
            extents,
            indices: vec![0; extents.len()],
            emitted: false,
            exhausted: extents.contains(&0),
        }
    }

    /// Returns the current multi-index.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns `true` once every multi-index has been visited.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Steps to the next multi-index in row-major order.
    ///
    /// Returns the carry position `pos`: `indices[pos]` was incremented and
    /// every index right of `pos` was reset to zero. Returns `None` when the
    /// current index was the last one; the odometer is then exhausted.
    pub fn advance(&mut self) -> Option<usize> {
        if self.exhausted {
            return None;
        }
        let mut pos = self.extents.len();
        while pos > 0 {
            pos -= 1;
            if self.indices[pos] + 1 < self.extents[pos] {
                self.indices[pos] += 1;
                self.indices[pos + 1..].iter_mut().for_each(|i| *i = 0);
                return Some(pos);
            }
        }
        self.exhausted = true;
        None
    }

    /// Total number of multi-indices, `product(extents)`.
    pub fn total(&self) -> usize {
        self.extents.iter().product()
    }
}

impl Iterator for Odometer<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        if self.emitted {
            self.advance()?;
        }
        self.emitted = true;
        Some(self.indices.clone())
    }
}
