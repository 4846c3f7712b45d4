// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Interned shape descriptors and the registry that issues them.
//!
//! A [`Shape`] bundles a size sequence with its row-major strides. Shapes are
//! only ever created through a [`ShapeRegistry`], which guarantees that two
//! elementwise-equal size sequences resolve to the *same* descriptor
//! allocation. Shape equality is therefore a pointer comparison.
//!
//! # Thread Safety
//! The registry map sits behind a `Mutex`, so concurrent interning of the
//! same size sequence from several threads still yields one descriptor.
//! Descriptors themselves are immutable and shared via `Arc`.

use crate::TensorError;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

/// The immutable payload behind a [`Shape`].
#[derive(Debug)]
struct Descriptor {
    dims: Box<[usize]>,
    strides: Box<[usize]>,
    num_elements: usize,
}

/// A canonical, shared shape descriptor: sizes plus row-major strides.
///
/// Cloning a `Shape` clones the `Arc`, not the sequences. Two shapes compare
/// equal only when they are the same interned descriptor, which for shapes
/// issued by one registry is equivalent to having equal sizes.
///
/// # Examples
/// ```
/// use ndtensor::Shape;
/// let a = Shape::new(&[2, 3, 4]).unwrap();
/// let b = Shape::new(&[2, 3, 4]).unwrap();
/// assert!(a.same(&b));
/// assert_eq!(a.strides(), &[12, 4, 1]);
/// assert_eq!(a.num_elements(), 24);
/// ```
#[derive(Clone)]
pub struct Shape(Arc<Descriptor>);

impl Shape {
    /// Interns `dims` in the process-wide registry.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidShape`] if `dims` is empty or contains a zero.
    pub fn new(dims: &[usize]) -> Result<Self, TensorError> {
        ShapeRegistry::global().intern(dims)
    }

    /// Interns the rank-1 shape `[len]`.
    pub fn vector(len: usize) -> Result<Self, TensorError> {
        Self::new(&[len])
    }

    /// Interns a size sequence given as floating-point numbers, as found in
    /// JSON payloads. Every entry must be a finite integer `>= 1`.
    pub fn from_extents(extents: &[f64]) -> Result<Self, TensorError> {
        let mut dims = Vec::with_capacity(extents.len());
        for &e in extents {
            if !e.is_finite() || e.fract() != 0.0 {
                return Err(TensorError::InvalidShape {
                    dims: extents.to_vec(),
                    detail: "sizes must be integers",
                });
            }
            if e < 1.0 {
                return Err(TensorError::InvalidShape {
                    dims: extents.to_vec(),
                    detail: "sizes must be at least 1",
                });
            }
            if e >= usize::MAX as f64 {
                return Err(TensorError::InvalidShape {
                    dims: extents.to_vec(),
                    detail: "size does not fit in usize",
                });
            }
            dims.push(e as usize);
        }
        Self::new(&dims)
    }

    /// Returns the size of every axis, outermost first.
    pub fn dims(&self) -> &[usize] {
        &self.0.dims
    }

    /// Returns the row-major strides: `strides[i] = product(dims[i + 1..])`.
    pub fn strides(&self) -> &[usize] {
        &self.0.strides
    }

    /// Returns the number of axes.
    pub fn rank(&self) -> usize {
        self.0.dims.len()
    }

    /// Returns the product of all sizes.
    pub fn num_elements(&self) -> usize {
        self.0.num_elements
    }

    /// Returns the size of axis `axis`, or `None` if out of bounds.
    pub fn dim(&self, axis: usize) -> Option<usize> {
        self.0.dims.get(axis).copied()
    }

    /// Returns `true` if both handles point at the same interned descriptor.
    pub fn same(&self, other: &Shape) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Shape {}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("dims", &self.0.dims)
            .field("strides", &self.0.strides)
            .finish()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.0.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

/// Interns size sequences into canonical [`Shape`] descriptors.
///
/// Most callers never touch a registry directly: [`Shape::new`] and every
/// `Tensor` constructor go through [`ShapeRegistry::global`]. Separate
/// registries are useful for isolation in tests, but shapes from different
/// registries never compare equal.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    shapes: Mutex<HashMap<Vec<usize>, Shape>>,
}

impl ShapeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide registry.
    pub fn global() -> &'static ShapeRegistry {
        static GLOBAL: OnceLock<ShapeRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ShapeRegistry::new)
    }

    /// Returns the canonical descriptor for `dims`, creating it on first use.
    ///
    /// Strides are computed once, when the descriptor is created.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidShape`] if `dims` is empty, contains a
    /// zero, or its element count overflows `usize`.
    pub fn intern(&self, dims: &[usize]) -> Result<Shape, TensorError> {
        if dims.is_empty() {
            return Err(TensorError::invalid_shape(dims, "rank must be at least 1"));
        }
        if dims.iter().any(|&d| d == 0) {
            return Err(TensorError::invalid_shape(dims, "sizes must be at least 1"));
        }
        let num_elements = dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| TensorError::invalid_shape(dims, "element count overflows usize"))?;

        // The map is only mutated by a single insert, so a poisoned lock
        // still guards a consistent table.
        let mut shapes = self.shapes.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(shape) = shapes.get(dims) {
            return Ok(shape.clone());
        }

        let shape = Shape(Arc::new(Descriptor {
            dims: dims.into(),
            strides: row_major_strides(dims).into_boxed_slice(),
            num_elements,
        }));
        shapes.insert(dims.to_vec(), shape.clone());
        tracing::trace!(shape = %shape, interned = shapes.len(), "interned new shape");
        Ok(shape)
    }

    /// Returns the number of distinct shapes interned so far.
    pub fn len(&self) -> usize {
        self.shapes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The stride for axis `i` is the number of flat positions to skip to
/// advance one step along that axis.
fn row_major_strides(dims: &[usize]) -> Vec<usize> {
    let rank = dims.len();
    let mut strides = vec![1usize; rank];
    for i in (0..rank.saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * dims[i + 1];
    }
    strides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_shape() {
        let s = Shape::vector(5).unwrap();
        assert_eq!(s.rank(), 1);
        assert_eq!(s.num_elements(), 5);
        assert_eq!(s.strides(), &[1]);
    }

    #[test]
    fn test_matrix_shape() {
        let s = Shape::new(&[3, 4]).unwrap();
        assert_eq!(s.rank(), 2);
        assert_eq!(s.num_elements(), 12);
        assert_eq!(s.strides(), &[4, 1]);
        assert_eq!(s.dim(1), Some(4));
        assert_eq!(s.dim(2), None);
    }

    #[test]
    fn test_3d_strides() {
        let s = Shape::new(&[2, 3, 4]).unwrap();
        assert_eq!(s.strides(), &[12, 4, 1]);
    }

    #[test]
    fn test_display() {
        let s = Shape::new(&[2, 3, 4]).unwrap();
        assert_eq!(format!("{s}"), "[2, 3, 4]");
    }

    #[test]
    fn test_interning_shares_descriptor() {
        let a = Shape::new(&[7, 2]).unwrap();
        let b = Shape::new(&vec![7, 2]).unwrap();
        assert!(a.same(&b));
        assert_eq!(a, b);
        assert!(std::ptr::eq(a.dims().as_ptr(), b.dims().as_ptr()));
        assert!(std::ptr::eq(a.strides().as_ptr(), b.strides().as_ptr()));

        let c = Shape::new(&[2, 7]).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_isolated_registry() {
        let registry = ShapeRegistry::new();
        assert!(registry.is_empty());

        let a = registry.intern(&[3, 3]).unwrap();
        let b = registry.intern(&[3, 3]).unwrap();
        registry.intern(&[9]).unwrap();
        assert!(a.same(&b));
        assert_eq!(registry.len(), 2);

        // Same sizes, different registry: a different descriptor.
        let global = Shape::new(&[3, 3]).unwrap();
        assert!(!a.same(&global));
    }

    #[test]
    fn test_invalid_shapes() {
        assert!(matches!(
            Shape::new(&[]),
            Err(TensorError::InvalidShape { .. })
        ));
        assert!(matches!(
            Shape::new(&[2, 0, 3]),
            Err(TensorError::InvalidShape { .. })
        ));
        assert!(matches!(
            Shape::new(&[usize::MAX, 2]),
            Err(TensorError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_from_extents() {
        let s = Shape::from_extents(&[2.0, 3.0]).unwrap();
        assert!(s.same(&Shape::new(&[2, 3]).unwrap()));

        // 2^64 is the nearest f64 to usize::MAX and would saturate in the cast.
        for bad in [
            &[2.0, 3.5][..],
            &[-1.0][..],
            &[0.0][..],
            &[f64::NAN][..],
            &[][..],
            &[18_446_744_073_709_551_616.0][..],
            &[2.0, f64::INFINITY][..],
        ] {
            assert!(
                matches!(Shape::from_extents(bad), Err(TensorError::InvalidShape { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_concurrent_interning() {
        let registry = ShapeRegistry::new();
        let shapes: Vec<Shape> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| registry.intern(&[4, 5, 6]).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(shapes.windows(2).all(|w| w[0].same(&w[1])));
        assert_eq!(registry.len(), 1);
    }
}
