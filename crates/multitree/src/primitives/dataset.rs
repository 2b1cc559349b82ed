//! Point-set storage for multi-tree computations.
//!
//! ## Purpose
//!
//! This module defines [`PointSet`], the immutable collection of
//! fixed-dimension points that every slot of a multibody kernel draws from.
//! Points are stored as a flattened row-major buffer (rows are points,
//! columns are coordinates), the layout used throughout the crate.
//!
//! ## Design notes
//!
//! * Construction validates the data once (rectangular, non-empty, finite);
//!   afterwards the set is read-only for the duration of a run.
//! * Generic over `Float` to support f32 and f64.
//! * A point is identified by its index within its set; trees built over a
//!   set keep their own permuted copy and never mutate the set itself.
//!
//! ## Invariants
//!
//! * `coords.len() == len() * dims()` and `dims() >= 1`.
//! * Every stored coordinate is finite.
//!
//! ## Non-goals
//!
//! * This module does not parse files; loading data is the caller's job.
//! * This module does not support updates after construction.

use num_traits::Float;

use crate::engine::validator::Validator;
use crate::input::PointsInput;
use crate::primitives::errors::MultiTreeError;

// ============================================================================
// Point Set
// ============================================================================

/// An immutable, validated set of fixed-dimension points.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet<T> {
    /// Flattened row-major coordinates.
    coords: Vec<T>,
    /// Number of coordinates per point.
    dims: usize,
}

impl<T: Float> PointSet<T> {
    /// Build a point set from any contiguous input container.
    ///
    /// `dims` is the number of coordinates per point; the input length must
    /// be a multiple of it. Fails fast on empty, non-rectangular, or
    /// non-finite data.
    pub fn new<D>(data: &D, dims: usize) -> Result<Self, MultiTreeError>
    where
        D: PointsInput<T> + ?Sized,
    {
        let slice = data.as_point_slice()?;
        Validator::validate_points(slice, dims)?;
        Ok(Self {
            coords: slice.to_vec(),
            dims,
        })
    }

    /// Number of points in the set.
    pub fn len(&self) -> usize {
        self.coords.len() / self.dims
    }

    /// Returns true if the set contains no points.
    ///
    /// Construction rejects empty data, so this is false for any set built
    /// through [`PointSet::new`].
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Number of coordinates per point.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Coordinate slice of the point at `index`.
    #[inline]
    pub fn point(&self, index: usize) -> &[T] {
        let offset = index * self.dims;
        &self.coords[offset..offset + self.dims]
    }

    /// The flattened row-major coordinate buffer.
    pub fn coords(&self) -> &[T] {
        &self.coords
    }
}
