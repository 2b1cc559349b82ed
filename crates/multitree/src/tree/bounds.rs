//! Axis-aligned bounding regions for tree nodes.
//!
//! ## Purpose
//!
//! This module defines [`BoundingBox`], the minimal axis-aligned enclosing
//! region stored on every tree node. Boxes are derived once at build time
//! and are immutable afterwards; kernels consume them to compute sound
//! value bounds over region tuples.
//!
//! ## Design notes
//!
//! * Per-dimension extrema only; no centroid or higher moments are kept,
//!   since the shipped kernels bound through pairwise box distances.
//! * Distance helpers return squared distances; kernels take the root only
//!   where their formula needs it.
//!
//! ## Invariants
//!
//! * `lower[d] <= upper[d]` for every dimension of a box built from points.
//! * A box built from a point subset contains every point in that subset.
//!
//! ## Non-goals
//!
//! * This module does not support ball regions; boxes are the only region
//!   shape the tree builder produces.

use num_traits::Float;

// ============================================================================
// Bounding Box
// ============================================================================

/// Minimal axis-aligned enclosing box for a subset of points.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox<T> {
    /// Per-dimension minima.
    lower: Vec<T>,
    /// Per-dimension maxima.
    upper: Vec<T>,
}

impl<T: Float> BoundingBox<T> {
    /// Compute the tight box around the rows of `coords` selected by `idx`.
    pub fn from_indexed(coords: &[T], dims: usize, idx: &[usize]) -> Self {
        let mut lower = vec![T::infinity(); dims];
        let mut upper = vec![T::neg_infinity(); dims];

        for &i in idx {
            let row = &coords[i * dims..(i + 1) * dims];
            for d in 0..dims {
                if row[d] < lower[d] {
                    lower[d] = row[d];
                }
                if row[d] > upper[d] {
                    upper[d] = row[d];
                }
            }
        }

        Self { lower, upper }
    }

    /// Number of dimensions.
    pub fn dims(&self) -> usize {
        self.lower.len()
    }

    /// Per-dimension minima.
    pub fn lower(&self) -> &[T] {
        &self.lower
    }

    /// Per-dimension maxima.
    pub fn upper(&self) -> &[T] {
        &self.upper
    }

    /// Extent of the box along dimension `d`.
    #[inline]
    pub fn width(&self, d: usize) -> T {
        self.upper[d] - self.lower[d]
    }

    /// The dimension with the largest extent.
    pub fn widest_dimension(&self) -> usize {
        let mut best = 0;
        for d in 1..self.dims() {
            if self.width(d) > self.width(best) {
                best = d;
            }
        }
        best
    }

    /// True if `point` lies inside the box (boundaries included).
    pub fn contains(&self, point: &[T]) -> bool {
        point
            .iter()
            .enumerate()
            .all(|(d, &v)| v >= self.lower[d] && v <= self.upper[d])
    }

    /// Squared minimum distance between any point of `self` and any point
    /// of `other`. Zero when the boxes overlap.
    pub fn min_dist_sq(&self, other: &Self) -> T {
        let mut sum = T::zero();
        for d in 0..self.dims() {
            let gap = (other.lower[d] - self.upper[d]).max(self.lower[d] - other.upper[d]);
            if gap > T::zero() {
                sum = sum + gap * gap;
            }
        }
        sum
    }

    /// Squared maximum distance between any point of `self` and any point
    /// of `other`.
    pub fn max_dist_sq(&self, other: &Self) -> T {
        let mut sum = T::zero();
        for d in 0..self.dims() {
            let span = (self.upper[d] - other.lower[d])
                .abs()
                .max((other.upper[d] - self.lower[d]).abs());
            sum = sum + span * span;
        }
        sum
    }
}
