//! Pairwise Euclidean distance kernel.
//!
//! ## Purpose
//!
//! A two-body kernel whose value is the Euclidean distance between its two
//! points. In one dimension this is the absolute difference. Primarily a
//! validation kernel: its bounds are exactly the min/max box distances, so
//! traversal behavior is easy to reason about in tests.
//!
//! ## Invariants
//!
//! * Values are non-negative.
//! * Bounds are tight for box-shaped regions.

use num_traits::Float;

use crate::kernel::capability::MultibodyKernel;
use crate::tree::bounds::BoundingBox;

// ============================================================================
// Euclidean Kernel
// ============================================================================

/// Two-body kernel: `K(a, b) = ||a - b||`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanKernel;

impl<T: Float> MultibodyKernel<T> for EuclideanKernel {
    fn arity(&self) -> usize {
        2
    }

    fn evaluate(&self, points: &[&[T]]) -> T {
        let (a, b) = (points[0], points[1]);
        let mut sum = T::zero();
        for d in 0..a.len() {
            let diff = a[d] - b[d];
            sum = sum + diff * diff;
        }
        sum.sqrt()
    }

    fn bound(&self, regions: &[&BoundingBox<T>]) -> (T, T) {
        let (a, b) = (regions[0], regions[1]);
        (a.min_dist_sq(b).sqrt(), a.max_dist_sq(b).sqrt())
    }
}
