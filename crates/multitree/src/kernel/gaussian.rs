//! Three-body Gaussian kernel.
//!
//! ## Purpose
//!
//! A three-body kernel whose value decays with the summed squared pairwise
//! distances of its three points:
//!
//! ```text
//! K(a, b, c) = exp(-(d(a,b)^2 + d(a,c)^2 + d(b,c)^2) / h^2)
//! ```
//!
//! The interaction of a well-separated triple is negligible, which is what
//! lets the traversal prune distant node tuples aggressively.
//!
//! ## Design notes
//!
//! * Bounds follow from monotonicity: the kernel decreases in every pairwise
//!   distance, so the lower bound uses maximum box distances and the upper
//!   bound uses minimum box distances.
//! * Symmetric under any permutation of its three slots, as required for
//!   monochromatic use.
//!
//! ## Invariants
//!
//! * Values and bounds lie in (0, 1].
//! * `bandwidth` is positive (enforced at construction).

use num_traits::Float;

use crate::kernel::capability::MultibodyKernel;
use crate::tree::bounds::BoundingBox;

// ============================================================================
// Three-Body Gaussian Kernel
// ============================================================================

/// Three-body kernel: `exp(-(sum of squared pairwise distances) / h^2)`.
#[derive(Debug, Clone, Copy)]
pub struct ThreeBodyGaussianKernel<T> {
    /// Squared bandwidth `h^2`.
    bandwidth_sq: T,
}

impl<T: Float> ThreeBodyGaussianKernel<T> {
    /// Create a kernel with bandwidth `h`.
    ///
    /// # Panics
    ///
    /// Panics if `h` is not positive and finite.
    pub fn new(bandwidth: T) -> Self {
        assert!(
            bandwidth.is_finite() && bandwidth > T::zero(),
            "bandwidth must be positive and finite"
        );
        Self {
            bandwidth_sq: bandwidth * bandwidth,
        }
    }

    fn dist_sq(a: &[T], b: &[T]) -> T {
        let mut sum = T::zero();
        for d in 0..a.len() {
            let diff = a[d] - b[d];
            sum = sum + diff * diff;
        }
        sum
    }
}

impl<T: Float> MultibodyKernel<T> for ThreeBodyGaussianKernel<T> {
    fn arity(&self) -> usize {
        3
    }

    fn evaluate(&self, points: &[&[T]]) -> T {
        let sum = Self::dist_sq(points[0], points[1])
            + Self::dist_sq(points[0], points[2])
            + Self::dist_sq(points[1], points[2]);
        (-sum / self.bandwidth_sq).exp()
    }

    fn bound(&self, regions: &[&BoundingBox<T>]) -> (T, T) {
        let mut max_sum = T::zero();
        let mut min_sum = T::zero();
        for i in 0..3 {
            for j in (i + 1)..3 {
                max_sum = max_sum + regions[i].max_dist_sq(regions[j]);
                min_sum = min_sum + regions[i].min_dist_sq(regions[j]);
            }
        }
        (
            (-max_sum / self.bandwidth_sq).exp(),
            (-min_sum / self.bandwidth_sq).exp(),
        )
    }
}
