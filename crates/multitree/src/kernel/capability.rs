//! The pluggable multibody kernel contract.
//!
//! ## Purpose
//!
//! This module defines [`MultibodyKernel`], the closed capability set the
//! traversal engine consumes: a fixed arity, exact evaluation on one
//! concrete point tuple, and a sound value bound over a tuple of bounding
//! regions. The closed-form kernel formula itself is supplied by
//! implementors; the engine never inspects it.
//!
//! ## Key concepts
//!
//! ### Bound Soundness
//!
//! For every concrete point tuple drawable one-per-region from the given
//! regions, `evaluate` must lie within the returned `(lower, upper)`
//! interval. Bounds may be loose; looseness only costs pruning power,
//! never correctness. Violations are caught by a debug assertion in the
//! traversal base case.
//!
//! ### Monotonicity
//!
//! Bounds computed over subset regions must be at least as tight as over
//! their supersets; both shipped kernels satisfy this because shrinking a
//! box can only shrink the min/max distance intervals they derive from.
//!
//! ### Symmetry
//!
//! The engine evaluates each unordered tuple of same-set points exactly
//! once, so a kernel whose slots share a point set must be invariant under
//! permuting those slots.
//!
//! ## Invariants
//!
//! * `arity()` is positive and constant for the life of the kernel.
//! * `evaluate` and `bound` are pure: no side effects, no interior state.
//!
//! ## Non-goals
//!
//! * This module does not define distance metrics or region shapes (see
//!   `tree::bounds`).

use num_traits::Float;

use crate::tree::bounds::BoundingBox;

// ============================================================================
// Kernel Capability
// ============================================================================

/// A multibody kernel: arity, exact tuple evaluation, and sound region
/// bounds.
pub trait MultibodyKernel<T: Float> {
    /// Number of slots (bodies) the kernel takes simultaneously.
    fn arity(&self) -> usize;

    /// Exact value for one concrete point tuple.
    ///
    /// `points` holds exactly `arity()` coordinate slices of equal
    /// dimensionality, one per slot.
    fn evaluate(&self, points: &[&[T]]) -> T;

    /// Sound `(lower, upper)` bound on `evaluate` over every point tuple
    /// drawable one-per-region from `regions`.
    ///
    /// `regions` holds exactly `arity()` bounding boxes, one per slot.
    fn bound(&self, regions: &[&BoundingBox<T>]) -> (T, T);
}
