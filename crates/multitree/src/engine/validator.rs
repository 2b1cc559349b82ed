//! Input validation for multi-tree configuration and data.
//!
//! ## Purpose
//!
//! This module provides the validation functions for run configuration and
//! point-set data. All checks run before any tree is built or any tuple is
//! visited, so a failed run never produces partial results.
//!
//! ## Design notes
//!
//! * Validation is fail-fast: returns on the first error encountered.
//! * Error messages include the offending values.
//! * Checks are ordered from cheap to expensive.
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Validated parameters
//!
//! * **Point data**: Non-empty, rectangular, all coordinates finite
//! * **Leaf size**: At least 1
//! * **Tolerances**: Finite and non-negative (absolute and relative)
//! * **Naive limit**: Finite and positive
//! * **Run shape**: Positive arity, one point-set reference per slot,
//!   matching dimensionality across all referenced sets
//! * **Naive cost**: Tuple count within the configured safety limit
//!
//! ## Invariants
//!
//! * Validation is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not verify kernel bound soundness (checked by a debug
//!   assertion during traversal).
//! * This module does not correct invalid inputs.
//!
//! ## Visibility
//!
//! Used by the builder, the point-set constructor, and the naive evaluator;
//! not part of the public API.

use num_traits::Float;

use crate::primitives::dataset::PointSet;
use crate::primitives::errors::MultiTreeError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for multi-tree configuration and input data.
///
/// All methods return `Result<(), MultiTreeError>` and fail fast on the
/// first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Data Validation
    // ========================================================================

    /// Validate a flattened row-major coordinate buffer.
    pub fn validate_points<T: Float>(coords: &[T], dims: usize) -> Result<(), MultiTreeError> {
        if dims == 0 {
            return Err(MultiTreeError::ZeroDimensions);
        }
        if coords.is_empty() {
            return Err(MultiTreeError::EmptyPointSet);
        }
        if coords.len() % dims != 0 {
            return Err(MultiTreeError::NonRectangularInput {
                len: coords.len(),
                dims,
            });
        }
        for (i, &value) in coords.iter().enumerate() {
            if !value.is_finite() {
                return Err(MultiTreeError::InvalidNumericValue(format!(
                    "coords[{}]={}",
                    i,
                    value.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the leaf-size threshold for tree construction.
    pub fn validate_leaf_size(leaf_size: usize) -> Result<(), MultiTreeError> {
        if leaf_size == 0 {
            return Err(MultiTreeError::InvalidLeafSize(leaf_size));
        }
        Ok(())
    }

    /// Validate one tolerance component (absolute or relative).
    pub fn validate_tolerance(tolerance: f64) -> Result<(), MultiTreeError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(MultiTreeError::InvalidTolerance(tolerance));
        }
        Ok(())
    }

    /// Validate the naive-evaluator tuple safety limit.
    pub fn validate_naive_limit(limit: f64) -> Result<(), MultiTreeError> {
        if !limit.is_finite() || limit <= 0.0 {
            return Err(MultiTreeError::InvalidNaiveLimit(limit));
        }
        Ok(())
    }

    /// Validate that no builder parameter was set multiple times.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), MultiTreeError> {
        if let Some(parameter) = duplicate_param {
            return Err(MultiTreeError::DuplicateParameter { parameter });
        }
        Ok(())
    }

    // ========================================================================
    // Run Validation
    // ========================================================================

    /// Validate the shape of one run: arity, slot count, dimensionality.
    pub fn validate_run<T: Float>(
        arity: usize,
        sets: &[&PointSet<T>],
    ) -> Result<(), MultiTreeError> {
        if arity == 0 {
            return Err(MultiTreeError::ZeroArity);
        }
        if sets.len() != arity {
            return Err(MultiTreeError::ArityMismatch {
                arity,
                sets: sets.len(),
            });
        }
        let expected = sets[0].dims();
        for set in &sets[1..] {
            if set.dims() != expected {
                return Err(MultiTreeError::MismatchedDimensions {
                    expected,
                    got: set.dims(),
                });
            }
        }
        Ok(())
    }

    /// Validate that a naive run stays within its tuple safety limit.
    pub fn validate_naive_cost(tuples: f64, limit: f64) -> Result<(), MultiTreeError> {
        if tuples > limit {
            return Err(MultiTreeError::NaiveCostExceeded { tuples, limit });
        }
        Ok(())
    }
}
