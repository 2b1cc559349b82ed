//! Error types for multi-tree computations.
//!
//! ## Purpose
//!
//! This module defines [`MultiTreeError`], the single error enum returned by
//! every fallible operation in the crate. Variants are grouped into three
//! families: configuration errors (bad builder parameters), data errors
//! (malformed point sets), and the exhaustion error raised when the naive
//! evaluator is asked to enumerate more tuples than its safety limit allows.
//!
//! ## Design notes
//!
//! * All errors are detected before traversal starts; a run never produces
//!   partial results alongside an error.
//! * Error messages include the offending values for debugging.
//! * A violated kernel bound is not represented here: it indicates a faulty
//!   kernel capability, not bad input, and is reported through a debug
//!   assertion in the traversal base case instead.
//!
//! ## Non-goals
//!
//! * This module does not perform validation itself (handled by `validator`).
//! * This module does not classify degraded-precision outcomes as errors;
//!   heavier-than-expected pruning is surfaced through result statistics.
//!
//! ## Visibility
//!
//! [`MultiTreeError`] is part of the public API and is re-exported from the
//! crate prelude.

use thiserror::Error;

// ============================================================================
// Error Enum
// ============================================================================

/// Errors that can occur while configuring or running a multi-tree computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MultiTreeError {
    // ------------------------------------------------------------------------
    // Configuration errors
    // ------------------------------------------------------------------------
    /// The number of point-set references does not match the kernel arity.
    #[error("kernel arity is {arity} but {sets} point-set reference(s) were supplied")]
    ArityMismatch {
        /// Number of slots the kernel takes.
        arity: usize,
        /// Number of point-set references supplied.
        sets: usize,
    },

    /// The kernel reported an arity of zero.
    #[error("kernel arity must be positive")]
    ZeroArity,

    /// The leaf-size threshold for tree construction is not positive.
    #[error("leaf size must be at least 1, got {0}")]
    InvalidLeafSize(usize),

    /// A tolerance component is negative or not finite.
    #[error("tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),

    /// The naive-evaluator safety limit is not a positive finite number.
    #[error("naive tuple limit must be finite and positive, got {0}")]
    InvalidNaiveLimit(f64),

    /// A builder parameter was set more than once.
    #[error("parameter '{parameter}' was set multiple times")]
    DuplicateParameter {
        /// Name of the duplicated parameter.
        parameter: &'static str,
    },

    // ------------------------------------------------------------------------
    // Data errors
    // ------------------------------------------------------------------------
    /// A point set contains no points.
    #[error("point set is empty")]
    EmptyPointSet,

    /// The dimensionality passed for a point set is zero.
    #[error("point dimensionality must be at least 1")]
    ZeroDimensions,

    /// The flattened input length is not a multiple of the dimensionality.
    #[error("input of length {len} is not rectangular for dimensionality {dims}")]
    NonRectangularInput {
        /// Length of the flattened coordinate buffer.
        len: usize,
        /// Declared dimensionality.
        dims: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("non-finite coordinate: {0}")]
    InvalidNumericValue(String),

    /// Point sets referenced by the same run disagree on dimensionality.
    #[error("mismatched dimensionality across point sets: expected {expected}, got {got}")]
    MismatchedDimensions {
        /// Dimensionality of the first point set.
        expected: usize,
        /// Dimensionality of the offending point set.
        got: usize,
    },

    /// Input container cannot provide a contiguous slice view.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // ------------------------------------------------------------------------
    // Exhaustion
    // ------------------------------------------------------------------------
    /// The naive evaluator was requested on an input whose tuple count
    /// exceeds the configured safety limit.
    #[error("naive evaluation would visit {tuples:.3e} tuples, exceeding the limit of {limit:.3e}")]
    NaiveCostExceeded {
        /// Total number of tuples the naive evaluator would enumerate.
        tuples: f64,
        /// Configured safety limit.
        limit: f64,
    },

    // ------------------------------------------------------------------------
    // Result comparison
    // ------------------------------------------------------------------------
    /// Two accumulators being compared do not cover the same point sets.
    #[error("result shapes differ: {left} vs {right} entries")]
    MismatchedResults {
        /// Total entry count of the left accumulator.
        left: usize,
        /// Total entry count of the right accumulator.
        right: usize,
    },
}
