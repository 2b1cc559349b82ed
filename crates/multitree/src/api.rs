//! High-level API for multi-tree computations.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point: a fluent
//! builder for configuring a run (leaf size, error tolerance, naive safety
//! limit) that validates its parameters into an immutable model, which then
//! drives the traversal engine or the naive oracle over any kernel and
//! point-set references.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all
//!   parameters.
//! * **Validated**: Parameters are validated when `.build()` is called;
//!   setting a parameter twice is itself an error.
//! * **Explicit Configuration**: One configuration value per run, passed by
//!   reference into the engine; no ambient registries.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a [`MultiTreeBuilder`] via `MultiTree::new()`.
//! 2. Chain configuration methods (`.leaf_size()`, `.absolute_tolerance()`,
//!    etc.).
//! 3. Call `.build()` to obtain a validated [`MultiTreeModel`].
//! 4. Run `.compute(&kernel, &sets)` and optionally
//!    `.compute_naive(&kernel, &sets)` for ground truth.
//!
//! ### Slot Wiring
//!
//! `sets` holds one `&PointSet` per kernel slot. Passing the same reference
//! for several slots marks them as drawing from the same set (the
//! monochromatic case), which enables symmetry-aware enumeration.
//!
//! ## Visibility
//!
//! This is the primary public API. Types re-exported here are considered
//! stable.

use core::result;

use num_traits::Float;

use crate::engine::executor::MultiTreeDfs;
use crate::engine::naive;
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::engine::output::{QueryResult, RelativeErrorSummary};
pub use crate::kernel::capability::MultibodyKernel;
pub use crate::primitives::dataset::PointSet;
pub use crate::primitives::errors::MultiTreeError;

/// Result type alias for multi-tree operations.
pub type Result<T> = result::Result<T, MultiTreeError>;

/// Entry point alias: `MultiTree::new()` starts a builder.
pub type MultiTree = MultiTreeBuilder;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring a multi-tree run.
#[derive(Debug, Clone)]
pub struct MultiTreeBuilder {
    /// Leaf-size threshold for tree construction.
    pub leaf_size: Option<usize>,

    /// Absolute component of the global error tolerance.
    pub absolute_tolerance: Option<f64>,

    /// Component of the tolerance relative to the running total-sum
    /// estimate.
    pub relative_tolerance: Option<f64>,

    /// Safety limit on the tuple count the naive evaluator may enumerate.
    pub naive_limit: Option<f64>,

    /// Tracks if any parameter was set multiple times (for validation).
    pub(crate) duplicate_param: Option<&'static str>,
}

impl Default for MultiTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiTreeBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            leaf_size: None,
            absolute_tolerance: None,
            relative_tolerance: None,
            naive_limit: None,
            duplicate_param: None,
        }
    }

    /// Set the leaf-size threshold for tree construction (default: 20).
    pub fn leaf_size(mut self, leaf_size: usize) -> Self {
        if self.leaf_size.is_some() {
            self.duplicate_param = Some("leaf_size");
        }
        self.leaf_size = Some(leaf_size);
        self
    }

    /// Set the absolute error tolerance (default: 0, exact).
    pub fn absolute_tolerance(mut self, tolerance: f64) -> Self {
        if self.absolute_tolerance.is_some() {
            self.duplicate_param = Some("absolute_tolerance");
        }
        self.absolute_tolerance = Some(tolerance);
        self
    }

    /// Set the tolerance component relative to the running total-sum
    /// estimate (default: 0).
    pub fn relative_tolerance(mut self, tolerance: f64) -> Self {
        if self.relative_tolerance.is_some() {
            self.duplicate_param = Some("relative_tolerance");
        }
        self.relative_tolerance = Some(tolerance);
        self
    }

    /// Set the naive-evaluator tuple safety limit (default: 1e8).
    pub fn naive_limit(mut self, limit: f64) -> Self {
        if self.naive_limit.is_some() {
            self.duplicate_param = Some("naive_limit");
        }
        self.naive_limit = Some(limit);
        self
    }

    /// Validate the configuration into an immutable run model.
    pub fn build(self) -> Result<MultiTreeModel> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let leaf_size = self.leaf_size.unwrap_or(20);
        let absolute_tolerance = self.absolute_tolerance.unwrap_or(0.0);
        let relative_tolerance = self.relative_tolerance.unwrap_or(0.0);
        let naive_limit = self.naive_limit.unwrap_or(1e8);

        Validator::validate_leaf_size(leaf_size)?;
        Validator::validate_tolerance(absolute_tolerance)?;
        Validator::validate_tolerance(relative_tolerance)?;
        Validator::validate_naive_limit(naive_limit)?;

        Ok(MultiTreeModel {
            leaf_size,
            absolute_tolerance,
            relative_tolerance,
            naive_limit,
        })
    }
}

// ============================================================================
// Model
// ============================================================================

/// A validated, immutable run configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiTreeModel {
    leaf_size: usize,
    absolute_tolerance: f64,
    relative_tolerance: f64,
    naive_limit: f64,
}

impl MultiTreeModel {
    /// Run the approximate multi-tree traversal.
    ///
    /// `sets` holds one point-set reference per kernel slot; repeated
    /// references mark symmetric slots. Returns the finalized accumulator
    /// with per-point sums and prune statistics.
    pub fn compute<T, K>(&self, kernel: &K, sets: &[&PointSet<T>]) -> Result<QueryResult<T>>
    where
        T: Float + Send + Sync,
        K: MultibodyKernel<T>,
    {
        Validator::validate_run(kernel.arity(), sets)?;
        let mut engine = MultiTreeDfs::new(kernel, sets, self.leaf_size);
        Ok(engine.compute(self.absolute_tolerance, self.relative_tolerance))
    }

    /// Run the brute-force oracle over the same slot wiring.
    ///
    /// Fails with [`MultiTreeError::NaiveCostExceeded`] when the input's
    /// tuple count exceeds the configured safety limit.
    pub fn compute_naive<T, K>(&self, kernel: &K, sets: &[&PointSet<T>]) -> Result<QueryResult<T>>
    where
        T: Float + Send + Sync,
        K: MultibodyKernel<T>,
    {
        Validator::validate_run(kernel.arity(), sets)?;
        naive::compute(kernel, sets, self.naive_limit)
    }

    /// The configured leaf-size threshold.
    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// The configured absolute tolerance.
    pub fn absolute_tolerance(&self) -> f64 {
        self.absolute_tolerance
    }

    /// The configured relative tolerance.
    pub fn relative_tolerance(&self) -> f64 {
        self.relative_tolerance
    }

    /// The configured naive tuple safety limit.
    pub fn naive_limit(&self) -> f64 {
        self.naive_limit
    }
}
