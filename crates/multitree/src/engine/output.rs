//! Result accumulation and reporting for multi-tree runs.
//!
//! ## Purpose
//!
//! This module defines [`QueryResult`], the accumulator both the traversal
//! engine and the naive evaluator write into: per-point running sums (one
//! vector per distinct point set), the global sum estimate, prune and
//! evaluation counters, and the bookkeeping quantities that make the error
//! budget observable. It also defines [`RelativeErrorSummary`], the report
//! produced by comparing an approximate accumulator against an exact one.
//!
//! ## Design notes
//!
//! * Mutation is monotone during a run (sums only accumulate) and is locked
//!   by `finalize`; accumulating into a finalized result is a programming
//!   error caught by a debug assertion.
//! * `tuples_accounted` sums the multiplicities of every pruned and every
//!   directly evaluated tuple; after a complete run it equals the total
//!   tuple count, which is the no-double-counting check.
//! * `error_spent` sums `multiplicity * half-width` over pruned tuples; it
//!   never exceeds the configured tolerance.
//! * Budget bookkeeping is carried in `f64` regardless of the point
//!   precision `T`, matching how multiplicities are counted.
//!
//! ## Key concepts
//!
//! ### Per-Point Credit
//!
//! Each valid point tuple contributes its kernel value once to the running
//! sum of every point in the tuple. A pruned node tuple distributes its
//! estimated mass uniformly: each slot's node passes `multiplicity /
//! node-size` of the estimate to every point beneath it.
//!
//! ### Relative Error Report
//!
//! `maximum_relative_error` compares entry-wise against a ground-truth
//! accumulator: `(value - truth) / |truth|`, reporting the maximum absolute
//! value together with the signed extremes. Entries whose ground truth is
//! exactly zero count as zero error when the value is also zero and as
//! infinite error otherwise.
//!
//! ## Invariants
//!
//! * All vectors keep the lengths fixed at construction.
//! * After `finalize`, the result is read-only.
//!
//! ## Non-goals
//!
//! * This module does not decide what to prune; it only records outcomes.
//! * This module does not validate that two compared results came from the
//!   same input beyond shape checking.

use std::fmt;
use std::io::{self, Write};

use num_traits::Float;

use crate::primitives::errors::MultiTreeError;

// ============================================================================
// Accumulation Targets
// ============================================================================

/// One slot's distribution target for an approximated node tuple: the
/// distinct-set index and the original ids of the points beneath the
/// slot's node.
#[derive(Debug, Clone, Copy)]
pub struct ApproxTarget<'a> {
    /// Index of the distinct point set the slot draws from.
    pub set: usize,
    /// Original indices of the points beneath the slot's node.
    pub ids: &'a [usize],
}

// ============================================================================
// Query Result
// ============================================================================

/// Accumulated sums, bounds bookkeeping, and prune statistics for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    /// Per-point running sums, one vector per distinct point set.
    potentials: Vec<Vec<T>>,

    /// Node tuples approximated by a bound-derived midpoint estimate.
    pub num_finite_difference_prunes: u64,

    /// Node tuples discarded because their multiplicity was zero.
    pub num_exclusion_prunes: u64,

    /// Concrete point tuples evaluated exactly.
    pub num_direct_evaluations: u64,

    /// Running estimate of the global sum over all valid tuples.
    total_sum: f64,

    /// Upper bound on the approximation error introduced so far.
    error_spent: f64,

    /// Sum of multiplicities of all pruned and evaluated tuples.
    tuples_accounted: f64,

    finalized: bool,
}

impl<T: Float> QueryResult<T> {
    /// Create an empty accumulator for distinct point sets of the given
    /// sizes.
    pub fn new(set_sizes: &[usize]) -> Self {
        Self {
            potentials: set_sizes.iter().map(|&n| vec![T::zero(); n]).collect(),
            num_finite_difference_prunes: 0,
            num_exclusion_prunes: 0,
            num_direct_evaluations: 0,
            total_sum: 0.0,
            error_spent: 0.0,
            tuples_accounted: 0.0,
            finalized: false,
        }
    }

    // ========================================================================
    // Accumulation
    // ========================================================================

    /// Record an approximated node tuple.
    ///
    /// Distributes `multiplicity * estimate` uniformly over each slot's
    /// points and books `multiplicity * half_width` against the error
    /// budget.
    pub fn add_approx(
        &mut self,
        targets: &[ApproxTarget<'_>],
        multiplicity: f64,
        estimate: T,
        half_width: f64,
    ) {
        debug_assert!(!self.finalized, "accumulator is finalized");

        for target in targets {
            let share = T::from(multiplicity / target.ids.len() as f64)
                .unwrap_or_else(T::infinity)
                * estimate;
            for &id in target.ids {
                self.potentials[target.set][id] = self.potentials[target.set][id] + share;
            }
        }

        self.total_sum += multiplicity * estimate.to_f64().unwrap_or(f64::NAN);
        self.error_spent += multiplicity * half_width;
        self.tuples_accounted += multiplicity;
        self.num_finite_difference_prunes += 1;
    }

    /// Record one exactly evaluated point tuple.
    ///
    /// `targets` holds `(set, point id)` per slot; the value is credited to
    /// every participating point and once to the global sum.
    pub fn add_exact(&mut self, targets: &[(usize, usize)], value: T) {
        debug_assert!(!self.finalized, "accumulator is finalized");

        for &(set, id) in targets {
            self.potentials[set][id] = self.potentials[set][id] + value;
        }

        self.total_sum += value.to_f64().unwrap_or(f64::NAN);
        self.tuples_accounted += 1.0;
        self.num_direct_evaluations += 1;
    }

    /// Lock the accumulator against further mutation.
    pub fn finalize(&mut self) {
        self.finalized = true;
    }

    // ========================================================================
    // Query Methods
    // ========================================================================

    /// True once `finalize` has been called.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Per-point sums, one vector per distinct point set.
    pub fn potentials(&self) -> &[Vec<T>] {
        &self.potentials
    }

    /// Running estimate of the global sum over all valid tuples.
    pub fn total_sum(&self) -> f64 {
        self.total_sum
    }

    /// Upper bound on the approximation error introduced by pruning.
    pub fn error_spent(&self) -> f64 {
        self.error_spent
    }

    /// Sum of multiplicities of every pruned and evaluated tuple.
    pub fn tuples_accounted(&self) -> f64 {
        self.tuples_accounted
    }

    fn entry_count(&self) -> usize {
        self.potentials.iter().map(Vec::len).sum()
    }

    // ========================================================================
    // Comparison and Reporting
    // ========================================================================

    /// Maximum relative error of this accumulator against `truth`.
    ///
    /// Computed per corresponding entry as `(value - truth) / |truth|`;
    /// returns the maximum absolute value together with the signed
    /// extremes.
    pub fn maximum_relative_error(
        &self,
        truth: &Self,
    ) -> Result<RelativeErrorSummary, MultiTreeError> {
        let shapes_match = self.potentials.len() == truth.potentials.len()
            && self
                .potentials
                .iter()
                .zip(&truth.potentials)
                .all(|(a, b)| a.len() == b.len());
        if !shapes_match {
            return Err(MultiTreeError::MismatchedResults {
                left: self.entry_count(),
                right: truth.entry_count(),
            });
        }

        let mut summary = RelativeErrorSummary::default();
        for (mine, theirs) in self.potentials.iter().zip(&truth.potentials) {
            for (&a, &b) in mine.iter().zip(theirs) {
                let value = a.to_f64().unwrap_or(f64::NAN);
                let exact = b.to_f64().unwrap_or(f64::NAN);
                let rel = if exact != 0.0 {
                    (value - exact) / exact.abs()
                } else if value == 0.0 {
                    0.0
                } else {
                    f64::INFINITY
                };
                summary.max_absolute = summary.max_absolute.max(rel.abs());
                summary.max_positive = summary.max_positive.max(rel);
                summary.max_negative = summary.max_negative.min(rel);
            }
        }
        Ok(summary)
    }

    /// Write a deterministic per-entry report: one `set index value` line
    /// per point, in set order then index order.
    pub fn dump<W: Write>(&self, destination: &mut W) -> io::Result<()> {
        for (set, sums) in self.potentials.iter().enumerate() {
            for (index, value) in sums.iter().enumerate() {
                writeln!(
                    destination,
                    "{} {} {:.12e}",
                    set,
                    index,
                    value.to_f64().unwrap_or(f64::NAN)
                )?;
            }
        }
        Ok(())
    }
}

impl<T: Float> fmt::Display for QueryResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Entries: {}", self.entry_count())?;
        writeln!(f, "  Total sum: {:.6e}", self.total_sum)?;
        writeln!(f, "  Tuples accounted: {:.6e}", self.tuples_accounted)?;
        writeln!(f, "  Error spent: {:.6e}", self.error_spent)?;
        writeln!(
            f,
            "  Finite difference prunes: {}",
            self.num_finite_difference_prunes
        )?;
        writeln!(f, "  Exclusion prunes: {}", self.num_exclusion_prunes)?;
        writeln!(f, "  Direct evaluations: {}", self.num_direct_evaluations)
    }
}

// ============================================================================
// Relative Error Summary
// ============================================================================

/// Entry-wise relative error extremes between two accumulators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeErrorSummary {
    /// Maximum absolute relative error over all entries.
    pub max_absolute: f64,
    /// Largest positive signed relative error (0 if none positive).
    pub max_positive: f64,
    /// Most negative signed relative error (0 if none negative).
    pub max_negative: f64,
}

impl Default for RelativeErrorSummary {
    fn default() -> Self {
        Self {
            max_absolute: 0.0,
            max_positive: 0.0,
            max_negative: 0.0,
        }
    }
}

impl fmt::Display for RelativeErrorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Maximum relative error: {:e}", self.max_absolute)?;
        writeln!(f, "Positive max relative error: {:e}", self.max_positive)?;
        writeln!(f, "Negative max relative error: {:e}", self.max_negative)
    }
}
