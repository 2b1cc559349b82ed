//! Brute-force oracle evaluation.
//!
//! ## Purpose
//!
//! This module exhaustively enumerates every valid point tuple over the raw
//! point sets and sums exact kernel evaluations into an accumulator. It is
//! the ground truth the approximate traversal is validated against; cost is
//! combinatorial in point count and arity, so runs are guarded by a
//! configurable tuple-count safety limit.
//!
//! ## Design notes
//!
//! * Applies the same canonical-ordering rule as the traversal base case,
//!   but globally: slots sharing a point set pick strictly increasing
//!   original indices, so both evaluators count every unordered tuple
//!   exactly once and their accumulators are directly comparable.
//! * No trees, no bounds, no pruning; the only counters that move are
//!   `num_direct_evaluations` and `tuples_accounted`.
//!
//! ## Invariants
//!
//! * The tuple count is checked against the safety limit before any kernel
//!   evaluation happens.
//!
//! ## Non-goals
//!
//! * This module is not meant for large inputs; it exists for validation
//!   and relative-error reporting on small datasets.

use num_traits::Float;

use crate::engine::executor::group_slots;
use crate::engine::output::QueryResult;
use crate::engine::validator::Validator;
use crate::kernel::capability::MultibodyKernel;
use crate::math::counting::count_increasing_tuples;
use crate::primitives::dataset::PointSet;
use crate::primitives::errors::MultiTreeError;

// ============================================================================
// Naive Evaluation
// ============================================================================

/// Exhaustively evaluate every valid tuple over the raw point sets.
///
/// `sets` holds one reference per kernel slot, with repeated references
/// marking symmetric slots, exactly as in the tree-based runner. Fails with
/// [`MultiTreeError::NaiveCostExceeded`] when the tuple count exceeds
/// `limit`.
pub fn compute<T, K>(
    kernel: &K,
    sets: &[&PointSet<T>],
    limit: f64,
) -> Result<QueryResult<T>, MultiTreeError>
where
    T: Float,
    K: MultibodyKernel<T>,
{
    let (slot_group, group_slots) = group_slots(sets);
    let group_sets: Vec<&PointSet<T>> = group_slots
        .iter()
        .map(|slots| sets[slots[0]])
        .collect();

    let mut total_tuples = 1.0;
    for (slots, set) in group_slots.iter().zip(&group_sets) {
        let ranges = vec![0..set.len(); slots.len()];
        total_tuples *= count_increasing_tuples(&ranges);
    }
    Validator::validate_naive_cost(total_tuples, limit)?;

    let set_sizes: Vec<usize> = group_sets.iter().map(|s| s.len()).collect();
    let mut result = QueryResult::new(&set_sizes);

    let arity = sets.len();
    let mut indices = vec![0usize; arity];
    let mut points: Vec<&[T]> = vec![&[]; arity];
    let mut targets = vec![(0usize, 0usize); arity];
    enumerate(
        kernel,
        &group_sets,
        &slot_group,
        0,
        &mut indices,
        &mut points,
        &mut targets,
        &mut result,
    );

    result.finalize();
    Ok(result)
}

#[allow(clippy::too_many_arguments)]
fn enumerate<'a, T, K>(
    kernel: &K,
    group_sets: &[&'a PointSet<T>],
    slot_group: &[usize],
    slot: usize,
    indices: &mut Vec<usize>,
    points: &mut Vec<&'a [T]>,
    targets: &mut Vec<(usize, usize)>,
    result: &mut QueryResult<T>,
) where
    T: Float,
    K: MultibodyKernel<T>,
{
    if slot == slot_group.len() {
        let value = kernel.evaluate(points);
        result.add_exact(targets, value);
        return;
    }

    let group = slot_group[slot];
    let set = group_sets[group];

    // Strictly increasing indices among slots sharing a point set.
    let mut start = 0;
    for prev in 0..slot {
        if slot_group[prev] == group {
            start = start.max(indices[prev] + 1);
        }
    }

    for index in start..set.len() {
        indices[slot] = index;
        points[slot] = set.point(index);
        targets[slot] = (group, index);
        enumerate(
            kernel, group_sets, slot_group, slot + 1, indices, points, targets, result,
        );
    }
}
