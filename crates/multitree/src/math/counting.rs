//! Combinatorial tuple counting for node tuples.
//!
//! ## Purpose
//!
//! This module counts the number of valid point tuples a node tuple stands
//! for. Slots drawing from the same point set must pick strictly increasing
//! positions in the tree's permuted point array (the canonical-ordering rule
//! that removes `arity!`-fold double counting for symmetric kernels), so the
//! count is the number of strictly increasing position tuples drawable
//! one-per-range from the slots' node ranges.
//!
//! ## Design notes
//!
//! * Ranges from one tree are disjoint, nested, or identical, but the
//!   counter does not rely on that: it handles arbitrary half-open ranges.
//! * Ranges are cut into elementary segments at every range endpoint; each
//!   segment is then fully inside or fully outside every range. Slots are
//!   assigned to segments in non-decreasing order, and `m` slots sharing a
//!   segment of length `len` contribute `C(len, m)` choices.
//! * Counts are carried as `f64`, mirroring how the accumulator weights
//!   pruned contributions. Exact up to 2^53, and the approximation error for
//!   astronomically large tuple spaces is irrelevant to budget allocation.
//!
//! ## Invariants
//!
//! * A slot count of zero yields 1 (the empty tuple).
//! * Any empty range yields 0.
//! * For `k` identical ranges of length `n` the count equals `C(n, k)`.
//!
//! ## Non-goals
//!
//! * This module does not enumerate the tuples (the traversal base case and
//!   the naive evaluator do their own enumeration).

use core::ops::Range;

// ============================================================================
// Tuple Counting
// ============================================================================

/// Count strictly increasing position tuples, one position per range.
///
/// Returns the number of tuples `(i_0 < i_1 < ... < i_{k-1})` with
/// `i_j` in `ranges[j]`. Slot order is significant: a tuple of ranges that
/// admits no increasing assignment counts as zero.
pub fn count_increasing_tuples(ranges: &[Range<usize>]) -> f64 {
    if ranges.is_empty() {
        return 1.0;
    }
    if ranges.iter().any(|r| r.is_empty()) {
        return 0.0;
    }

    // Elementary segments: cut at every range endpoint so each segment is
    // fully inside or fully outside every range.
    let mut cuts: Vec<usize> = ranges
        .iter()
        .flat_map(|r| [r.start, r.end])
        .collect();
    cuts.sort_unstable();
    cuts.dedup();

    let segments: Vec<Range<usize>> = cuts.windows(2).map(|w| w[0]..w[1]).collect();
    let covers = |slot: usize, seg: usize| -> bool {
        let r = &ranges[slot];
        let s = &segments[seg];
        s.start >= r.start && s.end <= r.end
    };

    place(0, 0, 0, ranges.len(), &segments, &covers)
}

/// Assign slots `slot..k` to segments in non-decreasing segment order.
///
/// `placed` slots already occupy `seg`; placing one more multiplies the
/// running binomial `C(len, placed)` by `(len - placed) / (placed + 1)`.
fn place<F>(slot: usize, seg: usize, placed: usize, k: usize, segments: &[Range<usize>], covers: &F) -> f64
where
    F: Fn(usize, usize) -> bool,
{
    if slot == k {
        return 1.0;
    }

    let mut total = 0.0;

    // Keep this slot in the current segment.
    if covers(slot, seg) {
        let len = segments[seg].len();
        if placed < len {
            let factor = (len - placed) as f64 / (placed + 1) as f64;
            total += factor * place(slot + 1, seg, placed + 1, k, segments, covers);
        }
    }

    // Move this slot to a later segment.
    for s in (seg + 1)..segments.len() {
        if covers(slot, s) {
            total += segments[s].len() as f64 * place(slot + 1, s, 1, k, segments, covers);
        }
    }

    total
}
