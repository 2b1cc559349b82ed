//! Multi-tree depth-first traversal engine.
//!
//! ## Purpose
//!
//! This module implements the branch-and-bound core: a recursive depth-first
//! traversal over node tuples (one tree node per kernel slot) that decides,
//! per tuple, whether to exclude it, approximate it against the error
//! budget, evaluate it exactly, or split it and recurse.
//!
//! ## Design notes
//!
//! * **Value-Threaded Budget**: The remaining error budget is split between
//!   sibling tuples proportional to their multiplicity and passed down by
//!   value; sibling subtrees own disjoint budget shares, which is what would
//!   make a future parallel fan-out safe without locking.
//! * **Canonical Ordering**: Slots drawing from the same point set only
//!   admit strictly increasing permuted positions; each unordered same-set
//!   tuple is therefore visited exactly once and its value credited to
//!   every participating point, with no symmetry multiplier.
//! * **Split Heuristic**: Recursion replaces the internal node with the
//!   largest point count (ties to the smallest slot index), shrinking the
//!   dominant source of combinatorial growth first.
//! * **Bound Verification**: In debug builds the base case asserts every
//!   exact value against the kernel's region bound; a violation is a faulty
//!   kernel capability and aborts the run.
//!
//! ## Key concepts
//!
//! ### Traversal Decision Per Tuple
//!
//! 1. **Exclusion check**: multiplicity zero — count and return.
//! 2. **Prune check**: `multiplicity * (upper - lower)` fits the remaining
//!    budget (plus the share of the relative allowance) — credit the
//!    midpoint estimate and return.
//! 3. **Base case**: all slots hold leaves — enumerate and evaluate exactly.
//! 4. **Recurse**: split one slot's node, divide the budget, recurse into
//!    both children.
//!
//! ### Termination
//!
//! Arity is fixed and every recursive step replaces an internal node with a
//! strictly smaller child, so traversal always bottoms out at leaf tuples.
//!
//! ## Invariants
//!
//! * Trees are immutable for the lifetime of the engine; the accumulator is
//!   the only mutable state.
//! * The multiplicities of all visited leaf tuples and pruned tuples sum to
//!   the total tuple count.
//! * Error introduced by pruning never exceeds the absolute tolerance plus
//!   the relative allowance.
//!
//! ## Non-goals
//!
//! * This module does not validate inputs (handled by `validator`).
//! * This module does not enumerate tuples without trees (see `naive`).
//!
//! ## Visibility
//!
//! [`MultiTreeDfs`] is driven by the API layer; construct runs through
//! [`MultiTree`](crate::api::MultiTree) instead of using it directly.

use num_traits::Float;

use crate::engine::output::{ApproxTarget, QueryResult};
use crate::kernel::capability::MultibodyKernel;
use crate::math::counting::count_increasing_tuples;
use crate::primitives::dataset::PointSet;
use crate::tree::bounds::BoundingBox;
use crate::tree::node::{Tree, TreeNode};

// ============================================================================
// Slot Grouping
// ============================================================================

/// Group kernel slots by the distinct point set they reference.
///
/// Returns `(slot -> group, group -> slots)` where groups are ordered by
/// first occurrence. Identity is reference identity: passing the same
/// `&PointSet` for several slots marks them symmetric.
pub(crate) fn group_slots<T: Float>(sets: &[&PointSet<T>]) -> (Vec<usize>, Vec<Vec<usize>>) {
    let mut slot_group = Vec::with_capacity(sets.len());
    let mut representatives: Vec<*const PointSet<T>> = Vec::new();
    let mut group_slots: Vec<Vec<usize>> = Vec::new();

    for (slot, &set) in sets.iter().enumerate() {
        let ptr = set as *const PointSet<T>;
        match representatives.iter().position(|&r| core::ptr::eq(r, ptr)) {
            Some(group) => {
                slot_group.push(group);
                group_slots[group].push(slot);
            }
            None => {
                slot_group.push(representatives.len());
                representatives.push(ptr);
                group_slots.push(vec![slot]);
            }
        }
    }

    (slot_group, group_slots)
}

// ============================================================================
// Traversal Engine
// ============================================================================

/// Depth-first branch-and-bound traversal over node tuples.
pub struct MultiTreeDfs<'a, T, K> {
    kernel: &'a K,
    /// One tree per distinct point set, in group order.
    trees: Vec<Tree<T>>,
    /// Slot index -> group index.
    slot_group: Vec<usize>,
    /// Group index -> member slots in slot order.
    group_slots: Vec<Vec<usize>>,
    /// Multiplicity of the root tuple.
    total_tuples: f64,
    relative_tolerance: f64,
}

impl<'a, T, K> MultiTreeDfs<'a, T, K>
where
    T: Float + Send + Sync,
    K: MultibodyKernel<T>,
{
    /// Build the per-set trees and prepare a traversal.
    ///
    /// `sets` holds one reference per kernel slot; repeated references mark
    /// slots as drawing from the same set. Inputs are assumed validated.
    pub fn new(kernel: &'a K, sets: &[&PointSet<T>], leaf_size: usize) -> Self {
        let (slot_group, group_slots) = group_slots(sets);
        let trees: Vec<Tree<T>> = group_slots
            .iter()
            .map(|slots| Tree::new(sets[slots[0]], leaf_size))
            .collect();

        let mut engine = Self {
            kernel,
            trees,
            slot_group,
            group_slots,
            total_tuples: 0.0,
            relative_tolerance: 0.0,
        };
        let total = {
            let roots = engine.root_tuple();
            engine.multiplicity(&roots)
        };
        engine.total_tuples = total;
        engine
    }

    /// Multiplicity of the root tuple: the total number of valid point
    /// tuples after canonical ordering.
    pub fn total_tuples(&self) -> f64 {
        self.total_tuples
    }

    /// Run the traversal under the given error tolerance.
    ///
    /// `absolute_tolerance` is the global budget distributed across the
    /// recursion; `relative_tolerance` adds an allowance proportional to the
    /// running total-sum estimate. Returns the finalized accumulator.
    pub fn compute(&mut self, absolute_tolerance: f64, relative_tolerance: f64) -> QueryResult<T> {
        self.relative_tolerance = relative_tolerance;

        let set_sizes: Vec<usize> = self.trees.iter().map(Tree::len).collect();
        let mut result = QueryResult::new(&set_sizes);

        if self.total_tuples > 0.0 {
            let roots = self.root_tuple();
            self.traverse(&roots, absolute_tolerance, &mut result);
        }

        result.finalize();
        result
    }

    fn root_tuple(&self) -> Vec<&TreeNode<T>> {
        self.slot_group
            .iter()
            .map(|&g| self.trees[g].root())
            .collect()
    }

    /// Combinatorial multiplicity of a node tuple: the product over slot
    /// groups of the strictly-increasing tuple counts of their node ranges.
    fn multiplicity(&self, nodes: &[&TreeNode<T>]) -> f64 {
        let mut product = 1.0;
        for slots in &self.group_slots {
            let ranges: Vec<_> = slots.iter().map(|&s| nodes[s].range()).collect();
            product *= count_increasing_tuples(&ranges);
            if product == 0.0 {
                return 0.0;
            }
        }
        product
    }

    fn traverse(&self, nodes: &[&TreeNode<T>], budget: f64, result: &mut QueryResult<T>) {
        // Exclusion check: no valid tuple beneath this node tuple.
        let multiplicity = self.multiplicity(nodes);
        if multiplicity == 0.0 {
            result.num_exclusion_prunes += 1;
            return;
        }

        // Prune check against the remaining budget plus this tuple's share
        // of the relative allowance.
        let regions: Vec<&BoundingBox<T>> = nodes.iter().map(|n| n.bound()).collect();
        let (lower, upper) = self.kernel.bound(&regions);
        let width = (upper - lower).to_f64().unwrap_or(f64::INFINITY);
        let share = multiplicity / self.total_tuples;
        let allowance = budget + self.relative_tolerance * result.total_sum().abs() * share;
        if multiplicity * width <= allowance {
            let two = T::one() + T::one();
            let estimate = (lower + upper) / two;
            let targets: Vec<ApproxTarget<'_>> = nodes
                .iter()
                .enumerate()
                .map(|(slot, node)| {
                    let group = self.slot_group[slot];
                    ApproxTarget {
                        set: group,
                        ids: &self.trees[group].ids[node.range()],
                    }
                })
                .collect();
            result.add_approx(&targets, multiplicity, estimate, width / 2.0);
            return;
        }

        // Base case: exhaustive evaluation over leaf slices.
        if nodes.iter().all(|n| n.is_leaf()) {
            self.base_case(nodes, lower, upper, result);
            return;
        }

        // Recurse on the largest internal node, ties to the smallest slot.
        let split = self.split_slot(nodes);
        let (left, right) = nodes[split].children().unwrap_or_else(|| {
            unreachable!("split slot always holds an internal node")
        });

        let mut left_nodes = nodes.to_vec();
        left_nodes[split] = left;
        let mut right_nodes = nodes.to_vec();
        right_nodes[split] = right;

        // Splitting one slot partitions the tuple space, so the child
        // multiplicities sum to the parent's.
        let left_mult = self.multiplicity(&left_nodes);
        let right_mult = self.multiplicity(&right_nodes);
        let total = left_mult + right_mult;
        let (left_budget, right_budget) = if total > 0.0 {
            (budget * left_mult / total, budget * right_mult / total)
        } else {
            (0.0, 0.0)
        };

        self.traverse(&left_nodes, left_budget, result);
        self.traverse(&right_nodes, right_budget, result);
    }

    /// The slot whose internal node has the largest point count, ties
    /// broken by the smallest slot index.
    fn split_slot(&self, nodes: &[&TreeNode<T>]) -> usize {
        let mut best: Option<usize> = None;
        for (slot, node) in nodes.iter().enumerate() {
            if node.is_leaf() {
                continue;
            }
            match best {
                Some(b) if nodes[b].count() >= node.count() => {}
                _ => best = Some(slot),
            }
        }
        best.expect("traverse only recurses when an internal node remains")
    }

    /// Exhaustively evaluate every valid concrete tuple from leaf slices.
    fn base_case(
        &self,
        nodes: &[&TreeNode<T>],
        lower: T,
        upper: T,
        result: &mut QueryResult<T>,
    ) {
        let arity = nodes.len();
        let mut positions = vec![0usize; arity];
        let mut points: Vec<&[T]> = vec![&[]; arity];
        let mut targets = vec![(0usize, 0usize); arity];
        self.enumerate(
            0,
            nodes,
            &mut positions,
            &mut points,
            &mut targets,
            lower,
            upper,
            result,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn enumerate<'s>(
        &'s self,
        slot: usize,
        nodes: &[&TreeNode<T>],
        positions: &mut Vec<usize>,
        points: &mut Vec<&'s [T]>,
        targets: &mut Vec<(usize, usize)>,
        lower: T,
        upper: T,
        result: &mut QueryResult<T>,
    ) {
        if slot == nodes.len() {
            let value = self.kernel.evaluate(points);
            debug_assert!(
                {
                    let v = value.to_f64().unwrap_or(f64::NAN);
                    let l = lower.to_f64().unwrap_or(f64::NAN);
                    let u = upper.to_f64().unwrap_or(f64::NAN);
                    let slack = 1e-9 * (1.0 + u.abs().max(l.abs()));
                    v >= l - slack && v <= u + slack
                },
                "kernel bound violated: evaluate outside claimed [lower, upper]"
            );
            result.add_exact(targets, value);
            return;
        }

        let group = self.slot_group[slot];
        let range = nodes[slot].range();

        // Canonical ordering: stay strictly above earlier same-set slots.
        let mut start = range.start;
        for prev in 0..slot {
            if self.slot_group[prev] == group {
                start = start.max(positions[prev] + 1);
            }
        }

        let tree = &self.trees[group];
        for pos in start..range.end {
            positions[slot] = pos;
            points[slot] = tree.point(pos);
            targets[slot] = (group, tree.id(pos));
            self.enumerate(
                slot + 1,
                nodes,
                positions,
                points,
                targets,
                lower,
                upper,
                result,
            );
        }
    }
}
