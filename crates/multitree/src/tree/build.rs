//! Tree construction.
//!
//! ## Purpose
//!
//! This module builds the binary spatial tree over a point set: recursively
//! split the current subset at the median of its widest-spread dimension
//! until a subset fits in a leaf. The top recursion levels are parallelized
//! with `rayon::join` when the `cpu` feature is enabled.
//!
//! ## Design notes
//!
//! * **Median Splitting**: Balanced construction via `select_nth_unstable_by`
//!   on an index permutation; the point data itself is copied into permuted
//!   order once at the end.
//! * **Recursive Parallelism**: `rayon::join` above a size threshold; the
//!   two halves touch disjoint index slices, so no synchronization is
//!   needed and parallel construction produces an identical tree to
//!   sequential construction.
//! * **Degenerate Subsets**: When every point shares the same coordinates
//!   the widest spread is zero; the median split still produces two
//!   balanced halves, which is the fallback behavior for such subsets.
//!
//! ## Invariants
//!
//! * Every node's bounding box tightly contains all points in its subtree.
//! * The tree is a full binary tree: every internal node has two non-empty
//!   children covering its range exactly.
//! * Leaves hold at most `leaf_size` points.
//!
//! ## Non-goals
//!
//! * This module does not validate `leaf_size` (handled by `validator`).
//! * This module does not support incremental insertion or deletion.

use core::cmp::Ordering;

use num_traits::Float;

#[cfg(feature = "cpu")]
use rayon::join;

use crate::primitives::dataset::PointSet;
use crate::tree::bounds::BoundingBox;
use crate::tree::node::{Tree, TreeNode};

/// Subset size above which construction recurses on worker threads.
#[cfg(feature = "cpu")]
const PARALLEL_CUTOFF: usize = 1024;

// ============================================================================
// Construction
// ============================================================================

#[cfg(feature = "cpu")]
impl<T: Float + Send + Sync> Tree<T> {
    /// Build a tree over `set` with leaves holding at most `leaf_size`
    /// points, parallelizing the upper recursion levels.
    pub fn new(set: &PointSet<T>, leaf_size: usize) -> Self {
        let dims = set.dims();
        let mut ids: Vec<usize> = (0..set.len()).collect();
        let root = build_parallel(set.coords(), dims, &mut ids, 0, leaf_size.max(1));
        let points = permute(set.coords(), dims, &ids);
        Self {
            root,
            points,
            ids,
            dims,
        }
    }
}

#[cfg(not(feature = "cpu"))]
impl<T: Float> Tree<T> {
    /// Build a tree over `set` with leaves holding at most `leaf_size`
    /// points.
    pub fn new(set: &PointSet<T>, leaf_size: usize) -> Self {
        let dims = set.dims();
        let mut ids: Vec<usize> = (0..set.len()).collect();
        let root = build_sequential(set.coords(), dims, &mut ids, 0, leaf_size.max(1));
        let points = permute(set.coords(), dims, &ids);
        Self {
            root,
            points,
            ids,
            dims,
        }
    }
}

/// Copy `coords` rows into the order given by `ids`.
fn permute<T: Float>(coords: &[T], dims: usize, ids: &[usize]) -> Vec<T> {
    let mut out = Vec::with_capacity(coords.len());
    for &i in ids {
        out.extend_from_slice(&coords[i * dims..(i + 1) * dims]);
    }
    out
}

/// Partition `idx` at its median along the subset's widest dimension.
///
/// Returns the bounding box of the subset and the split position.
fn split_subset<T: Float>(coords: &[T], dims: usize, idx: &mut [usize]) -> (BoundingBox<T>, usize) {
    let bound = BoundingBox::from_indexed(coords, dims, idx);
    let axis = bound.widest_dimension();
    let mid = idx.len() / 2;
    idx.select_nth_unstable_by(mid, |&a, &b| {
        let va = coords[a * dims + axis];
        let vb = coords[b * dims + axis];
        va.partial_cmp(&vb).unwrap_or(Ordering::Equal)
    });
    (bound, mid)
}

fn build_sequential<T: Float>(
    coords: &[T],
    dims: usize,
    idx: &mut [usize],
    offset: usize,
    leaf_size: usize,
) -> TreeNode<T> {
    let n = idx.len();
    if n <= leaf_size {
        return TreeNode::Leaf {
            range: offset..offset + n,
            bound: BoundingBox::from_indexed(coords, dims, idx),
        };
    }

    let (bound, mid) = split_subset(coords, dims, idx);
    let (left_idx, right_idx) = idx.split_at_mut(mid);

    let left = build_sequential(coords, dims, left_idx, offset, leaf_size);
    let right = build_sequential(coords, dims, right_idx, offset + mid, leaf_size);

    TreeNode::Internal {
        range: offset..offset + n,
        bound,
        left: Box::new(left),
        right: Box::new(right),
    }
}

#[cfg(feature = "cpu")]
fn build_parallel<T: Float + Send + Sync>(
    coords: &[T],
    dims: usize,
    idx: &mut [usize],
    offset: usize,
    leaf_size: usize,
) -> TreeNode<T> {
    let n = idx.len();
    if n <= leaf_size {
        return TreeNode::Leaf {
            range: offset..offset + n,
            bound: BoundingBox::from_indexed(coords, dims, idx),
        };
    }

    let (bound, mid) = split_subset(coords, dims, idx);
    let (left_idx, right_idx) = idx.split_at_mut(mid);

    let (left, right) = if n > PARALLEL_CUTOFF {
        join(
            || build_parallel(coords, dims, left_idx, offset, leaf_size),
            || build_parallel(coords, dims, right_idx, offset + mid, leaf_size),
        )
    } else {
        (
            build_sequential(coords, dims, left_idx, offset, leaf_size),
            build_sequential(coords, dims, right_idx, offset + mid, leaf_size),
        )
    };

    TreeNode::Internal {
        range: offset..offset + n,
        bound,
        left: Box::new(left),
        right: Box::new(right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_node<T: Float>(tree: &Tree<T>, node: &TreeNode<T>, leaf_size: usize) {
        let range = node.range();
        for pos in range.clone() {
            assert!(node.bound().contains(tree.point(pos)), "bound must contain subtree points");
        }
        match node.children() {
            Some((left, right)) => {
                assert_eq!(left.range().start, range.start);
                assert_eq!(left.range().end, right.range().start);
                assert_eq!(right.range().end, range.end);
                assert!(!left.range().is_empty());
                assert!(!right.range().is_empty());
                check_node(tree, left, leaf_size);
                check_node(tree, right, leaf_size);
            }
            None => assert!(node.count() <= leaf_size),
        }
    }

    #[test]
    fn builds_valid_tree() {
        let coords: Vec<f64> = (0..40).map(|i| ((i * 37) % 40) as f64).collect();
        let set = PointSet::new(&coords, 2).unwrap();
        let tree = Tree::new(&set, 3);

        assert_eq!(tree.len(), 20);
        assert_eq!(tree.root().count(), 20);
        check_node(&tree, tree.root(), 3);

        // Every original point appears exactly once.
        let mut seen = vec![false; 20];
        for pos in 0..20 {
            let id = tree.id(pos);
            assert!(!seen[id]);
            seen[id] = true;
            assert_eq!(tree.point(pos), set.point(id));
        }
    }

    #[test]
    fn single_leaf_when_leaf_size_covers_all() {
        let set = PointSet::new(&[0.0, 1.0, 2.0, 3.0], 1).unwrap();
        let tree = Tree::new(&set, 10);
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().count(), 4);
    }

    #[test]
    fn degenerate_identical_points_split_evenly() {
        let coords = vec![5.0; 8];
        let set = PointSet::new(&coords, 1).unwrap();
        let tree = Tree::new(&set, 2);
        check_node(&tree, tree.root(), 2);
        let (left, right) = tree.root().children().unwrap();
        assert_eq!(left.count(), 4);
        assert_eq!(right.count(), 4);
    }
}
