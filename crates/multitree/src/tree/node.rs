//! Tree node variants and the owning tree structure.
//!
//! ## Purpose
//!
//! This module defines [`TreeNode`], the tagged variant the traversal
//! recurses over, and [`Tree`], which owns the permuted point buffer the
//! node ranges index into. One binary tree is built per point set; after
//! construction both are immutable for the duration of a run.
//!
//! ## Design notes
//!
//! * A node's identity is its half-open `range` into the permuted buffer;
//!   two nodes of one tree are always identical, nested, or disjoint, which
//!   is what makes canonical-ordering multiplicities well defined.
//! * Leaves own their point slice implicitly through the range; internal
//!   nodes own exactly two boxed children plus the enclosing bound.
//! * The tree keeps `ids` mapping permuted positions back to original point
//!   indices so accumulation targets the caller's indexing.
//!
//! ## Invariants
//!
//! * `node.range()` equals the concatenation of its children's ranges.
//! * `node.bound()` contains every point in `node.range()`.
//!
//! ## Non-goals
//!
//! * This module does not build trees (see `tree::build`).
//! * This module does not support structural updates after construction.

use core::ops::Range;

use num_traits::Float;

use crate::tree::bounds::BoundingBox;

// ============================================================================
// Tree Node
// ============================================================================

/// A node of the spatial tree: a leaf over a contiguous point range, or an
/// internal node with exactly two children.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode<T> {
    /// Terminal node owning a contiguous slice of permuted points.
    Leaf {
        /// Half-open range into the tree's permuted point buffer.
        range: Range<usize>,
        /// Tight bounding box of the points in `range`.
        bound: BoundingBox<T>,
    },
    /// Internal node enclosing its two children.
    Internal {
        /// Half-open range covering both children.
        range: Range<usize>,
        /// Tight bounding box of the points in `range`.
        bound: BoundingBox<T>,
        /// Left child (first half of `range`).
        left: Box<TreeNode<T>>,
        /// Right child (second half of `range`).
        right: Box<TreeNode<T>>,
    },
}

impl<T> TreeNode<T> {
    /// The node's range into the permuted point buffer.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        match self {
            Self::Leaf { range, .. } | Self::Internal { range, .. } => range.clone(),
        }
    }

    /// The node's bounding box.
    #[inline]
    pub fn bound(&self) -> &BoundingBox<T> {
        match self {
            Self::Leaf { bound, .. } | Self::Internal { bound, .. } => bound,
        }
    }

    /// Number of points beneath the node.
    #[inline]
    pub fn count(&self) -> usize {
        self.range().len()
    }

    /// Returns true if this is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Child nodes, if this is an internal node.
    #[inline]
    pub fn children(&self) -> Option<(&TreeNode<T>, &TreeNode<T>)> {
        match self {
            Self::Internal { left, right, .. } => Some((left, right)),
            Self::Leaf { .. } => None,
        }
    }
}

// ============================================================================
// Tree
// ============================================================================

/// A binary spatial tree over one point set.
///
/// Owns a permuted copy of the set's coordinates so that every node covers
/// a contiguous range; the source [`PointSet`](crate::primitives::dataset::PointSet)
/// is never mutated.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    pub(crate) root: TreeNode<T>,
    /// Permuted row-major coordinates.
    pub(crate) points: Vec<T>,
    /// Permuted position -> original point index.
    pub(crate) ids: Vec<usize>,
    pub(crate) dims: usize,
}

impl<T: Float> Tree<T> {
    /// The root node.
    pub fn root(&self) -> &TreeNode<T> {
        &self.root
    }

    /// Number of points in the tree.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of coordinates per point.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Coordinate slice of the point at permuted position `pos`.
    #[inline]
    pub fn point(&self, pos: usize) -> &[T] {
        let offset = pos * self.dims;
        &self.points[offset..offset + self.dims]
    }

    /// Original point index for permuted position `pos`.
    #[inline]
    pub fn id(&self, pos: usize) -> usize {
        self.ids[pos]
    }
}
