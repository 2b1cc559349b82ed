//! Generalized multi-tree branch-and-bound summation of multibody kernels.
//!
//! ## Purpose
//!
//! This crate approximates the sum of a multi-body kernel function over
//! every valid tuple of points drawn from one or more point sets. A binary
//! spatial tree is built per set; a recursive branch-and-bound traversal
//! over node tuples prunes regions of the combinatorial tuple space whose
//! kernel bounds fit within a global error budget, and evaluates the rest
//! exactly. A brute-force oracle provides ground truth for validation and
//! relative-error reporting.
//!
//! ## Quick start
//!
//! ```
//! use multitree_rs::prelude::*;
//!
//! # fn main() -> multitree_rs::api::Result<()> {
//! let set = PointSet::new(&[0.0_f64, 1.0, 2.0], 1)?;
//! let kernel = EuclideanKernel;
//!
//! let model = MultiTree::new()
//!     .leaf_size(1)
//!     .absolute_tolerance(0.0)
//!     .build()?;
//!
//! let result = model.compute(&kernel, &[&set, &set])?;
//! assert_eq!(result.potentials()[0][0], 3.0);
//!
//! let naive = model.compute_naive(&kernel, &[&set, &set])?;
//! let summary = result.maximum_relative_error(&naive)?;
//! assert_eq!(summary.max_absolute, 0.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Layer 7: API          fluent builder and run model
//! Layer 6: Input        container abstraction for point data
//! Layer 5: Engine       traversal, naive oracle, validator, accumulator
//! Layer 4: Kernel       pluggable multibody kernel capability
//! Layer 3: Tree         bounding boxes, nodes, median-split builder
//! Layer 2: Math         canonical-ordering tuple counting
//! Layer 1: Primitives   point sets and errors
//! ```

/// Layer 7: fluent builder and run model.
pub mod api;

/// Layer 6: input container abstraction.
pub mod input;

/// Layer 5: traversal engine, naive oracle, validation, results.
pub mod engine;

/// Layer 4: multibody kernel capability and shipped kernels.
pub mod kernel;

/// Layer 3: spatial trees.
pub mod tree;

/// Layer 2: combinatorial counting.
pub mod math;

/// Layer 1: point sets and errors.
pub mod primitives;

/// Convenience re-exports of the public surface.
pub mod prelude {
    pub use crate::api::{MultiTree, MultiTreeBuilder, MultiTreeModel};
    pub use crate::engine::output::{ApproxTarget, QueryResult, RelativeErrorSummary};
    pub use crate::input::PointsInput;
    pub use crate::kernel::capability::MultibodyKernel;
    pub use crate::kernel::euclidean::EuclideanKernel;
    pub use crate::kernel::gaussian::ThreeBodyGaussianKernel;
    pub use crate::primitives::dataset::PointSet;
    pub use crate::primitives::errors::MultiTreeError;
    pub use crate::tree::bounds::BoundingBox;
    pub use crate::tree::node::{Tree, TreeNode};
}
