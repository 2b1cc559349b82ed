//! Layer 3: Tree
//!
//! ## Purpose
//!
//! This layer provides the spatial hierarchy: axis-aligned bounding regions,
//! the leaf/internal node variant, and the median-split tree builder.
//!
//! ## Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Input
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Kernel
//!   ↓
//! Layer 3: Tree ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Axis-aligned bounding boxes.
pub mod bounds;

/// Median-split construction (sequential and rayon-parallel).
pub mod build;

/// Node variants and the owning tree.
pub mod node;
