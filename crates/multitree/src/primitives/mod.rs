//! Layer 1: Primitives
//!
//! ## Purpose
//!
//! This layer provides the foundational data types shared by every other
//! layer: validated point-set storage and the crate-wide error enum.
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
//! Layer 3: Tree
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Immutable point-set storage.
pub mod dataset;

/// Error types for multi-tree computations.
pub mod errors;
