//! Layer 2: Math
//!
//! ## Purpose
//!
//! This layer provides the combinatorial counting routine that weights node
//! tuples during traversal and budget allocation.
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
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Strictly-increasing tuple counting over node ranges.
pub mod counting;
