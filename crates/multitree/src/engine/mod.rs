//! Layer 5: Engine
//!
//! ## Purpose
//!
//! This layer contains the execution machinery: the branch-and-bound
//! multi-tree traversal, the brute-force oracle, fail-fast validation, and
//! the result accumulator both evaluators write into.
//!
//! ## Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Input
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Kernel
//!   ↓
//! Layer 3: Tree
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Multi-tree depth-first traversal engine.
pub mod executor;

/// Brute-force oracle evaluation.
pub mod naive;

/// Result accumulation and reporting.
pub mod output;

/// Fail-fast configuration and data validation.
pub mod validator;
