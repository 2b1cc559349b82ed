//! Layer 4: Kernel
//!
//! ## Purpose
//!
//! This layer defines the pluggable multibody kernel capability consumed by
//! the traversal engine, plus two shipped kernels used for validation and as
//! implementation references.
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
//! Layer 4: Kernel ← You are here
//!   ↓
//! Layer 3: Tree
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// The kernel capability contract.
pub mod capability;

/// Pairwise Euclidean distance kernel (arity 2).
pub mod euclidean;

/// Three-body Gaussian kernel (arity 3).
pub mod gaussian;
