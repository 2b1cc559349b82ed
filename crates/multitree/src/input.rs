//! Input abstractions for point-set construction.
//!
//! ## Purpose
//!
//! This module provides a unified abstraction for point data, allowing
//! [`PointSet::new`](crate::primitives::dataset::PointSet::new) to accept
//! multiple container formats (slices, vectors, ndarray) through a single
//! interface.
//!
//! ## Design notes
//!
//! * **Zero-copy where possible**: Provides direct slice access to the
//!   underlying buffer; the point set copies it exactly once.
//! * **Interoperability**: Bridges standard Rust collections with
//!   specialized numerical libraries.
//! * **Fail-fast validation**: Ensures memory continuity for
//!   multi-dimensional types before processing.
//!
//! ## Key concepts
//!
//! * **PointsInput Trait**: The core abstraction requiring a contiguous
//!   row-major slice view ("rows are points, columns are coordinates").
//!
//! ## Invariants
//!
//! * Returned slices represent all elements of the input container.
//! * Non-contiguous inputs return an error instead of copying silently.
//!
//! ## Non-goals
//!
//! * This module does not perform data cleaning or imputation.
//! * This module does not parse files; loading data is the caller's job.

// Feature-gated imports
#[cfg(feature = "cpu")]
use ndarray::{ArrayBase, Data, Ix1, Ix2};

// External dependencies
use num_traits::Float;

use crate::primitives::errors::MultiTreeError;

/// Trait for containers usable as flattened row-major point data.
pub trait PointsInput<T: Float> {
    /// Convert the input to a contiguous slice.
    fn as_point_slice(&self) -> Result<&[T], MultiTreeError>;
}

impl<T: Float> PointsInput<T> for [T] {
    fn as_point_slice(&self) -> Result<&[T], MultiTreeError> {
        Ok(self)
    }
}

impl<T: Float, const N: usize> PointsInput<T> for [T; N] {
    fn as_point_slice(&self) -> Result<&[T], MultiTreeError> {
        Ok(self)
    }
}

impl<T: Float> PointsInput<T> for Vec<T> {
    fn as_point_slice(&self) -> Result<&[T], MultiTreeError> {
        Ok(self.as_slice())
    }
}

#[cfg(feature = "cpu")]
impl<T: Float, S> PointsInput<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
{
    fn as_point_slice(&self) -> Result<&[T], MultiTreeError> {
        self.as_slice().ok_or_else(|| {
            MultiTreeError::InvalidInput("ndarray input must be contiguous in memory".to_string())
        })
    }
}

#[cfg(feature = "cpu")]
impl<T: Float, S> PointsInput<T> for ArrayBase<S, Ix2>
where
    S: Data<Elem = T>,
{
    fn as_point_slice(&self) -> Result<&[T], MultiTreeError> {
        self.as_slice().ok_or_else(|| {
            MultiTreeError::InvalidInput(
                "ndarray input must be contiguous and in standard (row-major) order".to_string(),
            )
        })
    }
}
