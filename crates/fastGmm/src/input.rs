//! Input abstractions for Gaussian mixture fitting.
//!
//! ## Purpose
//!
//! This module provides a unified abstraction for observation sets, allowing
//! the `fit` method to accept flat row-major buffers (slices, vectors,
//! one-dimensional arrays) and `ndarray` matrices through a single
//! interface.
//!
//! ## Design notes
//!
//! * **Zero-copy**: Provides direct slice access to the underlying buffer.
//! * **Shape-aware**: Two-dimensional arrays report their column count, which
//!   must agree with the dimension passed to `fit`.
//! * **Fail-fast validation**: Non-contiguous or column-major arrays are
//!   rejected before any processing.
//!
//! ## Invariants
//!
//! * Returned slices cover every element of the input in row-major order.
//!
//! ## Non-goals
//!
//! * This module does not copy or transpose data into standard layout.

// External dependencies
use ndarray::{ArrayBase, Data, Ix1, Ix2};
use num_traits::Float;

// Export dependencies from gmm crate
use gmm::internals::primitives::errors::GmmError;

/// Trait for types that can be used as observations for mixture fitting.
pub trait GmmInput<T: Float> {
    /// Row-major view of all observations.
    fn as_gmm_slice(&self) -> Result<&[T], GmmError>;

    /// Number of columns, if the container knows its shape.
    fn column_count(&self) -> Option<usize> {
        None
    }
}

impl<T: Float> GmmInput<T> for [T] {
    fn as_gmm_slice(&self) -> Result<&[T], GmmError> {
        Ok(self)
    }
}

impl<T: Float> GmmInput<T> for Vec<T> {
    fn as_gmm_slice(&self) -> Result<&[T], GmmError> {
        Ok(self.as_slice())
    }
}

impl<T: Float, S> GmmInput<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
{
    fn as_gmm_slice(&self) -> Result<&[T], GmmError> {
        self.as_slice().ok_or_else(|| {
            GmmError::InvalidArgument("ndarray input must be contiguous in memory".to_string())
        })
    }
}

impl<T: Float, S> GmmInput<T> for ArrayBase<S, Ix2>
where
    S: Data<Elem = T>,
{
    fn as_gmm_slice(&self) -> Result<&[T], GmmError> {
        self.as_slice().ok_or_else(|| {
            GmmError::InvalidArgument(
                "ndarray input must be contiguous and in row-major (standard) layout".to_string(),
            )
        })
    }

    fn column_count(&self) -> Option<usize> {
        Some(self.ncols())
    }
}
