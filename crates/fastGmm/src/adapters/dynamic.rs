//! Run-time precision adapter with parallel execution.
//!
//! ## Purpose
//!
//! This module wraps the `gmm` run-time precision builder so that fits
//! dispatched on the precision of a [`NumericArray`] go through the parallel
//! batch adapter of this crate, and `Multithreading::Parallel` installs the
//! rayon passes instead of silently running serially.
//!
//! ## Design notes
//!
//! * **Delegation**: Precision checks of custom arrays, duplicate setters and
//!   scalar narrowing stay in `gmm`.
//! * **Parallel-First**: Defaults to `Multithreading::Parallel`, like
//!   [`Batch`].

// External dependencies
use std::result::Result;

// Export dependencies from gmm crate
use gmm::internals::adapters::dynamic::{DynamicGmm as BaseDynamicGmm, DynamicGmmResult};
use gmm::internals::algorithms::initialization::Initialization;
use gmm::internals::primitives::dtype::{NumericArray, NumericVec};
use gmm::internals::primitives::errors::GmmError;
use gmm::internals::primitives::threading::Multithreading;

// Internal dependencies
use crate::api::Batch;

/// Builder whose custom arrays carry their precision at run time.
#[derive(Debug, Clone, Default)]
pub struct DynamicGmm {
    /// Base builder from the gmm crate
    pub base: BaseDynamicGmm,
}

macro_rules! delegate_setter {
    ($(#[$doc:meta])* $name:ident: $ty:ty) => {
        $(#[$doc])*
        pub fn $name(mut self, value: $ty) -> Self {
            self.base = self.base.$name(value);
            self
        }
    };
}

impl DynamicGmm {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    delegate_setter!(/// Set the number of mixture components.
        num_clusters: usize);
    delegate_setter!(/// Set the cap on EM iterations per repetition.
        max_iterations: usize);
    delegate_setter!(/// Set the number of independent repetitions.
        num_repetitions: usize);
    delegate_setter!(/// Set the initialization mode.
        initialization: Initialization);
    delegate_setter!(/// Set the threading mode.
        multithreading: Multithreading);
    delegate_setter!(/// Set the variance lower bound.
        sigma_lower_bound: f64);
    delegate_setter!(/// Set the relative log-likelihood tolerance.
        tolerance: f64);
    delegate_setter!(/// Set the Lloyd iterations of the clustering-based initializer.
        kmeans_iterations: usize);
    delegate_setter!(/// Set the seed for randomized initialization.
        seed: u64);
    delegate_setter!(/// Supply initial means (K * D).
        init_means: NumericVec);
    delegate_setter!(/// Supply initial variances (K * D).
        init_sigmas: NumericVec);
    delegate_setter!(/// Supply initial weights (K).
        init_weights: NumericVec);
    delegate_setter!(/// Set diagnostic verbosity.
        verbosity: usize);

    /// Include the N×K responsibility matrix in the result.
    pub fn return_responsibilities(mut self) -> Self {
        self.base = self.base.return_responsibilities();
        self
    }

    /// Fit a mixture to row-major data of the given dimension.
    pub fn fit(&self, data: NumericArray<'_>, dimension: usize) -> Result<DynamicGmmResult, GmmError> {
        match data {
            NumericArray::F32(values) => {
                let model = self.base.typed_builder::<f32>()?.adapter(Batch).build()?;
                Ok(DynamicGmmResult::F32(model.fit(values, dimension)?))
            }
            NumericArray::F64(values) => {
                let model = self.base.typed_builder::<f64>()?.adapter(Batch).build()?;
                Ok(DynamicGmmResult::F64(model.fit(values, dimension)?))
            }
        }
    }
}
