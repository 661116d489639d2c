//! Batch adapter for Gaussian mixture fitting with parallel execution.
//!
//! ## Purpose
//!
//! This module provides the batch execution adapter of `fastGmm`. It wraps
//! the `gmm` batch builder, accepts any [`GmmInput`] container and installs
//! the rayon E-step and accumulation passes when parallel execution is
//! selected.
//!
//! ## Design notes
//!
//! * **Delegation**: Validation, initialization and the EM loop all run in
//!   the `gmm` crate; this adapter only chooses the passes.
//! * **Parallel-First**: Defaults to `Multithreading::Parallel`.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * The column count of a two-dimensional input must equal the dimension.
//! * Serial and parallel execution produce the same mixture.
//!
//! ## Non-goals
//!
//! * This adapter does not handle streaming or incremental updates.
//! * This adapter does not handle missing values.

// Feature-gated imports
#[cfg(feature = "cpu")]
use crate::engine::executor::{accumulation_pass_parallel, expectation_pass_parallel};

// External dependencies
use num_traits::Float;
use std::result::Result;

// Export dependencies from gmm crate
use gmm::internals::adapters::batch::BatchGmmBuilder;
use gmm::internals::algorithms::initialization::Initialization;
use gmm::internals::engine::output::GmmResult;
use gmm::internals::primitives::dtype::NumericKind;
use gmm::internals::primitives::errors::GmmError;
use gmm::internals::primitives::threading::Multithreading;

// Internal dependencies
use crate::input::GmmInput;

// ============================================================================
// Extended Batch GMM Builder
// ============================================================================

/// Builder for batch GMM processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelBatchGmmBuilder<T: Float> {
    /// Base builder from the gmm crate
    pub base: BatchGmmBuilder<T>,
}

impl<T: Float> Default for ParallelBatchGmmBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ParallelBatchGmmBuilder<T> {
    /// Create a new batch GMM builder with default parameters.
    ///
    /// # Defaults
    ///
    /// * All base parameters from gmm BatchGmmBuilder
    /// * multithreading: Parallel (fastGmm extension)
    fn new() -> Self {
        let base = BatchGmmBuilder::default().multithreading(Multithreading::Parallel);
        Self { base }
    }

    /// Set the threading mode.
    pub fn multithreading(mut self, mode: Multithreading) -> Self {
        self.base = self.base.multithreading(mode);
        self
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set the number of components.
    pub fn num_clusters(mut self, k: usize) -> Self {
        self.base = self.base.num_clusters(k);
        self
    }

    /// Set the cap on EM iterations per repetition.
    pub fn max_iterations(mut self, n: usize) -> Self {
        self.base = self.base.max_iterations(n);
        self
    }

    /// Set the number of independent repetitions.
    pub fn num_repetitions(mut self, n: usize) -> Self {
        self.base = self.base.num_repetitions(n);
        self
    }

    /// Set the initialization mode.
    pub fn initialization(mut self, mode: Initialization) -> Self {
        self.base = self.base.initialization(mode);
        self
    }

    /// Set the lower bound on every variance entry.
    pub fn sigma_lower_bound(mut self, bound: T) -> Self {
        self.base = self.base.sigma_lower_bound(bound);
        self
    }

    /// Set the relative log-likelihood tolerance.
    pub fn tolerance(mut self, tol: T) -> Self {
        self.base = self.base.tolerance(tol);
        self
    }

    /// Set the seed of the randomized initializers.
    pub fn seed(mut self, seed: u64) -> Self {
        self.base = self.base.seed(seed);
        self
    }

    /// Set diagnostic verbosity.
    pub fn verbosity(mut self, level: usize) -> Self {
        self.base = self.base.verbosity(level);
        self
    }

    /// Request the N×K responsibility matrix in the result.
    pub fn return_responsibilities(mut self, enabled: bool) -> Self {
        self.base = self.base.return_responsibilities(enabled);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the batch processor.
    pub fn build(self) -> Result<ParallelBatchGmm<T>, GmmError> {
        // Validate by attempting to build the base processor
        let _ = self.base.clone().build()?;

        Ok(ParallelBatchGmm { config: self })
    }
}

// ============================================================================
// Extended Batch GMM Processor
// ============================================================================

/// Batch GMM processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelBatchGmm<T: Float> {
    config: ParallelBatchGmmBuilder<T>,
}

impl<T: Float + NumericKind + Send + Sync + 'static> ParallelBatchGmm<T> {
    /// Fit a mixture to row-major observations of the given dimension.
    pub fn fit<I>(self, data: &I, dimension: usize) -> Result<GmmResult<T>, GmmError>
    where
        I: GmmInput<T> + ?Sized,
    {
        let values = data.as_gmm_slice()?;
        if let Some(columns) = data.column_count() {
            if columns != dimension {
                return Err(GmmError::InvalidDimension {
                    what: "dimension",
                    expected: columns,
                    got: dimension,
                });
            }
        }

        let mut builder = self.config.base;

        #[cfg(feature = "cpu")]
        {
            if builder.multithreading == Multithreading::Parallel {
                tracing::debug!(
                    threads = rayon::current_num_threads(),
                    "installing parallel EM passes"
                );
                builder = builder
                    .custom_expectation_pass(expectation_pass_parallel::<T>)
                    .custom_accumulation_pass(accumulation_pass_parallel::<T>);
            } else {
                builder.custom_expectation_pass = None;
                builder.custom_accumulation_pass = None;
            }
        }
        #[cfg(not(feature = "cpu"))]
        {
            // Fallback to serial passes if cpu feature is disabled
            builder.custom_expectation_pass = None;
            builder.custom_accumulation_pass = None;
        }

        // Delegate execution to the base implementation
        let processor = builder.build()?;
        processor.fit(values, dimension)
    }
}
