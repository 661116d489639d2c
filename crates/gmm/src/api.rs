//! High-level API for Gaussian mixture fitting.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder pattern for configuring the mixture model and choosing an
//! execution adapter.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Polymorphic**: Uses marker types to transition to adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called on the
//!   adapter; data-dependent checks run in `fit()`.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`GmmBuilder`] via `Gmm::new()`.
//! 2. Chain configuration methods (`.num_clusters()`, `.max_iterations()`, etc.).
//! 3. Select an adapter via `.adapter(Adapter::Batch)` to get an execution builder.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::batch::BatchGmmBuilder;
use crate::engine::executor::{AccumulationPassFn, ExpectationPassFn};

// Publicly re-exported types
pub use crate::adapters::dynamic::{DynamicGmm, DynamicGmmResult};
pub use crate::algorithms::initialization::Initialization;
pub use crate::engine::output::GmmResult;
pub use crate::evaluation::convergence::ConvergenceStatus;
pub use crate::evaluation::diagnostics::RepetitionSummary;
pub use crate::primitives::dtype::{DataType, NumericArray, NumericVec};
pub use crate::primitives::errors::GmmError;
pub use crate::primitives::threading::Multithreading;

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::Batch;
}

/// Fluent builder for configuring a Gaussian mixture fit.
#[derive(Debug, Clone)]
pub struct GmmBuilder<T> {
    /// Number of components (K).
    pub num_clusters: Option<usize>,

    /// Cap on EM iterations per repetition.
    pub max_iterations: Option<usize>,

    /// Independent repetitions; the best one is kept.
    pub num_repetitions: Option<usize>,

    /// Initialization mode.
    pub initialization: Option<Initialization>,

    /// Threading mode.
    pub multithreading: Option<Multithreading>,

    /// Lower bound on every variance entry.
    pub sigma_lower_bound: Option<T>,

    /// Relative log-likelihood tolerance.
    pub tolerance: Option<T>,

    /// Lloyd iterations of the clustering-based initializer.
    pub kmeans_iterations: Option<usize>,

    /// Seed for reproducible randomized initialization.
    pub seed: Option<u64>,

    /// Custom initial means, component-major (K * D).
    pub init_means: Option<Vec<T>>,

    /// Custom initial variances, component-major (K * D).
    pub init_sigmas: Option<Vec<T>>,

    /// Custom initial weights (K).
    pub init_weights: Option<Vec<T>>,

    /// Diagnostic verbosity (0 = silent).
    pub verbosity: Option<usize>,

    /// Return the N×K responsibility matrix.
    pub return_responsibilities: Option<bool>,

    // ======================================
    // DEV
    // ======================================
    /// Custom E-step pass function.
    #[doc(hidden)]
    pub custom_expectation_pass: Option<ExpectationPassFn<T>>,

    /// Custom M-step accumulation pass function.
    #[doc(hidden)]
    pub custom_accumulation_pass: Option<AccumulationPassFn<T>>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for GmmBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> GmmBuilder<T> {
    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: GmmAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            num_clusters: None,
            max_iterations: None,
            num_repetitions: None,
            initialization: None,
            multithreading: None,
            sigma_lower_bound: None,
            tolerance: None,
            kmeans_iterations: None,
            seed: None,
            init_means: None,
            init_sigmas: None,
            init_weights: None,
            verbosity: None,
            return_responsibilities: None,
            custom_expectation_pass: None,
            custom_accumulation_pass: None,
            duplicate_param: None,
        }
    }

    /// Set the number of mixture components.
    pub fn num_clusters(mut self, k: usize) -> Self {
        if self.num_clusters.is_some() {
            self.duplicate_param = Some("num_clusters");
        }
        self.num_clusters = Some(k);
        self
    }

    /// Set the cap on EM iterations per repetition (default 100).
    pub fn max_iterations(mut self, n: usize) -> Self {
        if self.max_iterations.is_some() {
            self.duplicate_param = Some("max_iterations");
        }
        self.max_iterations = Some(n);
        self
    }

    /// Set the number of independent repetitions (default 1).
    pub fn num_repetitions(mut self, n: usize) -> Self {
        if self.num_repetitions.is_some() {
            self.duplicate_param = Some("num_repetitions");
        }
        self.num_repetitions = Some(n);
        self
    }

    /// Set the initialization mode.
    pub fn initialization(mut self, mode: Initialization) -> Self {
        if self.initialization.is_some() {
            self.duplicate_param = Some("initialization");
        }
        self.initialization = Some(mode);
        self
    }

    /// Set the threading mode.
    pub fn multithreading(mut self, mode: Multithreading) -> Self {
        if self.multithreading.is_some() {
            self.duplicate_param = Some("multithreading");
        }
        self.multithreading = Some(mode);
        self
    }

    /// Set the lower bound on every variance entry (default 1e-6).
    pub fn sigma_lower_bound(mut self, bound: T) -> Self {
        if self.sigma_lower_bound.is_some() {
            self.duplicate_param = Some("sigma_lower_bound");
        }
        self.sigma_lower_bound = Some(bound);
        self
    }

    /// Set the relative log-likelihood tolerance (default 1e-5).
    pub fn tolerance(mut self, tol: T) -> Self {
        if self.tolerance.is_some() {
            self.duplicate_param = Some("tolerance");
        }
        self.tolerance = Some(tol);
        self
    }

    /// Set the Lloyd iterations of the clustering-based initializer (default 10).
    pub fn kmeans_iterations(mut self, n: usize) -> Self {
        if self.kmeans_iterations.is_some() {
            self.duplicate_param = Some("kmeans_iterations");
        }
        self.kmeans_iterations = Some(n);
        self
    }

    /// Set the seed for randomized initialization.
    pub fn seed(mut self, seed: u64) -> Self {
        if self.seed.is_some() {
            self.duplicate_param = Some("seed");
        }
        self.seed = Some(seed);
        self
    }

    /// Supply initial means, component-major (K * D).
    pub fn init_means(mut self, means: Vec<T>) -> Self {
        if self.init_means.is_some() {
            self.duplicate_param = Some("init_means");
        }
        self.init_means = Some(means);
        self
    }

    /// Supply initial diagonal variances, component-major (K * D).
    pub fn init_sigmas(mut self, sigmas: Vec<T>) -> Self {
        if self.init_sigmas.is_some() {
            self.duplicate_param = Some("init_sigmas");
        }
        self.init_sigmas = Some(sigmas);
        self
    }

    /// Supply initial mixing weights (K).
    pub fn init_weights(mut self, weights: Vec<T>) -> Self {
        if self.init_weights.is_some() {
            self.duplicate_param = Some("init_weights");
        }
        self.init_weights = Some(weights);
        self
    }

    /// Set diagnostic verbosity.
    pub fn verbosity(mut self, level: usize) -> Self {
        if self.verbosity.is_some() {
            self.duplicate_param = Some("verbosity");
        }
        self.verbosity = Some(level);
        self
    }

    /// Include the N×K responsibility matrix in the result.
    pub fn return_responsibilities(mut self) -> Self {
        if self.return_responsibilities.is_some() {
            self.duplicate_param = Some("return_responsibilities");
        }
        self.return_responsibilities = Some(true);
        self
    }

    // ==========================
    // Development Options
    // ==========================

    /// Set a custom E-step pass function (only for dev)
    #[doc(hidden)]
    pub fn custom_expectation_pass(mut self, pass: ExpectationPassFn<T>) -> Self {
        self.custom_expectation_pass = Some(pass);
        self
    }

    /// Set a custom M-step accumulation pass function (only for dev)
    #[doc(hidden)]
    pub fn custom_accumulation_pass(mut self, pass: AccumulationPassFn<T>) -> Self {
        self.custom_accumulation_pass = Some(pass);
        self
    }
}

/// Trait for transitioning from a generic builder to an execution builder.
pub trait GmmAdapter<T: Float> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`GmmBuilder`] into a specialized execution builder.
    fn convert(builder: GmmBuilder<T>) -> Self::Output;
}

/// Marker for in-memory batch processing.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> GmmAdapter<T> for Batch {
    type Output = BatchGmmBuilder<T>;

    fn convert(builder: GmmBuilder<T>) -> Self::Output {
        let mut result = BatchGmmBuilder::default();

        result.num_clusters = builder.num_clusters;
        if let Some(n) = builder.max_iterations {
            result.max_iterations = n;
        }
        if let Some(n) = builder.num_repetitions {
            result.num_repetitions = n;
        }
        result.initialization = builder.initialization;
        if let Some(mode) = builder.multithreading {
            result.multithreading = mode;
        }
        if let Some(lb) = builder.sigma_lower_bound {
            result.sigma_lower_bound = lb;
        }
        if let Some(tol) = builder.tolerance {
            result.tolerance = tol;
        }
        if let Some(n) = builder.kmeans_iterations {
            result.kmeans_iterations = n;
        }
        if let Some(seed) = builder.seed {
            result.seed = seed;
        }
        result.init_means = builder.init_means;
        result.init_sigmas = builder.init_sigmas;
        result.init_weights = builder.init_weights;
        if let Some(v) = builder.verbosity {
            result.verbosity = v;
        }
        if let Some(r) = builder.return_responsibilities {
            result.return_responsibilities = r;
        }

        // ======================================
        // DEV
        // ======================================
        result.custom_expectation_pass = builder.custom_expectation_pass;
        result.custom_accumulation_pass = builder.custom_accumulation_pass;

        result.duplicate_param = builder.duplicate_param;
        result
    }
}
