//! Batch adapter for Gaussian mixture fitting.
//!
//! ## Purpose
//!
//! This module provides the batch execution adapter. It holds a complete
//! observation set in memory, validates it, resolves how the mixture is
//! initialized and hands a fully resolved configuration to the engine.
//!
//! ## Design notes
//!
//! * **Processing**: Fits the entire dataset in a single call.
//! * **Precedence**: Supplying any custom parameter array switches the
//!   initialization to `Custom`; a warning is emitted when the caller had
//!   explicitly asked for another mode.
//! * **Delegation**: Delegates computation to the execution engine.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Data length is a positive multiple of the dimension.
//! * All values must be finite.
//! * `1 <= num_clusters <= N`.
//!
//! ## Non-goals
//!
//! * This adapter does not handle streaming or incremental updates.
//! * This adapter does not handle missing values.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::string::String;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::initialization::{CustomParameters, Initialization, InitializationPlan};
use crate::engine::executor::{AccumulationPassFn, ExpectationPassFn};
use crate::engine::executor::{
    GmmConfig, GmmExecutor, DEFAULT_KMEANS_ITERATIONS, DEFAULT_MAX_ITERATIONS, DEFAULT_SEED,
    DEFAULT_SIGMA_LOWER_BOUND, DEFAULT_TOLERANCE,
};
use crate::engine::output::GmmResult;
use crate::engine::validator::Validator;
use crate::primitives::buffer::DataMatrix;
use crate::primitives::dtype::NumericKind;
use crate::primitives::errors::GmmError;
use crate::primitives::threading::Multithreading;

// ============================================================================
// Batch GMM Builder
// ============================================================================

/// Builder for batch GMM processor.
#[derive(Debug, Clone)]
pub struct BatchGmmBuilder<T> {
    /// Number of components (required)
    pub num_clusters: Option<usize>,

    /// Cap on EM iterations per repetition
    pub max_iterations: usize,

    /// Independent repetitions
    pub num_repetitions: usize,

    /// Explicitly requested initialization mode
    pub initialization: Option<Initialization>,

    /// Threading mode
    pub multithreading: Multithreading,

    /// Lower bound on every variance entry
    pub sigma_lower_bound: T,

    /// Relative log-likelihood tolerance
    pub tolerance: T,

    /// Lloyd iterations of the clustering-based initializer
    pub kmeans_iterations: usize,

    /// Seed of the randomized initializers
    pub seed: u64,

    /// Custom initial means (K * D)
    pub init_means: Option<Vec<T>>,

    /// Custom initial variances (K * D)
    pub init_sigmas: Option<Vec<T>>,

    /// Custom initial weights (K)
    pub init_weights: Option<Vec<T>>,

    /// Diagnostic verbosity
    pub verbosity: usize,

    /// Whether to return the responsibility matrix
    pub return_responsibilities: bool,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom E-step pass function.
    #[doc(hidden)]
    pub custom_expectation_pass: Option<ExpectationPassFn<T>>,

    /// Custom M-step accumulation pass function.
    #[doc(hidden)]
    pub custom_accumulation_pass: Option<AccumulationPassFn<T>>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for BatchGmmBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> BatchGmmBuilder<T> {
    /// Create a new batch GMM builder with default parameters.
    fn new() -> Self {
        Self {
            num_clusters: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            num_repetitions: 1,
            initialization: None,
            multithreading: Multithreading::default(),
            sigma_lower_bound: T::from(DEFAULT_SIGMA_LOWER_BOUND).unwrap_or_else(T::epsilon),
            tolerance: T::from(DEFAULT_TOLERANCE).unwrap_or_else(T::epsilon),
            kmeans_iterations: DEFAULT_KMEANS_ITERATIONS,
            seed: DEFAULT_SEED,
            init_means: None,
            init_sigmas: None,
            init_weights: None,
            verbosity: 0,
            return_responsibilities: false,
            custom_expectation_pass: None,
            custom_accumulation_pass: None,
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Set the number of components.
    pub fn num_clusters(mut self, k: usize) -> Self {
        self.num_clusters = Some(k);
        self
    }

    /// Set the cap on EM iterations per repetition.
    pub fn max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Set the number of independent repetitions.
    pub fn num_repetitions(mut self, n: usize) -> Self {
        self.num_repetitions = n;
        self
    }

    /// Set the initialization mode.
    pub fn initialization(mut self, mode: Initialization) -> Self {
        self.initialization = Some(mode);
        self
    }

    /// Set the threading mode.
    pub fn multithreading(mut self, mode: Multithreading) -> Self {
        self.multithreading = mode;
        self
    }

    /// Set the lower bound on every variance entry.
    pub fn sigma_lower_bound(mut self, bound: T) -> Self {
        self.sigma_lower_bound = bound;
        self
    }

    /// Set the relative log-likelihood tolerance.
    pub fn tolerance(mut self, tol: T) -> Self {
        self.tolerance = tol;
        self
    }

    /// Set the Lloyd iterations of the clustering-based initializer.
    pub fn kmeans_iterations(mut self, n: usize) -> Self {
        self.kmeans_iterations = n;
        self
    }

    /// Set the seed of the randomized initializers.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set diagnostic verbosity.
    pub fn verbosity(mut self, level: usize) -> Self {
        self.verbosity = level;
        self
    }

    /// Request the N×K responsibility matrix in the result.
    pub fn return_responsibilities(mut self, enabled: bool) -> Self {
        self.return_responsibilities = enabled;
        self
    }

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++

    /// Set a custom E-step pass function.
    #[doc(hidden)]
    pub fn custom_expectation_pass(mut self, pass: ExpectationPassFn<T>) -> Self {
        self.custom_expectation_pass = Some(pass);
        self
    }

    /// Set a custom M-step accumulation pass function.
    #[doc(hidden)]
    pub fn custom_accumulation_pass(mut self, pass: AccumulationPassFn<T>) -> Self {
        self.custom_accumulation_pass = Some(pass);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the batch processor.
    pub fn build(self) -> Result<BatchGmm<T>, GmmError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        if self.num_clusters.is_none() {
            return Err(GmmError::InvalidArgument("num_clusters must be set".into()));
        }

        Validator::validate_repetitions(self.num_repetitions)?;
        Validator::validate_max_iterations(self.max_iterations)?;
        Validator::validate_sigma_lower_bound(self.sigma_lower_bound)?;
        Validator::validate_tolerance(self.tolerance)?;

        Ok(BatchGmm { config: self })
    }
}

// ============================================================================
// Batch GMM Processor
// ============================================================================

/// Batch GMM processor.
#[derive(Debug, Clone)]
pub struct BatchGmm<T> {
    config: BatchGmmBuilder<T>,
}

impl<T: Float + NumericKind> BatchGmm<T> {
    /// Fit a mixture to row-major data of the given dimension.
    pub fn fit(self, data: &[T], dimension: usize) -> Result<GmmResult<T>, GmmError> {
        let num_data = Validator::validate_data(data, dimension)?;
        let num_clusters = self.config.num_clusters.unwrap_or(0);
        Validator::validate_num_clusters(num_clusters, num_data)?;

        let initialization = self.resolve_initialization(num_clusters, dimension)?;
        let cfg = self.config;

        let config = GmmConfig {
            num_clusters,
            max_iterations: cfg.max_iterations,
            num_repetitions: cfg.num_repetitions,
            initialization,
            multithreading: cfg.multithreading,
            sigma_lower_bound: cfg.sigma_lower_bound,
            tolerance: cfg.tolerance,
            seed: cfg.seed,
            verbosity: cfg.verbosity,
            return_responsibilities: cfg.return_responsibilities,
            // ++++++++++++++++++++++++++++++++++++++
            // +               DEV                  +
            // ++++++++++++++++++++++++++++++++++++++
            custom_expectation_pass: cfg.custom_expectation_pass,
            custom_accumulation_pass: cfg.custom_accumulation_pass,
        };

        let output = GmmExecutor::run_with_config(DataMatrix::new(data, dimension), config);
        Ok(GmmResult::from_output(output, num_data))
    }

    /// Settle the initialization mode and validate custom parameters.
    fn resolve_initialization(
        &self,
        num_clusters: usize,
        dimension: usize,
    ) -> Result<InitializationPlan<T>, GmmError> {
        let cfg = &self.config;
        let supplied =
            cfg.init_means.is_some() || cfg.init_sigmas.is_some() || cfg.init_weights.is_some();

        let mode = match (supplied, cfg.initialization) {
            (true, Some(requested)) if requested != Initialization::Custom => {
                tracing::warn!(
                    requested = %requested,
                    "custom initial parameters supplied; switching initialization to custom"
                );
                Initialization::Custom
            }
            (true, _) => Initialization::Custom,
            (false, requested) => requested.unwrap_or_default(),
        };

        match mode {
            Initialization::Random => Ok(InitializationPlan::Random {
                kmeans_iterations: cfg.kmeans_iterations,
            }),
            Initialization::RandomPoints => Ok(InitializationPlan::RandomPoints),
            Initialization::Custom => {
                let (Some(means), Some(sigmas), Some(weights)) =
                    (&cfg.init_means, &cfg.init_sigmas, &cfg.init_weights)
                else {
                    return Err(GmmError::InvalidInitialization(self.missing_custom()));
                };
                let params = CustomParameters {
                    means: means.clone(),
                    sigmas: sigmas.clone(),
                    weights: weights.clone(),
                };
                Validator::validate_custom(&params, num_clusters, dimension)?;
                Ok(InitializationPlan::Custom(params))
            }
        }
    }

    /// Names of the custom arrays that were not supplied.
    fn missing_custom(&self) -> String {
        let cfg = &self.config;
        let missing: Vec<&str> = [
            ("init_means", cfg.init_means.is_none()),
            ("init_sigmas", cfg.init_sigmas.is_none()),
            ("init_weights", cfg.init_weights.is_none()),
        ]
        .iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| *name)
        .collect();
        let mut msg = String::from(
            "custom initialization requires init_means, init_sigmas and init_weights; missing ",
        );
        msg.push_str(&missing.join(", "));
        msg
    }
}
