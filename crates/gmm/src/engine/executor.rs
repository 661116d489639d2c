//! Execution engine for Gaussian mixture fitting.
//!
//! ## Purpose
//!
//! This module provides the core execution engine that orchestrates EM
//! fitting. It runs the restart controller (independent repetitions, best
//! log-likelihood wins), the per-repetition EM loop and the convergence
//! monitor, and dispatches the E-step and M-step accumulation either to the
//! serial passes or to passes installed by an extension crate.
//!
//! ## Design notes
//!
//! * Provides both configuration-based and setter-based construction.
//! * Working buffers are allocated once and reused across repetitions.
//! * One seeded generator drives every repetition, so repetitions differ but
//!   the whole fit is reproducible.
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Invariants
//!
//! * The reported log-likelihood of a repetition was evaluated on the
//!   mixture returned for it.
//! * Responsibilities, when requested, belong to the selected mixture.
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by `validator`).
//! * This module does not resolve initialization precedence (handled by
//!   adapters).
//! * This module does not provide parallel passes itself.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Internal dependencies
use crate::algorithms::expectation::expectation_pass;
use crate::algorithms::initialization::{InitializationPlan, Initializer};
use crate::algorithms::maximization::{accumulate_pass, maximization_step};
use crate::evaluation::convergence::ConvergenceMonitor;
use crate::evaluation::diagnostics::RepetitionSummary;
use crate::math::gaussian::ComponentCache;
pub use crate::primitives::buffer::EmBuffer;
use crate::primitives::buffer::{DataMatrix, SufficientStats};
use crate::primitives::dtype::NumericKind;
use crate::primitives::mixture::Mixture;
use crate::primitives::threading::Multithreading;

// ============================================================================
// Defaults
// ============================================================================

/// Default cap on EM iterations per repetition.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Largest accepted iteration cap.
pub const MAX_ITERATIONS_LIMIT: usize = 100_000;

/// Default lower bound on every variance entry.
pub const DEFAULT_SIGMA_LOWER_BOUND: f64 = 1e-6;

/// Default relative log-likelihood tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Default Lloyd iterations of the clustering-based initializer.
pub const DEFAULT_KMEANS_ITERATIONS: usize = 10;

/// Seed used when the caller does not provide one.
pub const DEFAULT_SEED: u64 = 0;

// ============================================================================
// Type Definitions
// ============================================================================

/// Signature for custom E-step pass function.
#[doc(hidden)]
pub type ExpectationPassFn<T> = fn(
    DataMatrix<'_, T>,     // observations
    &Mixture<T>,           // current mixture
    &ComponentCache<T>,    // per-component constants
    &mut [T],              // posteriors (N * K)
    &mut [T],              // per-row log-likelihoods (N)
) -> T; // total log-likelihood

/// Signature for custom M-step accumulation pass function.
#[doc(hidden)]
pub type AccumulationPassFn<T> = fn(
    DataMatrix<'_, T>,      // observations
    &[T],                   // posteriors (N * K)
    usize,                  // num_clusters
    &mut SufficientStats<T>, // output accumulators
);

/// Output from GMM execution.
#[derive(Debug, Clone)]
pub struct ExecutorOutput<T> {
    /// Mixture of the best repetition.
    pub mixture: Mixture<T>,

    /// Log-likelihood of the best repetition.
    pub log_likelihood: T,

    /// Responsibilities of the best mixture (if requested).
    pub responsibilities: Option<Vec<T>>,

    /// Index of the best repetition.
    pub best_repetition: usize,

    /// Summary of every repetition, in execution order.
    pub repetitions: Vec<RepetitionSummary<T>>,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for GMM execution.
#[derive(Debug, Clone)]
pub struct GmmConfig<T> {
    /// Number of mixture components (K).
    pub num_clusters: usize,

    /// Cap on M-steps per repetition.
    pub max_iterations: usize,

    /// Independent repetitions; the best one is returned.
    pub num_repetitions: usize,

    /// Resolved initialization.
    pub initialization: InitializationPlan<T>,

    /// Threading mode.
    pub multithreading: Multithreading,

    /// Lower bound on every variance entry.
    pub sigma_lower_bound: T,

    /// Relative log-likelihood tolerance.
    pub tolerance: T,

    /// Seed for the randomized initializers.
    pub seed: u64,

    /// Diagnostic verbosity.
    pub verbosity: usize,

    /// Whether to return the N×K responsibility matrix.
    pub return_responsibilities: bool,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom E-step pass function (enables parallel execution).
    #[doc(hidden)]
    pub custom_expectation_pass: Option<ExpectationPassFn<T>>,

    /// Custom M-step accumulation pass function.
    #[doc(hidden)]
    pub custom_accumulation_pass: Option<AccumulationPassFn<T>>,
}

impl<T: Float> Default for GmmConfig<T> {
    fn default() -> Self {
        Self {
            num_clusters: 1,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            num_repetitions: 1,
            initialization: InitializationPlan::Random {
                kmeans_iterations: DEFAULT_KMEANS_ITERATIONS,
            },
            multithreading: Multithreading::Serial,
            sigma_lower_bound: T::from(DEFAULT_SIGMA_LOWER_BOUND).unwrap_or_else(T::epsilon),
            tolerance: T::from(DEFAULT_TOLERANCE).unwrap_or_else(T::epsilon),
            seed: DEFAULT_SEED,
            verbosity: 0,
            return_responsibilities: false,
            custom_expectation_pass: None,
            custom_accumulation_pass: None,
        }
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Unified executor for GMM fitting.
#[derive(Debug, Clone)]
pub struct GmmExecutor<T> {
    config: GmmConfig<T>,
}

impl<T: Float> Default for GmmExecutor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> GmmExecutor<T> {
    // ========================================================================
    // Constructor and Builder Methods
    // ========================================================================

    /// Create a new executor with default parameters.
    pub fn new() -> Self {
        Self {
            config: GmmConfig::default(),
        }
    }

    /// Create a new executor from a `GmmConfig`.
    pub fn from_config(config: GmmConfig<T>) -> Self {
        Self { config }
    }

    /// Configuration this executor runs with.
    pub fn config(&self) -> &GmmConfig<T> {
        &self.config
    }

    /// Set the number of components.
    pub fn num_clusters(mut self, k: usize) -> Self {
        self.config.num_clusters = k;
        self
    }

    /// Set the cap on M-steps per repetition.
    pub fn max_iterations(mut self, n: usize) -> Self {
        self.config.max_iterations = n;
        self
    }

    /// Set the number of repetitions.
    pub fn num_repetitions(mut self, n: usize) -> Self {
        self.config.num_repetitions = n;
        self
    }

    /// Set the resolved initialization.
    pub fn initialization(mut self, plan: InitializationPlan<T>) -> Self {
        self.config.initialization = plan;
        self
    }

    /// Set the seed of the randomized initializers.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++

    /// Set the threading mode.
    #[doc(hidden)]
    pub fn multithreading(mut self, mode: Multithreading) -> Self {
        self.config.multithreading = mode;
        self
    }

    /// Set a custom E-step pass function (e.g., for parallelization).
    #[doc(hidden)]
    pub fn custom_expectation_pass(mut self, pass: Option<ExpectationPassFn<T>>) -> Self {
        self.config.custom_expectation_pass = pass;
        self
    }

    /// Set a custom M-step accumulation pass function.
    #[doc(hidden)]
    pub fn custom_accumulation_pass(mut self, pass: Option<AccumulationPassFn<T>>) -> Self {
        self.config.custom_accumulation_pass = pass;
        self
    }

    // ========================================================================
    // Main Entry Points
    // ========================================================================

    /// Fit a mixture to validated data using a `GmmConfig` payload.
    pub fn run_with_config(data: DataMatrix<'_, T>, config: GmmConfig<T>) -> ExecutorOutput<T>
    where
        T: NumericKind,
    {
        Self::from_config(config).run(data)
    }

    /// Fit a mixture to validated data.
    pub fn run(&self, data: DataMatrix<'_, T>) -> ExecutorOutput<T>
    where
        T: NumericKind,
    {
        let cfg = &self.config;
        let k = cfg.num_clusters;
        if cfg.multithreading != self.effective_multithreading() {
            tracing::warn!("parallel execution requested but no parallel passes are installed, running serially");
        }
        if cfg.verbosity > 0 {
            self.log_summary(data);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);
        let mut buffer = EmBuffer::with_capacity(data.num_data, k);
        let mut cache = ComponentCache::default();
        let mut repetitions = Vec::with_capacity(cfg.num_repetitions);
        let mut best: Option<(usize, T, Mixture<T>)> = None;

        for rep in 0..cfg.num_repetitions.max(1) {
            let initial = Initializer::initialize(
                &cfg.initialization,
                data,
                k,
                cfg.sigma_lower_bound,
                &mut rng,
            );
            let (mixture, summary) = self.run_repetition(rep, data, initial, &mut buffer, &mut cache);

            if cfg.verbosity > 0 {
                tracing::info!(
                    repetition = rep,
                    log_likelihood = summary.log_likelihood.to_f64().unwrap_or(f64::NAN),
                    iterations = summary.iterations,
                    status = %summary.status,
                    reseeded = summary.reseeded,
                    "repetition finished"
                );
            }

            let improves = match &best {
                Some((_, ll, _)) => summary.log_likelihood > *ll,
                None => true,
            };
            if improves {
                best = Some((rep, summary.log_likelihood, mixture));
            }
            repetitions.push(summary);
        }

        let (best_repetition, log_likelihood, mixture) =
            best.unwrap_or_else(|| (0, T::neg_infinity(), Mixture::new(k, data.dimension)));

        let responsibilities = if cfg.return_responsibilities {
            cache.update(&mixture);
            self.expectation(
                data,
                &mixture,
                &cache,
                &mut buffer.posteriors,
                &mut buffer.log_likelihoods,
            );
            Some(buffer.posteriors.to_vec())
        } else {
            None
        };

        ExecutorOutput {
            mixture,
            log_likelihood,
            responsibilities,
            best_repetition,
            repetitions,
        }
    }

    // ========================================================================
    // EM Loop
    // ========================================================================

    /// Run EM from `mixture` until the monitor stops it.
    fn run_repetition(
        &self,
        repetition: usize,
        data: DataMatrix<'_, T>,
        mut mixture: Mixture<T>,
        buffer: &mut EmBuffer<T>,
        cache: &mut ComponentCache<T>,
    ) -> (Mixture<T>, RepetitionSummary<T>) {
        let cfg = &self.config;
        let k = cfg.num_clusters;
        let mut monitor = ConvergenceMonitor::new(cfg.max_iterations, cfg.tolerance);
        let mut reseeded = 0;
        buffer.prepare(data.num_data, k, data.dimension);

        loop {
            cache.update(&mixture);
            let ll = self.expectation(
                data,
                &mixture,
                cache,
                &mut buffer.posteriors,
                &mut buffer.log_likelihoods,
            );
            let status = monitor.observe(ll);

            if cfg.verbosity > 1 {
                tracing::debug!(
                    repetition,
                    iteration = monitor.iterations(),
                    log_likelihood = ll.to_f64().unwrap_or(f64::NAN),
                    "em iteration"
                );
            }
            if status.is_stopped() {
                break;
            }

            self.accumulate(data, &buffer.posteriors, k, &mut buffer.stats);
            reseeded += maximization_step(
                data,
                &buffer.stats,
                &buffer.log_likelihoods,
                cfg.sigma_lower_bound,
                &mut mixture,
            );
        }

        let summary = RepetitionSummary {
            repetition,
            log_likelihood: monitor.last().unwrap_or_else(T::neg_infinity),
            iterations: monitor.iterations(),
            status: monitor.status(),
            trace: monitor.into_trace(),
            reseeded,
        };
        (mixture, summary)
    }

    /// Threading mode the passes actually run in.
    ///
    /// Parallel only when it was requested and a parallel pass is installed.
    pub fn effective_multithreading(&self) -> Multithreading {
        let cfg = &self.config;
        let installed =
            cfg.custom_expectation_pass.is_some() || cfg.custom_accumulation_pass.is_some();
        match cfg.multithreading {
            Multithreading::Parallel if installed => Multithreading::Parallel,
            _ => Multithreading::Serial,
        }
    }

    /// E-step, dispatched to the installed pass in parallel mode.
    fn expectation(
        &self,
        data: DataMatrix<'_, T>,
        mixture: &Mixture<T>,
        cache: &ComponentCache<T>,
        posteriors: &mut [T],
        row_log_likelihoods: &mut [T],
    ) -> T {
        match (self.config.multithreading, self.config.custom_expectation_pass) {
            (Multithreading::Parallel, Some(pass)) => {
                pass(data, mixture, cache, posteriors, row_log_likelihoods)
            }
            _ => expectation_pass(data, mixture, cache, posteriors, row_log_likelihoods),
        }
    }

    /// M-step accumulation, dispatched to the installed pass in parallel mode.
    fn accumulate(
        &self,
        data: DataMatrix<'_, T>,
        posteriors: &[T],
        num_clusters: usize,
        stats: &mut SufficientStats<T>,
    ) {
        match (self.config.multithreading, self.config.custom_accumulation_pass) {
            (Multithreading::Parallel, Some(pass)) => pass(data, posteriors, num_clusters, stats),
            _ => accumulate_pass(data, posteriors, num_clusters, stats),
        }
    }

    /// Emit the resolved configuration.
    fn log_summary(&self, data: DataMatrix<'_, T>)
    where
        T: NumericKind,
    {
        let cfg = &self.config;
        tracing::info!(
            initialization = %cfg.initialization.mode(),
            multithreading = %self.effective_multithreading(),
            max_iterations = cfg.max_iterations,
            num_repetitions = cfg.num_repetitions,
            data_type = %T::DATA_TYPE,
            dimension = data.dimension,
            num_data = data.num_data,
            num_clusters = cfg.num_clusters,
            sigma_lower_bound = cfg.sigma_lower_bound.to_f64().unwrap_or(f64::NAN),
            "gmm: training configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::convergence::ConvergenceStatus;

    fn blobs() -> Vec<f64> {
        vec![
            0.0, 0.0, 0.2, 0.1, -0.1, 0.2, 0.1, -0.2, //
            10.0, 10.0, 10.2, 9.9, 9.8, 10.1, 10.1, 10.2,
        ]
    }

    #[test]
    fn test_zero_iterations_returns_initial_log_likelihood() {
        let data = blobs();
        let out = GmmExecutor::new()
            .num_clusters(2)
            .max_iterations(0)
            .run(DataMatrix::new(&data, 2));
        let rep = &out.repetitions[0];
        assert_eq!(rep.iterations, 0);
        assert_eq!(rep.trace.len(), 1);
        assert_eq!(rep.status, ConvergenceStatus::MaxIterationsReached);
        assert_eq!(out.log_likelihood, rep.trace[0]);
    }

    #[test]
    fn test_best_repetition_is_maximal() {
        let data = blobs();
        let out = GmmExecutor::new()
            .num_clusters(3)
            .num_repetitions(4)
            .seed(9)
            .run(DataMatrix::new(&data, 2));
        assert_eq!(out.repetitions.len(), 4);
        for rep in &out.repetitions {
            assert!(out.log_likelihood >= rep.log_likelihood);
        }
        assert_eq!(
            out.repetitions[out.best_repetition].log_likelihood,
            out.log_likelihood
        );
    }

    #[test]
    fn test_parallel_without_hooks_falls_back_to_serial() {
        let data = blobs();
        let view = DataMatrix::new(&data, 2);
        let serial = GmmExecutor::new().num_clusters(2).run(view);
        let requested = GmmExecutor::new()
            .num_clusters(2)
            .multithreading(Multithreading::Parallel);
        assert_eq!(requested.effective_multithreading(), Multithreading::Serial);

        let parallel = requested.run(view);
        assert_eq!(serial.log_likelihood, parallel.log_likelihood);
        assert_eq!(serial.mixture, parallel.mixture);
    }
}
