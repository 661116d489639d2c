//! Parallel execution engine for Gaussian mixture fitting.
//!
//! ## Purpose
//!
//! This module provides the parallel E-step and M-step accumulation passes
//! that are injected into the `gmm` crate's execution engine. The EM loop,
//! convergence monitoring and restarts stay in `gmm`; only the two passes
//! that scale with the number of observations are distributed over the
//! rayon worker pool.
//!
//! ## Design notes
//!
//! * **Drop-in**: Both functions match the `gmm` hook signatures exactly.
//! * **E-step**: Observations are independent, so posterior rows and
//!   per-row log-likelihoods are computed in parallel. The total is summed
//!   afterwards in observation order.
//! * **Accumulation**: Parallel over components. Each task walks the
//!   observations in order, once for the weighted mean and once for the
//!   scatter about it, and owns its slice of the accumulators, so no
//!   locking or merge step is needed.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Both passes perform the same floating-point operations in the same
//!   order as the serial passes, so serial and parallel fits agree.
//! * `posteriors` is row-major N×K and `row_log_likelihoods` has length N.
//!
//! ## Non-goals
//!
//! * This module does not handle the EM loop (handled by `gmm::executor`).
//! * This module does not validate input data (handled by `validator`).

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use num_traits::Float;

// Export dependencies from gmm crate
use gmm::internals::algorithms::expectation::observation_responsibilities;
use gmm::internals::algorithms::maximization::{add_offsets, add_scatter, weighted_means};
use gmm::internals::math::gaussian::ComponentCache;
use gmm::internals::primitives::buffer::{DataMatrix, SufficientStats};
use gmm::internals::primitives::mixture::Mixture;

/// Minimum number of observations handed to one rayon task in the E-step.
#[cfg(feature = "cpu")]
const MIN_ROWS_PER_TASK: usize = 256;

// ============================================================================
// Parallel Expectation Pass
// ============================================================================

/// Compute responsibilities and log-likelihoods for all observations in parallel.
#[cfg(feature = "cpu")]
pub fn expectation_pass_parallel<T>(
    data: DataMatrix<'_, T>,
    mixture: &Mixture<T>,
    cache: &ComponentCache<T>,
    posteriors: &mut [T],
    row_log_likelihoods: &mut [T],
) -> T
where
    T: Float + Send + Sync,
{
    let k = mixture.num_clusters;
    if data.num_data == 0 || k == 0 {
        return T::zero();
    }

    posteriors
        .par_chunks_mut(k)
        .zip(row_log_likelihoods.par_iter_mut())
        .enumerate()
        .with_min_len(MIN_ROWS_PER_TASK)
        .for_each(|(i, (row, ll))| {
            *ll = observation_responsibilities(data.row(i), mixture, cache, row);
        });

    row_log_likelihoods
        .iter()
        .fold(T::zero(), |total, &ll| total + ll)
}

// ============================================================================
// Parallel Accumulation Pass
// ============================================================================

/// Accumulate the weighted sufficient statistics, one component per task.
///
/// Resets `stats` before accumulating.
#[cfg(feature = "cpu")]
pub fn accumulation_pass_parallel<T>(
    data: DataMatrix<'_, T>,
    posteriors: &[T],
    num_clusters: usize,
    stats: &mut SufficientStats<T>,
) where
    T: Float + Send + Sync,
{
    let d = data.dimension;
    stats.reset(num_clusters, d);
    if num_clusters == 0 || d == 0 || data.num_data == 0 {
        return;
    }
    let origin = data.row(0);

    let SufficientStats {
        mass,
        sum,
        mean,
        scatter,
    } = stats;
    mass.as_mut_slice()
        .par_iter_mut()
        .zip(sum.as_mut_slice().par_chunks_mut(d))
        .zip(mean.as_mut_slice().par_chunks_mut(d))
        .zip(scatter.as_mut_slice().par_chunks_mut(d))
        .enumerate()
        .for_each(|(k, (((mass_k, sum_k), mean_k), scatter_k))| {
            for (x, row) in data.rows().zip(posteriors.chunks_exact(num_clusters)) {
                let r = row[k];
                if r == T::zero() {
                    continue;
                }
                *mass_k = *mass_k + r;
                add_offsets(r, x, origin, sum_k);
            }

            weighted_means(*mass_k, sum_k, origin, mean_k);

            for (x, row) in data.rows().zip(posteriors.chunks_exact(num_clusters)) {
                let r = row[k];
                if r == T::zero() {
                    continue;
                }
                add_scatter(r, x, mean_k, scatter_k);
            }
        });
}
