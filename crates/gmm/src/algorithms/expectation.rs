//! Expectation step.
//!
//! ## Purpose
//!
//! This module computes posterior responsibilities of every component for
//! every observation, together with the total data log-likelihood under the
//! current mixture.
//!
//! ## Design notes
//!
//! * **Row-local**: each observation's row is computed independently, so the
//!   parallel pass in the extension crate simply partitions the rows.
//! * **Log domain**: the row is normalized with log-sum-exp; the value of the
//!   log-sum-exp is the observation's log-likelihood.
//!
//! ## Invariants
//!
//! * Every posterior row sums to one (up to rounding).
//! * The returned total equals the sum of the per-row log-likelihoods.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::gaussian::{weighted_log_density, ComponentCache};
use crate::math::logsumexp::normalize_log_probs;
use crate::primitives::buffer::DataMatrix;
use crate::primitives::mixture::Mixture;

/// Fill one posterior row for observation `x`; returns its log-likelihood.
#[inline]
pub fn observation_responsibilities<T: Float>(
    x: &[T],
    mixture: &Mixture<T>,
    cache: &ComponentCache<T>,
    row: &mut [T],
) -> T {
    for (k, slot) in row.iter_mut().enumerate() {
        *slot = weighted_log_density(x, mixture.mean(k), cache.inv_variance(k), cache.log_norm[k]);
    }
    normalize_log_probs(row)
}

/// Serial E-step over all observations.
///
/// `posteriors` is row-major N×K and `row_log_likelihoods` has length N.
/// Returns the total log-likelihood.
pub fn expectation_pass<T: Float>(
    data: DataMatrix<'_, T>,
    mixture: &Mixture<T>,
    cache: &ComponentCache<T>,
    posteriors: &mut [T],
    row_log_likelihoods: &mut [T],
) -> T {
    let k = mixture.num_clusters;
    let mut total = T::zero();
    for ((x, row), ll) in data
        .rows()
        .zip(posteriors.chunks_exact_mut(k))
        .zip(row_log_likelihoods.iter_mut())
    {
        *ll = observation_responsibilities(x, mixture, cache, row);
        total = total + *ll;
    }
    total
}
