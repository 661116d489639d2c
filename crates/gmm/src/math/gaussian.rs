//! Diagonal Gaussian log-densities.
//!
//! ## Purpose
//!
//! This module evaluates the log-density of an observation under a
//! diagonal-covariance Gaussian, with the per-component constants hoisted
//! out of the per-observation loop.
//!
//! ## Design notes
//!
//! * **Log domain**: Densities are never exponentiated here; the E-step
//!   normalizes in the log domain.
//! * **Precomputation**: `log(w_k) - 0.5 * sum_d log(2*pi*var_kd)` and the
//!   inverse variances are computed once per E-step in [`ComponentCache`].
//!
//! ## Key concepts
//!
//! ```text
//! log N(x | mu, diag(var)) = sum_d [ -0.5 * log(2*pi*var_d) - (x_d - mu_d)^2 / (2*var_d) ]
//! ```
//!
//! ## Invariants
//!
//! * Variances are strictly positive (guaranteed by the sigma lower bound).
//! * A component with zero weight has a log-normalizer of negative infinity.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::buffer::{Slot, VecExt};
use crate::primitives::mixture::Mixture;

// ============================================================================
// Mathematical Constants
// ============================================================================

/// ln(2*pi).
pub const LN_2PI: f64 = 1.837_877_066_409_345_5_f64;

// ============================================================================
// Component Cache
// ============================================================================

/// Per-component constants for a fixed mixture.
#[derive(Debug, Clone)]
pub struct ComponentCache<T> {
    /// Number of components (K).
    pub num_clusters: usize,

    /// Dimension (D).
    pub dimension: usize,

    /// `log(w_k) - 0.5 * sum_d log(2*pi*var_kd)` per component.
    pub log_norm: Slot<T>,

    /// `1 / var_kd`, component-major (K * D).
    pub inv_variances: Slot<T>,
}

impl<T> Default for ComponentCache<T> {
    fn default() -> Self {
        Self {
            num_clusters: 0,
            dimension: 0,
            log_norm: Slot::default(),
            inv_variances: Slot::default(),
        }
    }
}

impl<T: Float> ComponentCache<T> {
    /// Build the cache for `mixture`.
    pub fn from_mixture(mixture: &Mixture<T>) -> Self {
        let mut cache = Self::default();
        cache.update(mixture);
        cache
    }

    /// Recompute the cache in place for `mixture`.
    pub fn update(&mut self, mixture: &Mixture<T>) {
        let k = mixture.num_clusters;
        let d = mixture.dimension;
        let half = T::from(0.5).unwrap_or_else(T::zero);
        let ln_2pi = T::from(LN_2PI).unwrap_or_else(T::zero);

        self.num_clusters = k;
        self.dimension = d;
        self.log_norm.as_vec_mut().assign(k, T::zero());
        self.inv_variances.as_vec_mut().assign(k * d, T::zero());

        for c in 0..k {
            let mut log_det = T::zero();
            for (inv, &var) in self.inv_variances[c * d..(c + 1) * d]
                .iter_mut()
                .zip(mixture.variance(c))
            {
                *inv = T::one() / var;
                log_det = log_det + var.ln();
            }
            let dim = T::from(d).unwrap_or_else(T::zero);
            self.log_norm[c] = mixture.weights[c].ln() - half * (dim * ln_2pi + log_det);
        }
    }

    /// Inverse variances of component `k`.
    #[inline]
    pub fn inv_variance(&self, k: usize) -> &[T] {
        &self.inv_variances[k * self.dimension..(k + 1) * self.dimension]
    }
}

// ============================================================================
// Log-density Evaluation
// ============================================================================

/// Weighted log-density `log(w_k) + log N(x | mu_k, var_k)` of one observation.
#[inline]
pub fn weighted_log_density<T: Float>(x: &[T], mean: &[T], inv_var: &[T], log_norm: T) -> T {
    let half = T::from(0.5).unwrap_or_else(T::zero);
    let mut mahalanobis = T::zero();
    for ((&xi, &mi), &iv) in x.iter().zip(mean).zip(inv_var) {
        let diff = xi - mi;
        mahalanobis = mahalanobis + diff * diff * iv;
    }
    log_norm - half * mahalanobis
}

/// Unweighted log-density `log N(x | mu, diag(var))`.
pub fn log_density<T: Float>(x: &[T], mean: &[T], variance: &[T]) -> T {
    let half = T::from(0.5).unwrap_or_else(T::zero);
    let ln_2pi = T::from(LN_2PI).unwrap_or_else(T::zero);
    x.iter()
        .zip(mean)
        .zip(variance)
        .fold(T::zero(), |acc, ((&xi, &mi), &var)| {
            let diff = xi - mi;
            acc - half * ((ln_2pi + var.ln()) + diff * diff / var)
        })
}

/// Squared Euclidean distance between two points.
#[inline]
pub fn squared_distance<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter().zip(b).fold(T::zero(), |acc, (&x, &y)| {
        let diff = x - y;
        acc + diff * diff
    })
}

/// Log-densities of `x` under every component of a cached mixture.
pub fn component_log_densities<T: Float>(
    x: &[T],
    mixture: &Mixture<T>,
    cache: &ComponentCache<T>,
) -> Vec<T> {
    (0..mixture.num_clusters)
        .map(|k| weighted_log_density(x, mixture.mean(k), cache.inv_variance(k), cache.log_norm[k]))
        .collect()
}
