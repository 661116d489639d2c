//! Mixture parameters for a diagonal-covariance GMM.
//!
//! ## Purpose
//!
//! This module defines [`Mixture`], the K-component parameter set that the
//! initializer creates, the E-step reads and the M-step rewrites in place.
//!
//! ## Design notes
//!
//! * **Component-major storage**: `means` and `variances` hold `K * D`
//!   values; component `k` occupies `[k * D, (k + 1) * D)`. This is the same
//!   memory as a column-major D×K matrix.
//! * **Diagonal only**: one variance per dimension, no off-diagonal terms.
//!
//! ## Invariants
//!
//! * `weights` has K entries, non-negative, summing to one.
//! * Every variance entry is at least the configured lower bound once the
//!   mixture has passed through an initializer or an M-step.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

/// Parameters of a K-component diagonal Gaussian mixture.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixture<T> {
    /// Number of components (K).
    pub num_clusters: usize,

    /// Dimension of each observation (D).
    pub dimension: usize,

    /// Component means, component-major (K * D).
    pub means: Vec<T>,

    /// Diagonal variances, component-major (K * D).
    pub variances: Vec<T>,

    /// Mixing weights (K).
    pub weights: Vec<T>,
}

impl<T: Float> Mixture<T> {
    /// Allocate a mixture with zero means, unit variances and uniform weights.
    pub fn new(num_clusters: usize, dimension: usize) -> Self {
        let uniform = if num_clusters > 0 {
            T::one() / T::from(num_clusters).unwrap_or_else(T::one)
        } else {
            T::zero()
        };
        Self {
            num_clusters,
            dimension,
            means: vec![T::zero(); num_clusters * dimension],
            variances: vec![T::one(); num_clusters * dimension],
            weights: vec![uniform; num_clusters],
        }
    }

    /// Mean vector of component `k`.
    #[inline]
    pub fn mean(&self, k: usize) -> &[T] {
        &self.means[k * self.dimension..(k + 1) * self.dimension]
    }

    /// Mutable mean vector of component `k`.
    #[inline]
    pub fn mean_mut(&mut self, k: usize) -> &mut [T] {
        let d = self.dimension;
        &mut self.means[k * d..(k + 1) * d]
    }

    /// Variance vector of component `k`.
    #[inline]
    pub fn variance(&self, k: usize) -> &[T] {
        &self.variances[k * self.dimension..(k + 1) * self.dimension]
    }

    /// Mutable variance vector of component `k`.
    #[inline]
    pub fn variance_mut(&mut self, k: usize) -> &mut [T] {
        let d = self.dimension;
        &mut self.variances[k * d..(k + 1) * d]
    }

    /// Raise every variance entry to at least `lower_bound`.
    pub fn clamp_variances(&mut self, lower_bound: T) {
        for v in self.variances.iter_mut() {
            if !(*v >= lower_bound) {
                *v = lower_bound;
            }
        }
    }

    /// Rescale weights so they sum to one.
    ///
    /// Falls back to uniform weights if the total is not positive.
    pub fn normalize_weights(&mut self) {
        let total = self.weights.iter().fold(T::zero(), |acc, &w| acc + w);
        if total > T::zero() && total.is_finite() {
            for w in self.weights.iter_mut() {
                *w = *w / total;
            }
        } else if self.num_clusters > 0 {
            let uniform = T::one() / T::from(self.num_clusters).unwrap_or_else(T::one);
            self.weights.fill(uniform);
        }
    }

    /// Sum of the mixing weights.
    pub fn weight_sum(&self) -> T {
        self.weights.iter().fold(T::zero(), |acc, &w| acc + w)
    }

    /// Smallest variance entry across all components.
    pub fn min_variance(&self) -> T {
        self.variances
            .iter()
            .copied()
            .fold(T::infinity(), |acc, v| acc.min(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_accessors() {
        let mut m = Mixture::<f64>::new(2, 3);
        m.mean_mut(1).copy_from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(m.mean(0), &[0.0, 0.0, 0.0]);
        assert_eq!(m.mean(1), &[1.0, 2.0, 3.0]);
        assert_eq!(&m.means[3..], &[1.0, 2.0, 3.0]);
        assert_eq!(m.variance(1), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_clamp_and_normalize() {
        let mut m = Mixture::<f64>::new(2, 1);
        m.variances = vec![1e-12, 0.5];
        m.weights = vec![3.0, 1.0];
        m.clamp_variances(1e-6);
        m.normalize_weights();
        assert_eq!(m.variances, vec![1e-6, 0.5]);
        assert!((m.weights[0] - 0.75).abs() < 1e-15);
        assert!((m.weight_sum() - 1.0).abs() < 1e-15);
        assert_eq!(m.min_variance(), 1e-6);
    }

    #[test]
    fn test_normalize_degenerate_weights_falls_back_to_uniform() {
        let mut m = Mixture::<f32>::new(4, 1);
        m.weights.fill(0.0);
        m.normalize_weights();
        assert!(m.weights.iter().all(|&w| (w - 0.25).abs() < 1e-7));
    }
}
