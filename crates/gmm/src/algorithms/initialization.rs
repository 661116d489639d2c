//! Initial mixture construction.
//!
//! ## Purpose
//!
//! This module turns a resolved initialization plan into a starting
//! [`Mixture`]: clustering-based seeding, random data points, or
//! caller-supplied parameters.
//!
//! ## Design notes
//!
//! * **Resolved plans only**: precedence between explicitly requested modes
//!   and supplied custom arrays is settled by the adapter before this module
//!   is reached.
//! * **Degenerate groups**: single-member and empty groups get the sigma
//!   lower bound as variance; empty groups keep their seed point as mean and
//!   count as one observation when weights are formed.
//!
//! ## Key concepts
//!
//! * **Random**: k-means++ followed by Lloyd iterations; each group becomes
//!   a component (mean, per-dimension variance, weight ∝ group size).
//! * **RandomPoints**: K distinct observations as means, global variance,
//!   uniform weights.
//! * **Custom**: caller-supplied means, variances and weights, normalized and
//!   clamped on load.
//!
//! ## Invariants
//!
//! * The returned mixture has K components of dimension D.
//! * Weights are strictly positive and sum to one.
//! * Every variance entry is at least the lower bound.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use num_traits::Float;
use rand::Rng;

// Internal dependencies
use crate::algorithms::kmeans::partition;
use crate::primitives::buffer::DataMatrix;
use crate::primitives::errors::GmmError;
use crate::primitives::mixture::Mixture;

// ============================================================================
// Initialization Mode
// ============================================================================

/// Strategy used to build the starting mixture of every repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Initialization {
    /// Clustering-based seeding (k-means++ and Lloyd iterations).
    #[default]
    Random,

    /// Random distinct observations as means, global variance, uniform weights.
    RandomPoints,

    /// Caller-supplied means, variances and weights.
    Custom,
}

impl Display for Initialization {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Random => write!(f, "rand"),
            Self::RandomPoints => write!(f, "randpoints"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for Initialization {
    type Err = GmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const RANDOM: [&str; 3] = ["rand", "random", "kmeans"];
        const POINTS: [&str; 2] = ["randpoints", "points"];

        if RANDOM.iter().any(|name| s.eq_ignore_ascii_case(name)) {
            Ok(Self::Random)
        } else if POINTS.iter().any(|name| s.eq_ignore_ascii_case(name)) {
            Ok(Self::RandomPoints)
        } else if s.eq_ignore_ascii_case("custom") {
            Ok(Self::Custom)
        } else {
            Err(GmmError::InvalidArgument(format!(
                "invalid value {s} for initialization"
            )))
        }
    }
}

// ============================================================================
// Resolved Plan
// ============================================================================

/// Caller-supplied starting parameters (component-major, D×K / D×K / K).
#[derive(Debug, Clone, PartialEq)]
pub struct CustomParameters<T> {
    /// Means (K * D).
    pub means: Vec<T>,

    /// Variances (K * D).
    pub sigmas: Vec<T>,

    /// Weights (K).
    pub weights: Vec<T>,
}

/// Fully resolved initialization, as seen by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum InitializationPlan<T> {
    /// Clustering-based seeding with the given number of Lloyd iterations.
    Random {
        /// Lloyd iterations after k-means++ seeding.
        kmeans_iterations: usize,
    },

    /// Random distinct observations as means.
    RandomPoints,

    /// Caller-supplied parameters.
    Custom(CustomParameters<T>),
}

impl<T> InitializationPlan<T> {
    /// Mode this plan was resolved to.
    pub fn mode(&self) -> Initialization {
        match self {
            Self::Random { .. } => Initialization::Random,
            Self::RandomPoints => Initialization::RandomPoints,
            Self::Custom(_) => Initialization::Custom,
        }
    }
}

// ============================================================================
// Initializer
// ============================================================================

/// Builds starting mixtures from a resolved plan.
pub struct Initializer;

impl Initializer {
    /// Build the starting mixture for one repetition.
    pub fn initialize<T: Float, R: Rng + ?Sized>(
        plan: &InitializationPlan<T>,
        data: DataMatrix<'_, T>,
        num_clusters: usize,
        sigma_lower_bound: T,
        rng: &mut R,
    ) -> Mixture<T> {
        let mut mixture = match plan {
            InitializationPlan::Random { kmeans_iterations } => {
                Self::from_partition(data, num_clusters, *kmeans_iterations, rng)
            }
            InitializationPlan::RandomPoints => Self::from_random_points(data, num_clusters, rng),
            InitializationPlan::Custom(params) => {
                Self::from_custom(params, num_clusters, data.dimension)
            }
        };
        mixture.clamp_variances(sigma_lower_bound);
        mixture.normalize_weights();
        mixture
    }

    /// Components from a k-means partition of the data.
    fn from_partition<T: Float, R: Rng + ?Sized>(
        data: DataMatrix<'_, T>,
        num_clusters: usize,
        kmeans_iterations: usize,
        rng: &mut R,
    ) -> Mixture<T> {
        let d = data.dimension;
        let part = partition(data, num_clusters, kmeans_iterations, rng);
        let mut mixture = Mixture::new(num_clusters, d);

        mixture.means.fill(T::zero());
        mixture.variances.fill(T::zero());
        for (&a, x) in part.assignments.iter().zip(data.rows()) {
            for (m, &xi) in mixture.mean_mut(a).iter_mut().zip(x) {
                *m = *m + xi;
            }
        }
        for k in 0..num_clusters {
            let count = part.counts[k];
            if count == 0 {
                mixture
                    .mean_mut(k)
                    .copy_from_slice(&part.centers[k * d..(k + 1) * d]);
            } else {
                let c = T::from(count).unwrap_or_else(T::one);
                for m in mixture.mean_mut(k).iter_mut() {
                    *m = *m / c;
                }
            }
        }
        for (&a, x) in part.assignments.iter().zip(data.rows()) {
            let start = a * d;
            for j in 0..d {
                let diff = x[j] - mixture.means[start + j];
                mixture.variances[start + j] = mixture.variances[start + j] + diff * diff;
            }
        }
        for k in 0..num_clusters {
            let count = part.counts[k];
            // Empty and single-member groups are left at zero and clamped later.
            if count > 1 {
                let c = T::from(count).unwrap_or_else(T::one);
                for v in mixture.variance_mut(k).iter_mut() {
                    *v = *v / c;
                }
            }
            mixture.weights[k] = T::from(count.max(1)).unwrap_or_else(T::one);
        }
        mixture
    }

    /// Components centered on K distinct random observations.
    fn from_random_points<T: Float, R: Rng + ?Sized>(
        data: DataMatrix<'_, T>,
        num_clusters: usize,
        rng: &mut R,
    ) -> Mixture<T> {
        let n = data.num_data;
        let mut mixture = Mixture::new(num_clusters, data.dimension);
        let (_, global_var) = data.column_moments();

        // Partial Fisher-Yates over the observation indices.
        let mut indices: Vec<usize> = (0..n).collect();
        for k in 0..num_clusters.min(n) {
            let j = rng.random_range(k..n);
            indices.swap(k, j);
            mixture.mean_mut(k).copy_from_slice(data.row(indices[k]));
            mixture.variance_mut(k).copy_from_slice(&global_var);
        }
        mixture
    }

    /// Components copied from caller-supplied parameters.
    fn from_custom<T: Float>(
        params: &CustomParameters<T>,
        num_clusters: usize,
        dimension: usize,
    ) -> Mixture<T> {
        Mixture {
            num_clusters,
            dimension,
            means: params.means.clone(),
            variances: params.sigmas.clone(),
            weights: params.weights.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_parse_modes() {
        assert_eq!("RAND".parse::<Initialization>(), Ok(Initialization::Random));
        assert_eq!("kmeans".parse::<Initialization>(), Ok(Initialization::Random));
        assert_eq!(
            "Points".parse::<Initialization>(),
            Ok(Initialization::RandomPoints)
        );
        assert_eq!("custom".parse::<Initialization>(), Ok(Initialization::Custom));
        assert!("spectral".parse::<Initialization>().is_err());
    }

    #[test]
    fn test_partition_init_weights_follow_group_sizes() {
        let data = vec![0.0, 0.2, 0.4, 10.0];
        let view = DataMatrix::new(&data, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let plan = InitializationPlan::Random {
            kmeans_iterations: 10,
        };
        let m = Initializer::initialize(&plan, view, 2, 1e-6, &mut rng);

        let big = if m.weights[0] > m.weights[1] { 0 } else { 1 };
        assert_relative_eq!(m.weights[big], 0.75, epsilon = 1e-12);
        assert_relative_eq!(m.mean(big)[0], 0.2, epsilon = 1e-12);
        assert_relative_eq!(m.variance(big)[0], 0.08 / 3.0, epsilon = 1e-12);
        // The singleton group is clamped to the lower bound.
        assert_eq!(m.variance(1 - big)[0], 1e-6);
    }

    #[test]
    fn test_random_points_uses_distinct_observations() {
        let data: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let view = DataMatrix::new(&data, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let m = Initializer::initialize(&InitializationPlan::RandomPoints, view, 4, 1e-6, &mut rng);

        let mut means = m.means.clone();
        means.sort_by(|a, b| a.partial_cmp(b).unwrap());
        means.dedup();
        assert_eq!(means.len(), 4);
        assert!(m.weights.iter().all(|&w| (w - 0.25).abs() < 1e-12));
        assert!(m.variances.iter().all(|&v| (v - 8.25).abs() < 1e-12));
    }

    #[test]
    fn test_custom_is_normalized_and_clamped() {
        let plan = InitializationPlan::Custom(CustomParameters {
            means: vec![0.0, 1.0],
            sigmas: vec![1e-9, 2.0],
            weights: vec![2.0, 2.0],
        });
        let data = vec![0.0, 1.0];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let m = Initializer::initialize(&plan, DataMatrix::new(&data, 1), 2, 1e-6, &mut rng);
        assert_eq!(m.means, vec![0.0, 1.0]);
        assert_eq!(m.variances, vec![1e-6, 2.0]);
        assert_eq!(m.weights, vec![0.5, 0.5]);
    }
}
