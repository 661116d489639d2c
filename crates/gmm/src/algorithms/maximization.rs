//! Maximization step.
//!
//! ## Purpose
//!
//! This module re-estimates means, diagonal variances and mixing weights
//! from the responsibilities produced by the E-step.
//!
//! ## Design notes
//!
//! * **Two phases**: accumulation of the weighted sufficient statistics is a
//!   pure reduction over observations and can be replaced by a parallel
//!   pass; finalization (division, clamping, empty components) is serial.
//! * **Centered scatter**: the accumulation walks the observations twice,
//!   first for the weighted means and then for the squared deviations about
//!   them. Raw second moments (`E[x^2] - mu^2`) cancel catastrophically once
//!   the means are large relative to the spread, most visibly in `f32`.
//!   The first pass sums offsets from the first observation for the same
//!   reason.
//! * **Empty components**: a component whose responsibility mass is at most
//!   `N * epsilon` is reseeded at the observation with the lowest
//!   log-likelihood under the previous mixture (ties to the lowest index,
//!   one observation per component). It takes the global data variance and
//!   the mass of a single observation.
//!
//! ## Key concepts
//!
//! ```text
//! mass_k = sum_i r_ik
//! mu_kd  = x_0d + sum_i r_ik (x_id - x_0d) / mass_k
//! var_kd = max(sum_i r_ik (x_id - mu_kd)^2 / mass_k, sigma_lower_bound)
//! w_k    = mass_k / N
//! ```
//!
//! ## Invariants
//!
//! * Weights sum to one after the step.
//! * Every variance entry is at least the lower bound.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::buffer::{DataMatrix, SufficientStats};
use crate::primitives::mixture::Mixture;

// ============================================================================
// Accumulation
// ============================================================================

/// Serial accumulation of the weighted sufficient statistics.
///
/// Resets `stats` before accumulating.
pub fn accumulate_pass<T: Float>(
    data: DataMatrix<'_, T>,
    posteriors: &[T],
    num_clusters: usize,
    stats: &mut SufficientStats<T>,
) {
    let d = data.dimension;
    stats.reset(num_clusters, d);
    if num_clusters == 0 || d == 0 {
        return;
    }

    if data.num_data == 0 {
        return;
    }
    let origin = data.row(0);

    for (x, row) in data.rows().zip(posteriors.chunks_exact(num_clusters)) {
        for (k, &r) in row.iter().enumerate() {
            if r == T::zero() {
                continue;
            }
            stats.mass[k] = stats.mass[k] + r;
            add_offsets(r, x, origin, &mut stats.sum[k * d..(k + 1) * d]);
        }
    }

    for k in 0..num_clusters {
        let range = k * d..(k + 1) * d;
        weighted_means(
            stats.mass[k],
            &stats.sum[range.clone()],
            origin,
            &mut stats.mean[range],
        );
    }

    for (x, row) in data.rows().zip(posteriors.chunks_exact(num_clusters)) {
        for (k, &r) in row.iter().enumerate() {
            if r == T::zero() {
                continue;
            }
            let range = k * d..(k + 1) * d;
            add_scatter(r, x, &stats.mean[range.clone()], &mut stats.scatter[range]);
        }
    }
}

/// Add `r * (x - origin)` to `sum`, element-wise.
#[inline]
pub fn add_offsets<T: Float>(r: T, x: &[T], origin: &[T], sum: &mut [T]) {
    for ((s, &xj), &oj) in sum.iter_mut().zip(x).zip(origin) {
        *s = *s + r * (xj - oj);
    }
}

/// `mean = origin + sum / mass`, left at zero for a massless component.
#[inline]
pub fn weighted_means<T: Float>(mass: T, sum: &[T], origin: &[T], mean: &mut [T]) {
    if !(mass > T::zero()) {
        return;
    }
    for ((m, &s), &oj) in mean.iter_mut().zip(sum).zip(origin) {
        *m = oj + s / mass;
    }
}

/// Add `r * (x - mean)^2` to `scatter`, element-wise.
#[inline]
pub fn add_scatter<T: Float>(r: T, x: &[T], mean: &[T], scatter: &mut [T]) {
    for ((sc, &xj), &mj) in scatter.iter_mut().zip(x).zip(mean) {
        let dev = xj - mj;
        *sc = *sc + r * dev * dev;
    }
}

// ============================================================================
// Finalization
// ============================================================================

/// Re-estimate `mixture` from accumulated statistics.
///
/// `row_log_likelihoods` are the per-observation log-likelihoods under the
/// mixture that produced the responsibilities; they rank candidates for
/// reseeding empty components. Returns the number of reseeded components.
pub fn maximization_step<T: Float>(
    data: DataMatrix<'_, T>,
    stats: &SufficientStats<T>,
    row_log_likelihoods: &[T],
    sigma_lower_bound: T,
    mixture: &mut Mixture<T>,
) -> usize {
    let n = data.num_data;
    let d = data.dimension;
    let num_data = T::from(n).unwrap_or_else(T::one);
    let empty_threshold = num_data * T::epsilon();

    let mut empty = Vec::new();
    for k in 0..mixture.num_clusters {
        let mass = stats.mass[k];
        if !(mass > empty_threshold) {
            empty.push(k);
            continue;
        }
        let start = k * d;
        for j in 0..d {
            mixture.means[start + j] = stats.mean[start + j];
            mixture.variances[start + j] = stats.scatter[start + j] / mass;
        }
        mixture.weights[k] = mass / num_data;
    }

    if !empty.is_empty() {
        reseed_empty(data, row_log_likelihoods, &empty, mixture);
    }

    mixture.clamp_variances(sigma_lower_bound);
    mixture.normalize_weights();
    empty.len()
}

/// Move each empty component onto a poorly explained observation.
fn reseed_empty<T: Float>(
    data: DataMatrix<'_, T>,
    row_log_likelihoods: &[T],
    empty: &[usize],
    mixture: &mut Mixture<T>,
) {
    let n = data.num_data;
    let (_, global_var) = data.column_moments();
    let single = T::one() / T::from(n).unwrap_or_else(T::one);
    let mut taken = Vec::with_capacity(empty.len());

    for &k in empty {
        let mut worst: Option<usize> = None;
        for (i, &ll) in row_log_likelihoods.iter().enumerate() {
            if taken.contains(&i) {
                continue;
            }
            match worst {
                Some(w) if !(ll < row_log_likelihoods[w]) => {}
                _ => worst = Some(i),
            }
        }
        // More empty components than observations: reuse the worst overall.
        let i = worst.unwrap_or(0);
        taken.push(i);

        tracing::debug!(component = k, observation = i, "reseeding empty component");
        mixture.mean_mut(k).copy_from_slice(data.row(i));
        mixture.variance_mut(k).copy_from_slice(&global_var);
        mixture.weights[k] = single;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hard_assignment_gives_group_moments() {
        let data = vec![0.0, 2.0, 10.0, 12.0, 14.0];
        let view = DataMatrix::new(&data, 1);
        let post = vec![
            1.0, 0.0, //
            1.0, 0.0, //
            0.0, 1.0, //
            0.0, 1.0, //
            0.0, 1.0,
        ];
        let mut stats = SufficientStats::default();
        accumulate_pass(view, &post, 2, &mut stats);
        let mut m = Mixture::new(2, 1);
        let reseeded = maximization_step(view, &stats, &[0.0; 5], 1e-6, &mut m);

        assert_eq!(reseeded, 0);
        assert_relative_eq!(m.means[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(m.means[1], 12.0, epsilon = 1e-12);
        assert_relative_eq!(m.variances[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(m.variances[1], 8.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(m.weights[0], 0.4, epsilon = 1e-12);
        assert_relative_eq!(m.weights[1], 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_offset_f32_variance_keeps_precision() {
        // Spread of 0.05 around 1000: raw second moments cancel in f32.
        let data: Vec<f32> = (0..200)
            .map(|i| 1000.0 + if i % 2 == 0 { 0.05 } else { -0.05 })
            .collect();
        let view = DataMatrix::new(&data, 1);
        let post = vec![1.0_f32; 200];
        let mut stats = SufficientStats::default();
        accumulate_pass(view, &post, 1, &mut stats);
        let mut m = Mixture::new(1, 1);
        maximization_step(view, &stats, &[0.0; 200], 1e-6, &mut m);

        assert_relative_eq!(m.means[0], 1000.0, max_relative = 1e-6);
        assert_relative_eq!(m.variances[0], 0.0025, max_relative = 1e-2);
    }

    #[test]
    fn test_collapsed_component_is_clamped() {
        let data = vec![3.0, 3.0, 3.0];
        let view = DataMatrix::new(&data, 1);
        let post = vec![1.0; 3];
        let mut stats = SufficientStats::default();
        accumulate_pass(view, &post, 1, &mut stats);
        let mut m = Mixture::new(1, 1);
        maximization_step(view, &stats, &[0.0; 3], 1e-4, &mut m);
        assert_eq!(m.variances[0], 1e-4);
        assert_eq!(m.weights[0], 1.0);
    }

    #[test]
    fn test_empty_component_reseeded_at_worst_observation() {
        let data = vec![0.0, 1.0, 2.0, 50.0];
        let view = DataMatrix::new(&data, 1);
        let post = vec![
            1.0, 0.0, //
            1.0, 0.0, //
            1.0, 0.0, //
            1.0, 0.0,
        ];
        let lls = [-1.0, -0.5, -1.0, -40.0];
        let mut stats = SufficientStats::default();
        accumulate_pass(view, &post, 2, &mut stats);
        let mut m = Mixture::new(2, 1);
        let reseeded = maximization_step(view, &stats, &lls, 1e-6, &mut m);

        assert_eq!(reseeded, 1);
        assert_eq!(m.means[1], 50.0);
        let (_, global_var) = view.column_moments();
        assert_relative_eq!(m.variances[1], global_var[0], epsilon = 1e-12);
        assert_relative_eq!(m.weights[0] + m.weights[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(m.weights[1], 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_multiple_empty_components_take_distinct_observations() {
        let data = vec![0.0, 1.0, 2.0];
        let view = DataMatrix::new(&data, 1);
        let post = vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
        let lls = [-3.0, -1.0, -3.0];
        let mut stats = SufficientStats::default();
        accumulate_pass(view, &post, 3, &mut stats);
        let mut m = Mixture::new(3, 1);
        let reseeded = maximization_step(view, &stats, &lls, 1e-6, &mut m);

        assert_eq!(reseeded, 2);
        // Ties go to the lowest index first.
        assert_eq!(m.means[1], 0.0);
        assert_eq!(m.means[2], 2.0);
    }
}
