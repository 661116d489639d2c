//! K-means partitioning used to seed the mixture.
//!
//! ## Purpose
//!
//! This module partitions the observations into K groups with k-means++
//! seeding followed by a bounded number of Lloyd iterations. The groups are
//! consumed by the randomized initializer, which turns each group into an
//! initial Gaussian component.
//!
//! ## Design notes
//!
//! * **Seeding**: k-means++ picks each new center with probability
//!   proportional to its squared distance to the nearest chosen center.
//! * **Bounded**: Lloyd iterations stop early when assignments no longer
//!   change; the final assignment always matches the returned centers.
//! * **Deterministic ties**: an observation equidistant from several centers
//!   goes to the lowest-indexed one.
//!
//! ## Invariants
//!
//! * `assignments[i] < k` for every observation.
//! * `counts` sums to N.
//! * An empty group keeps its previous center.
//!
//! ## Non-goals
//!
//! * This is not a general-purpose k-means implementation (no inertia
//!   reporting, no restarts of its own).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;
use rand::Rng;

// Internal dependencies
use crate::math::gaussian::squared_distance;
use crate::primitives::buffer::{DataMatrix, VecExt};

/// Outcome of a k-means partitioning.
#[derive(Debug, Clone)]
pub struct Partition<T> {
    /// Group centers, component-major (K * D).
    pub centers: Vec<T>,

    /// Group index of every observation (N).
    pub assignments: Vec<usize>,

    /// Number of observations in each group (K).
    pub counts: Vec<usize>,

    /// Lloyd iterations performed.
    pub iterations: usize,
}

/// Choose K initial centers with k-means++ seeding.
pub fn kmeans_plus_plus<T: Float, R: Rng + ?Sized>(
    data: DataMatrix<'_, T>,
    num_clusters: usize,
    rng: &mut R,
) -> Vec<T> {
    let n = data.num_data;
    let d = data.dimension;
    let mut centers = Vec::with_capacity(num_clusters * d);
    if n == 0 || num_clusters == 0 {
        return centers;
    }

    let first = rng.random_range(0..n);
    centers.extend_from_slice(data.row(first));

    // Squared distance of each observation to its nearest chosen center.
    let mut nearest: Vec<f64> = data
        .rows()
        .map(|x| squared_distance(x, data.row(first)).to_f64().unwrap_or(0.0))
        .collect();

    for _ in 1..num_clusters {
        let total: f64 = nearest.iter().sum();
        let next = if total > 0.0 && total.is_finite() {
            let mut target = rng.random::<f64>() * total;
            let mut chosen = n - 1;
            for (i, &w) in nearest.iter().enumerate() {
                if w <= 0.0 {
                    continue;
                }
                if target < w {
                    chosen = i;
                    break;
                }
                target -= w;
            }
            // Rounding may leave `chosen` on an already-selected point.
            if nearest[chosen] <= 0.0 {
                chosen = nearest
                    .iter()
                    .rposition(|&w| w > 0.0)
                    .unwrap_or(chosen);
            }
            chosen
        } else {
            // Every observation already coincides with a center.
            rng.random_range(0..n)
        };

        let center = data.row(next);
        centers.extend_from_slice(center);
        for (w, x) in nearest.iter_mut().zip(data.rows()) {
            let dist = squared_distance(x, center).to_f64().unwrap_or(0.0);
            if dist < *w {
                *w = dist;
            }
        }
    }

    centers
}

/// Assign every observation to its nearest center; returns whether any
/// assignment changed.
fn assign<T: Float>(
    data: DataMatrix<'_, T>,
    centers: &[T],
    num_clusters: usize,
    assignments: &mut [usize],
) -> bool {
    let d = data.dimension;
    let mut changed = false;
    for (slot, x) in assignments.iter_mut().zip(data.rows()) {
        let mut best = 0;
        let mut best_dist = T::infinity();
        for k in 0..num_clusters {
            let dist = squared_distance(x, &centers[k * d..(k + 1) * d]);
            if dist < best_dist {
                best_dist = dist;
                best = k;
            }
        }
        if *slot != best {
            *slot = best;
            changed = true;
        }
    }
    changed
}

/// Recompute centers as group means; empty groups keep their center.
fn update_centers<T: Float>(
    data: DataMatrix<'_, T>,
    assignments: &[usize],
    centers: &mut [T],
    counts: &mut Vec<usize>,
    num_clusters: usize,
) {
    let d = data.dimension;
    counts.assign(num_clusters, 0);
    for &a in assignments {
        counts[a] += 1;
    }

    for k in 0..num_clusters {
        if counts[k] > 0 {
            centers[k * d..(k + 1) * d].fill(T::zero());
        }
    }
    for (&a, x) in assignments.iter().zip(data.rows()) {
        for (c, &xi) in centers[a * d..(a + 1) * d].iter_mut().zip(x) {
            *c = *c + xi;
        }
    }
    for k in 0..num_clusters {
        if counts[k] > 0 {
            let count = T::from(counts[k]).unwrap_or_else(T::one);
            for c in centers[k * d..(k + 1) * d].iter_mut() {
                *c = *c / count;
            }
        }
    }
}

/// Partition the observations into `num_clusters` groups.
pub fn partition<T: Float, R: Rng + ?Sized>(
    data: DataMatrix<'_, T>,
    num_clusters: usize,
    max_iterations: usize,
    rng: &mut R,
) -> Partition<T> {
    let n = data.num_data;
    let mut centers = kmeans_plus_plus(data, num_clusters, rng);
    let mut assignments = Vec::with_capacity(n);
    assignments.assign(n, usize::MAX);
    let mut counts = Vec::with_capacity(num_clusters);

    let mut iterations = 0;
    while iterations < max_iterations {
        let changed = assign(data, &centers, num_clusters, &mut assignments);
        update_centers(data, &assignments, &mut centers, &mut counts, num_clusters);
        iterations += 1;
        if !changed {
            break;
        }
    }

    // Final assignment against the final centers.
    assign(data, &centers, num_clusters, &mut assignments);
    counts.assign(num_clusters, 0);
    for &a in &assignments {
        counts[a] += 1;
    }

    Partition {
        centers,
        assignments,
        counts,
        iterations,
    }
}
