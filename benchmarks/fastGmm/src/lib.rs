//! Reproducible synthetic data for the GMM benchmarks.
//!
//! All generators return row-major observation buffers and are driven by a
//! seeded `StdRng`, so every benchmark run fits exactly the same data.

use rand::prelude::*;
use rand_distr::{Normal, Uniform};

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Isotropic Gaussian blobs with centers drawn uniformly in `[-range, range]^dim`.
pub fn generate_blobs(
    n: usize,
    dim: usize,
    clusters: usize,
    stddev: f64,
    range: f64,
    seed: u64,
) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let center_dist = Uniform::new(-range, range).unwrap();
    let noise = Normal::new(0.0, stddev).unwrap();

    let centers: Vec<f64> = (0..clusters * dim)
        .map(|_| center_dist.sample(&mut rng))
        .collect();

    let mut data = Vec::with_capacity(n * dim);
    for _ in 0..n {
        let c = rng.random_range(0..clusters.max(1));
        for j in 0..dim {
            data.push(centers[c * dim + j] + noise.sample(&mut rng));
        }
    }
    data
}

/// Blobs whose per-dimension spread differs by orders of magnitude.
pub fn generate_anisotropic(n: usize, dim: usize, clusters: usize, seed: u64) -> Vec<f64> {
    let mut data = generate_blobs(n, dim, clusters, 1.0, 10.0, seed);
    for row in data.chunks_exact_mut(dim) {
        for (j, v) in row.iter_mut().enumerate() {
            *v *= 10f64.powi(j as i32 % 4 - 1);
        }
    }
    data
}

/// Uniform noise with a few tight clusters hidden in it (5% of points).
pub fn generate_noisy(n: usize, dim: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let background = Uniform::new(-50.0, 50.0).unwrap();
    let tight = Normal::new(0.0, 0.05).unwrap();

    let mut data = Vec::with_capacity(n * dim);
    for i in 0..n {
        let clustered = i % 20 == 0;
        let anchor = (i % 3) as f64 * 20.0 - 20.0;
        for _ in 0..dim {
            let v = if clustered {
                anchor + tight.sample(&mut rng)
            } else {
                background.sample(&mut rng)
            };
            data.push(v);
        }
    }
    data
}
