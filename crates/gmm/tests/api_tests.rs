#![cfg(feature = "dev")]
//! Tests for the high-level GMM API.
//!
//! These tests verify the builder pattern, configuration options, and complete
//! fitting workflows including:
//! - Builder construction and validation
//! - Initialization modes and their precedence
//! - Fitting scenarios on well-understood data
//! - Result invariants (weights, variances, responsibilities)
//!
//! ## Test Organization
//!
//! 1. **Scenarios** - Known clusters, custom starts, restarts
//! 2. **Boundaries** - K = N, zero iterations
//! 3. **Invariants** - Normalization, variance floor, monotone traces
//! 4. **Validation** - Errors raised before EM starts
//! 5. **Initialization Precedence** - Custom arrays vs requested mode

use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use gmm::internals::api::{Batch, GmmBuilder as Gmm, GmmResult};
use gmm::internals::algorithms::initialization::Initialization;
use gmm::internals::evaluation::convergence::ConvergenceStatus;
use gmm::internals::primitives::errors::GmmError;
use gmm::internals::primitives::threading::Multithreading;

// ============================================================================
// Helper Functions
// ============================================================================

/// Row-major samples from axis-aligned Gaussian clusters.
fn sample_clusters(
    centers: &[[f64; 2]],
    stddev: f64,
    per_cluster: usize,
    seed: u64,
) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, stddev).unwrap();
    let mut data = Vec::with_capacity(centers.len() * per_cluster * 2);
    for c in centers {
        for _ in 0..per_cluster {
            data.push(c[0] + noise.sample(&mut rng));
            data.push(c[1] + noise.sample(&mut rng));
        }
    }
    data
}

fn assert_invariants(result: &GmmResult<f64>, sigma_lower_bound: f64) {
    let total: f64 = result.weights.iter().sum();
    assert_abs_diff_eq!(total, 1.0, epsilon = 1e-6);
    assert!(result.weights.iter().all(|&w| w > 0.0));
    assert!(result.variances.iter().all(|&v| v >= sigma_lower_bound));
    if let Some(resp) = &result.responsibilities {
        assert_eq!(resp.len(), result.num_data * result.num_clusters);
        for row in resp.chunks_exact(result.num_clusters) {
            assert_abs_diff_eq!(row.iter().sum::<f64>(), 1.0, epsilon = 1e-6);
        }
    }
}

// ============================================================================
// Scenario Tests
// ============================================================================

/// Test the canonical two-cluster scenario.
///
/// Verifies that two tight, well-separated pairs are recovered and that each
/// observation is fully attributed to its own cluster.
#[test]
fn test_two_tight_clusters() {
    let eps: f64 = 1e-3;
    let data = vec![0.0, 0.0, eps, -eps, 10.0, 10.0, 10.0 + eps, 10.0 - eps];

    let result = Gmm::new()
        .num_clusters(2)
        .max_iterations(100)
        .num_repetitions(1)
        .initialization(Initialization::Random)
        .return_responsibilities()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data, 2)
        .unwrap();

    let low = if result.mean(0)[0] < result.mean(1)[0] { 0 } else { 1 };
    let high = 1 - low;
    for j in 0..2 {
        assert!((result.mean(low)[j] - 0.0).abs() < 0.5);
        assert!((result.mean(high)[j] - 10.0).abs() < 0.5);
    }

    for i in 0..2 {
        assert!(result.responsibility_row(i).unwrap()[low] > 0.999);
        assert!(result.responsibility_row(i + 2).unwrap()[high] > 0.999);
    }
    assert_invariants(&result, 1e-6);
}

/// Test custom initialization at the generating parameters.
///
/// Verifies that EM starts near the optimum and converges in few iterations.
#[test]
fn test_custom_init_at_truth_converges_quickly() {
    let data = sample_clusters(&[[-5.0, 0.0], [5.0, 0.0]], 1.0, 200, 17);

    let result = Gmm::new()
        .num_clusters(2)
        .init_means(vec![-5.0, 0.0, 5.0, 0.0])
        .init_sigmas(vec![1.0; 4])
        .init_weights(vec![0.5, 0.5])
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data, 2)
        .unwrap();

    let rep = &result.repetitions[0];
    assert_eq!(rep.status, ConvergenceStatus::Converged);
    assert!(rep.iterations < 30, "took {} iterations", rep.iterations);
    let first = rep.trace[0];
    assert!((result.log_likelihood - first) / result.log_likelihood.abs() < 0.01);
    assert!(result.log_likelihood >= first);
    assert_invariants(&result, 1e-6);
}

/// Test that the best of several repetitions is returned.
///
/// Verifies that the reported log-likelihood dominates every repetition.
#[test]
fn test_best_repetition_dominates() {
    let mut data = sample_clusters(&[[0.0, 0.0]], 1.0, 60, 3);
    data.extend_from_slice(&[25.0, 25.0, 25.5, 24.5, 24.5, 25.5]);

    let result = Gmm::new()
        .num_clusters(2)
        .num_repetitions(5)
        .initialization(Initialization::RandomPoints)
        .seed(11)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data, 2)
        .unwrap();

    assert_eq!(result.repetitions.len(), 5);
    for rep in &result.repetitions {
        assert!(result.log_likelihood >= rep.log_likelihood);
    }
    assert_eq!(
        result.repetitions[result.best_repetition].log_likelihood,
        result.log_likelihood
    );
    assert_invariants(&result, 1e-6);
}

/// Test that the same seed reproduces the same fit.
#[test]
fn test_seed_is_reproducible() {
    let data = sample_clusters(&[[0.0, 0.0], [4.0, 4.0], [8.0, 0.0]], 0.7, 40, 5);
    let fit = || {
        Gmm::new()
            .num_clusters(3)
            .num_repetitions(2)
            .seed(123)
            .adapter(Batch)
            .build()
            .unwrap()
            .fit(&data, 2)
            .unwrap()
    };
    assert_eq!(fit(), fit());
}

/// Test single precision end to end.
#[test]
fn test_f32_fit() {
    let data: Vec<f32> = vec![0.0, 0.1, 0.2, 5.0, 5.1, 5.2];
    let result = Gmm::new()
        .num_clusters(2)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data, 1)
        .unwrap();
    let total: f32 = result.weights.iter().sum();
    assert_abs_diff_eq!(total, 1.0, epsilon = 1e-5);
    assert!(result.log_likelihood.is_finite());
}

// ============================================================================
// Boundary Tests
// ============================================================================

/// Test K equal to the number of observations.
///
/// Verifies that every component collapses onto one point and its variance
/// is held at the lower bound.
#[test]
fn test_one_component_per_observation() {
    let data = vec![0.0, 1.0, 2.0, 3.0];
    let result = Gmm::new()
        .num_clusters(4)
        .sigma_lower_bound(1e-4)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data, 1)
        .unwrap();

    assert!(result.variances.iter().all(|&v| v == 1e-4));
    let mut means = result.means.clone();
    means.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(means, vec![0.0, 1.0, 2.0, 3.0]);
    assert_invariants(&result, 1e-4);
}

/// Test a zero iteration cap.
///
/// Verifies that the initial mixture and its log-likelihood are returned.
#[test]
fn test_zero_iterations_returns_initial_mixture() {
    let data = vec![0.0, 0.5, 1.0, 9.0, 9.5, 10.0];
    let result = Gmm::new()
        .num_clusters(2)
        .max_iterations(0)
        .init_means(vec![1.0, 8.0])
        .init_sigmas(vec![2.0, 3.0])
        .init_weights(vec![1.0, 3.0])
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data, 1)
        .unwrap();

    assert_eq!(result.means, vec![1.0, 8.0]);
    assert_eq!(result.variances, vec![2.0, 3.0]);
    assert_abs_diff_eq!(result.weights[0], 0.25, epsilon = 1e-15);
    assert_abs_diff_eq!(result.weights[1], 0.75, epsilon = 1e-15);
    assert_eq!(result.iterations(), 0);
    assert_eq!(result.repetitions[0].trace, vec![result.log_likelihood]);
    assert_eq!(
        result.repetitions[0].status,
        ConvergenceStatus::MaxIterationsReached
    );
}

// ============================================================================
// Invariant Tests
// ============================================================================

/// Test that the log-likelihood never decreases within a repetition.
#[test]
fn test_log_likelihood_is_monotone() {
    let data = sample_clusters(&[[0.0, 0.0], [3.0, 3.0]], 1.0, 150, 29);
    let result = Gmm::new()
        .num_clusters(2)
        .num_repetitions(3)
        .tolerance(1e-10)
        .return_responsibilities()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data, 2)
        .unwrap();

    for rep in &result.repetitions {
        assert_eq!(rep.reseeded, 0);
        assert!(rep.is_monotone(1e-9), "trace not monotone: {:?}", rep.trace);
        assert_eq!(rep.trace.len(), rep.iterations + 1);
    }
    assert_invariants(&result, 1e-6);
}

/// Component `(mean, variance)` rows ordered by the first mean coordinate.
fn components_by_mean(means: &[f64], variances: &[f64], dimension: usize) -> Vec<(Vec<f64>, Vec<f64>)> {
    let mut rows: Vec<(Vec<f64>, Vec<f64>)> = means
        .chunks_exact(dimension)
        .zip(variances.chunks_exact(dimension))
        .map(|(m, v)| (m.to_vec(), v.to_vec()))
        .collect();
    rows.sort_by(|a, b| a.0[0].partial_cmp(&b.0[0]).unwrap());
    rows
}

/// Test monotonicity on data far from the origin.
///
/// Verifies that variances stay accurate when the means dwarf the spread.
#[test]
fn test_log_likelihood_is_monotone_far_from_origin() {
    let data = sample_clusters(&[[1.0e7, 1.0e7], [1.0e7 + 4.0, 1.0e7 + 4.0]], 0.5, 150, 31);
    let result = Gmm::new()
        .num_clusters(2)
        .num_repetitions(2)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data, 2)
        .unwrap();

    for rep in &result.repetitions {
        assert!(rep.is_monotone(1e-9), "trace not monotone: {:?}", rep.trace);
    }
    assert!(result.converged());
    for (_, variances) in components_by_mean(&result.means, &result.variances, 2) {
        for v in variances {
            assert!((v - 0.25).abs() < 0.1, "variance {v} far from 0.25");
        }
    }
}

/// Test single precision on clusters around 1000.
///
/// Verifies:
/// - The trace is monotone and the fit converges
/// - Means, variances and log-likelihood agree with double precision
#[test]
fn test_f32_offset_clusters_match_f64() {
    let wide = sample_clusters(&[[1000.0, 1000.0], [1001.0, 1001.0]], 0.05, 100, 37);
    let narrow: Vec<f32> = wide.iter().map(|&v| v as f32).collect();
    let data: Vec<f64> = narrow.iter().map(|&v| f64::from(v)).collect();

    let single = Gmm::new()
        .num_clusters(2)
        .seed(3)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&narrow, 2)
        .unwrap();
    let double = Gmm::new()
        .num_clusters(2)
        .seed(3)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data, 2)
        .unwrap();

    let rep = &single.repetitions[0];
    assert!(rep.is_monotone(1e-4), "trace not monotone: {:?}", rep.trace);
    assert_eq!(rep.status, ConvergenceStatus::Converged);
    assert!(double.converged());

    let widen = |v: &[f32]| v.iter().map(|&x| f64::from(x)).collect::<Vec<f64>>();
    let single_rows = components_by_mean(&widen(&single.means), &widen(&single.variances), 2);
    let double_rows = components_by_mean(&double.means, &double.variances, 2);
    for ((ms, vs), (md, vd)) in single_rows.iter().zip(&double_rows) {
        for (a, b) in ms.iter().zip(md) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-3);
        }
        for (a, b) in vs.iter().zip(vd) {
            assert_relative_eq!(*a, *b, max_relative = 0.05);
        }
    }
    assert_relative_eq!(
        f64::from(single.log_likelihood),
        double.log_likelihood,
        max_relative = 1e-3
    );
}

/// Test every initialization mode against the invariants.
#[test]
fn test_invariants_hold_for_all_modes() {
    let data = sample_clusters(&[[0.0, 0.0], [6.0, 1.0], [2.0, 7.0]], 0.8, 30, 41);
    for mode in [Initialization::Random, Initialization::RandomPoints] {
        for threading in [Multithreading::Serial, Multithreading::Parallel] {
            let result = Gmm::new()
                .num_clusters(3)
                .initialization(mode)
                .multithreading(threading)
                .sigma_lower_bound(1e-3)
                .return_responsibilities()
                .adapter(Batch)
                .build()
                .unwrap()
                .fit(&data, 2)
                .unwrap();
            assert_invariants(&result, 1e-3);
            assert!(result.hard_assignment(0).is_some());
        }
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

/// Test data validation errors.
#[test]
fn test_data_validation() {
    let model = || Gmm::<f64>::new().num_clusters(1).adapter(Batch).build().unwrap();

    assert_eq!(model().fit(&[], 2), Err(GmmError::EmptyInput));
    assert!(matches!(
        model().fit(&[1.0, 2.0, 3.0], 2),
        Err(GmmError::InvalidDimension { what: "data", .. })
    ));
    assert!(matches!(
        model().fit(&[1.0, 2.0], 0),
        Err(GmmError::InvalidDimension { what: "dimension", .. })
    ));
    assert!(matches!(
        model().fit(&[1.0, f64::INFINITY], 1),
        Err(GmmError::NonFiniteInput(_))
    ));
}

/// Test parameter validation errors.
#[test]
fn test_parameter_validation() {
    let data = [1.0, 2.0, 3.0];

    assert!(matches!(
        Gmm::<f64>::new().adapter(Batch).build(),
        Err(GmmError::InvalidArgument(_))
    ));
    assert!(matches!(
        Gmm::new()
            .num_clusters(4)
            .adapter(Batch)
            .build()
            .unwrap()
            .fit(&data, 1),
        Err(GmmError::InvalidArgument(_))
    ));
    assert!(matches!(
        Gmm::<f64>::new().num_clusters(0).adapter(Batch).build().unwrap().fit(&data, 1),
        Err(GmmError::InvalidArgument(_))
    ));
    assert!(Gmm::<f64>::new().num_clusters(1).num_repetitions(0).adapter(Batch).build().is_err());
    assert!(Gmm::<f64>::new().num_clusters(1).tolerance(0.0).adapter(Batch).build().is_err());
    assert!(Gmm::<f64>::new()
        .num_clusters(1)
        .sigma_lower_bound(f64::NAN)
        .adapter(Batch)
        .build()
        .is_err());
    assert!(Gmm::<f64>::new()
        .num_clusters(1)
        .max_iterations(100_001)
        .adapter(Batch)
        .build()
        .is_err());
}

/// Test that setting a parameter twice is reported.
#[test]
fn test_duplicate_parameter() {
    let err = Gmm::<f64>::new()
        .num_clusters(2)
        .tolerance(1e-4)
        .tolerance(1e-6)
        .adapter(Batch)
        .build()
        .unwrap_err();
    assert_eq!(err, GmmError::DuplicateParameter { parameter: "tolerance" });
}

/// Test custom parameter validation.
#[test]
fn test_custom_parameter_validation() {
    let data = [0.0, 1.0, 2.0, 3.0];

    let short_means = Gmm::new()
        .num_clusters(2)
        .init_means(vec![0.0])
        .init_sigmas(vec![1.0, 1.0])
        .init_weights(vec![0.5, 0.5])
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data, 1);
    assert_eq!(
        short_means,
        Err(GmmError::InvalidDimension {
            what: "init_means",
            expected: 2,
            got: 1
        })
    );

    let zero_weight = Gmm::new()
        .num_clusters(2)
        .init_means(vec![0.0, 3.0])
        .init_sigmas(vec![1.0, 1.0])
        .init_weights(vec![1.0, 0.0])
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data, 1);
    assert!(matches!(zero_weight, Err(GmmError::InvalidArgument(_))));
}

// ============================================================================
// Initialization Precedence Tests
// ============================================================================

/// Test that incomplete custom parameters are rejected.
#[test]
fn test_incomplete_custom_is_invalid_initialization() {
    let data = [0.0, 1.0, 2.0, 3.0];

    let partial = Gmm::new()
        .num_clusters(2)
        .init_means(vec![0.0, 3.0])
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data, 1);
    assert!(matches!(partial, Err(GmmError::InvalidInitialization(_))));

    let explicit = Gmm::<f64>::new()
        .num_clusters(2)
        .initialization(Initialization::Custom)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data, 1);
    assert!(matches!(explicit, Err(GmmError::InvalidInitialization(_))));
}

/// Test that supplied custom parameters override a requested mode.
#[test]
fn test_custom_arrays_override_requested_mode() {
    let data = [0.0, 1.0, 2.0, 3.0];
    let result = Gmm::new()
        .num_clusters(2)
        .initialization(Initialization::RandomPoints)
        .max_iterations(0)
        .init_means(vec![0.5, 2.5])
        .init_sigmas(vec![1.0, 1.0])
        .init_weights(vec![0.5, 0.5])
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data, 1)
        .unwrap();
    assert_eq!(result.means, vec![0.5, 2.5]);
}

/// Test mode string parsing.
#[test]
fn test_mode_strings() {
    assert_eq!("random".parse::<Initialization>(), Ok(Initialization::Random));
    assert_eq!("randPoints".parse::<Initialization>(), Ok(Initialization::RandomPoints));
    assert_eq!("CUSTOM".parse::<Initialization>(), Ok(Initialization::Custom));
    assert_eq!("Parallel".parse::<Multithreading>(), Ok(Multithreading::Parallel));
    assert_eq!("serial".parse::<Multithreading>(), Ok(Multithreading::Serial));
    assert!(matches!(
        "threads".parse::<Multithreading>(),
        Err(GmmError::InvalidArgument(_))
    ));
}
