#![cfg(feature = "dev")]
use approx::{assert_abs_diff_eq, assert_relative_eq};
use fastGmm::prelude::*;
use ndarray::{Array1, Array2, ShapeBuilder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn blobs(n_per_cluster: usize, seed: u64) -> Vec<f64> {
    let centers = [[-4.0, 0.0, 1.0], [4.0, 1.0, -1.0], [0.0, 6.0, 0.0]];
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 0.8).unwrap();
    let mut data = Vec::with_capacity(centers.len() * n_per_cluster * 3);
    for c in &centers {
        for _ in 0..n_per_cluster {
            for &cj in c {
                data.push(cj + noise.sample(&mut rng));
            }
        }
    }
    data
}

fn offset_blobs(n_per_cluster: usize, seed: u64) -> Vec<f64> {
    blobs(n_per_cluster, seed)
        .into_iter()
        .map(|v| 1.0e6 + v * 0.01)
        .collect()
}

fn fit_with(data: &[f64], mode: Multithreading) -> GmmResult<f64> {
    Gmm::new()
        .num_clusters(3)
        .num_repetitions(2)
        .seed(7)
        .multithreading(mode)
        .return_responsibilities()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(data, 3)
        .unwrap()
}

#[test]
fn test_serial_and_parallel_agree() {
    let data = blobs(400, 1);

    let serial = fit_with(&data, Serial);
    let parallel = fit_with(&data, Parallel);

    assert_relative_eq!(
        serial.log_likelihood,
        parallel.log_likelihood,
        max_relative = 1e-9
    );
    assert_eq!(serial.best_repetition, parallel.best_repetition);
    for (a, b) in serial.means.iter().zip(&parallel.means) {
        assert_relative_eq!(*a, *b, epsilon = 1e-9, max_relative = 1e-9);
    }
    for (rs, rp) in serial.repetitions.iter().zip(&parallel.repetitions) {
        assert_eq!(rs.iterations, rp.iterations);
    }
}

#[test]
fn test_parallel_is_default() {
    let data = blobs(50, 2);

    let builder = Gmm::new().num_clusters(3).adapter(Batch);
    assert_eq!(builder.base.multithreading, Parallel);

    let explicit = Gmm::<f64>::new().multithreading(Serial).adapter(Batch);
    assert_eq!(explicit.base.multithreading, Serial);

    let result = builder.build().unwrap().fit(&data, 3).unwrap();
    let total: f64 = result.weights.iter().sum();
    assert_abs_diff_eq!(total, 1.0, epsilon = 1e-6);
    assert!(result.variances.iter().all(|&v| v >= 1e-6));
}

#[test]
fn test_ndarray_matrix_input() {
    let flat = blobs(30, 3);
    let matrix = Array2::from_shape_vec((90, 3), flat.clone()).unwrap();

    let from_matrix = fit_with_input(&matrix);
    let from_vec = fit_with_input(&flat);
    assert_eq!(from_matrix.means, from_vec.means);
    assert_eq!(from_matrix.num_data, 90);
}

fn fit_with_input<I: GmmInput<f64> + ?Sized>(data: &I) -> GmmResult<f64> {
    Gmm::new()
        .num_clusters(3)
        .seed(5)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(data, 3)
        .unwrap()
}

#[test]
fn test_ndarray_vector_input() {
    let data = Array1::from_vec(vec![0.0, 0.1, 0.2, 8.0, 8.1, 8.2]);
    let result = Gmm::new()
        .num_clusters(2)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data, 1)
        .unwrap();
    let mut means = result.means.clone();
    means.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_abs_diff_eq!(means[0], 0.1, epsilon = 1e-6);
    assert_abs_diff_eq!(means[1], 8.1, epsilon = 1e-6);
}

#[test]
fn test_matrix_shape_errors() {
    let model = || Gmm::<f64>::new().num_clusters(2).adapter(Batch).build().unwrap();

    let column_major: Array2<f64> = Array2::zeros((4, 2).f());
    assert!(matches!(
        model().fit(&column_major, 2),
        Err(GmmError::InvalidArgument(_))
    ));

    let matrix = Array2::from_shape_vec((2, 3), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    assert_eq!(
        model().fit(&matrix, 2),
        Err(GmmError::InvalidDimension {
            what: "dimension",
            expected: 3,
            got: 2
        })
    );
}

#[test]
fn test_validation_is_shared_with_base() {
    assert!(matches!(
        Gmm::<f64>::new().adapter(Batch).build(),
        Err(GmmError::InvalidArgument(_))
    ));
    assert_eq!(
        Gmm::<f64>::new()
            .num_clusters(2)
            .seed(1)
            .seed(2)
            .adapter(Batch)
            .build()
            .unwrap_err(),
        GmmError::DuplicateParameter { parameter: "seed" }
    );
}

#[test]
fn test_f32_parallel_fit() {
    let data: Vec<f32> = blobs(40, 4).into_iter().map(|v| v as f32).collect();
    let result = Gmm::new()
        .num_clusters(3)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data, 3)
        .unwrap();
    let total: f32 = result.weights.iter().sum();
    assert_abs_diff_eq!(total, 1.0, epsilon = 1e-4);
}

#[test]
fn test_serial_and_parallel_agree_far_from_origin() {
    let data = offset_blobs(300, 6);

    let serial = fit_with(&data, Serial);
    let parallel = fit_with(&data, Parallel);

    assert_eq!(serial.means, parallel.means);
    assert_eq!(serial.variances, parallel.variances);
    for rep in &parallel.repetitions {
        assert!(rep.is_monotone(1e-9), "trace not monotone: {:?}", rep.trace);
    }
    // Per-axis spread is 0.8 * 0.01.
    for &v in &parallel.variances {
        assert_relative_eq!(v, 6.4e-5, max_relative = 0.3);
    }
}

#[test]
fn test_dynamic_fit_runs_parallel_passes() {
    let data: Vec<f32> = blobs(60, 8)
        .into_iter()
        .map(|v| (1000.0 + v * 0.1) as f32)
        .collect();
    let fit = |mode: Multithreading| {
        DynamicGmm::new()
            .num_clusters(3)
            .seed(2)
            .multithreading(mode)
            .fit(NumericArray::F32(&data), 3)
            .unwrap()
    };

    let parallel = fit(Parallel);
    let serial = fit(Serial);
    assert_eq!(parallel.data_type(), DataType::F32);
    assert_eq!(parallel, serial);
    assert!(parallel.log_likelihood().is_finite());
}
