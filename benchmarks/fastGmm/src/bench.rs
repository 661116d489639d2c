//! GMM benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Scalability (observations and dimension)
//! - Model size (number of components, repetitions)
//! - Initialization modes
//! - Pathological cases (anisotropic scales, uniform background noise)
//!
//! For serial execution, use `FASTGMM_THREADING=serial cargo bench`.
//! For parallel execution, use `FASTGMM_THREADING=parallel cargo bench`.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fastGmm::prelude::*;
use gmm_benchmarks::{generate_anisotropic, generate_blobs, generate_noisy};
use std::env;
use std::hint::black_box;

// ============================================================================
// Helper Functions
// ============================================================================

fn get_config() -> (Multithreading, &'static str) {
    match env::var("FASTGMM_THREADING").ok().as_deref() {
        Some("serial") => (Serial, "serial"),
        _ => (Parallel, "parallel"),
    }
}

fn fit(data: &[f64], dim: usize, k: usize, mode: Multithreading) -> GmmResult<f64> {
    Gmm::new()
        .num_clusters(k)
        .max_iterations(50)
        .seed(42)
        .multithreading(mode)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(black_box(data), dim)
        .unwrap()
}

// ============================================================================
// Benchmark Functions
// ============================================================================

fn bench_scalability(c: &mut Criterion) {
    let (mode, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("scalability_{}", mode_name));
    group.sample_size(20);

    for size in [1_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(size as u64));
        let data = generate_blobs(size, 8, 5, 1.0, 10.0, 42);

        group.bench_with_input(BenchmarkId::new("batch", size), &size, |b, _| {
            b.iter(|| fit(&data, 8, 5, mode))
        });
    }
    group.finish();
}

fn bench_dimension(c: &mut Criterion) {
    let (mode, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("dimension_{}", mode_name));
    group.sample_size(20);

    for dim in [2, 16, 64] {
        let data = generate_blobs(5_000, dim, 4, 1.0, 10.0, 7);
        group.bench_with_input(BenchmarkId::new("batch", dim), &dim, |b, &dim| {
            b.iter(|| fit(&data, dim, 4, mode))
        });
    }
    group.finish();
}

fn bench_components(c: &mut Criterion) {
    let (mode, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("components_{}", mode_name));
    group.sample_size(20);

    let data = generate_blobs(10_000, 4, 16, 1.0, 20.0, 11);
    for k in [2, 8, 32] {
        group.bench_with_input(BenchmarkId::new("batch", k), &k, |b, &k| {
            b.iter(|| fit(&data, 4, k, mode))
        });
    }
    group.finish();
}

fn bench_initialization(c: &mut Criterion) {
    let (mode, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("initialization_{}", mode_name));
    group.sample_size(20);

    let data = generate_blobs(10_000, 4, 6, 1.0, 10.0, 13);
    for init in [Random, RandomPoints] {
        group.bench_with_input(BenchmarkId::new("batch", init), &init, |b, &init| {
            b.iter(|| {
                Gmm::new()
                    .num_clusters(6)
                    .num_repetitions(3)
                    .initialization(init)
                    .multithreading(mode)
                    .adapter(Batch)
                    .build()
                    .unwrap()
                    .fit(black_box(&data), 4)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let (mode, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("pathological_{}", mode_name));
    group.sample_size(20);

    let anisotropic = generate_anisotropic(10_000, 8, 4, 17);
    group.bench_function("anisotropic", |b| {
        b.iter(|| fit(&anisotropic, 8, 4, mode))
    });

    let noisy = generate_noisy(10_000, 3, 19);
    group.bench_function("uniform_background", |b| {
        b.iter(|| fit(&noisy, 3, 4, mode))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_scalability,
    bench_dimension,
    bench_components,
    bench_initialization,
    bench_pathological,
);

criterion_main!(benches);
