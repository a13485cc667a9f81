use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use exact_pca::{Pca, Transformer};
use ndarray::{Array, Array2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

fn generate_data(n_samples: usize, n_features: usize) -> Array2<f64> {
    Array::random((n_samples, n_features), Uniform::new(0., 10.))
}

fn bench_pca_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pca_fit");

    for &(n_samples, n_features) in [(100, 50), (500, 100), (100, 200)].iter() {
        let data = generate_data(n_samples, n_features);
        group.throughput(Throughput::Elements((n_samples * n_features) as u64));
        group.bench_with_input(
            BenchmarkId::new("fit", format!("{}x{}", n_samples, n_features)),
            &data,
            |b, data_matrix| {
                b.iter_with_setup(Pca::new, |mut pca| {
                    pca.fit(data_matrix.view()).unwrap();
                });
            },
        );
    }
    group.finish();
}

fn bench_pca_fit_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pca_fit_transform");

    for &(n_samples, n_features) in [(100, 50), (500, 100), (100, 200)].iter() {
        let data = generate_data(n_samples, n_features);
        let n_components = 10.min(n_features);
        group.throughput(Throughput::Elements((n_samples * n_features) as u64));
        group.bench_with_input(
            BenchmarkId::new("fit_transform", format!("{}x{}", n_samples, n_features)),
            &data,
            |b, data_matrix| {
                b.iter_with_setup(
                    || Pca::with_components(n_components).unwrap(),
                    |mut pca| pca.fit_transform(data_matrix.view()).unwrap(),
                );
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_pca_fit, bench_pca_fit_transform);
criterion_main!(benches);
