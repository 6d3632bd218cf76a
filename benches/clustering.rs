use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quakemap::cluster::{build_clusters, initialize_centroids};
use quakemap::Catalog;
use rand::prelude::*;

fn bench_build_clusters(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans");

    // Synthetic epicenters spread over the globe.
    let mut rng = StdRng::seed_from_u64(42);
    let n = 5000;
    let k = 6;

    let catalog: Catalog = (0..n)
        .map(|_| {
            vec![
                rng.random_range(-180.0..180.0),
                rng.random_range(-90.0..90.0),
            ]
        })
        .collect();
    let centroids = initialize_centroids(k, &catalog, &mut rng).unwrap();

    group.bench_function("build_clusters_n5000_k6_p7", |b| {
        b.iter(|| {
            build_clusters(k, black_box(centroids.clone()), black_box(&catalog), 7).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_build_clusters);
criterion_main!(benches);
