use bhv_core::{majority, rehash, threshold, Bhv};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_hamming(c: &mut Criterion) {
    let v1 = Bhv::from_seed("benchmark_vector_1");
    let v2 = Bhv::from_seed("benchmark_vector_2");

    c.bench_function("bhv_hamming", |b| b.iter(|| black_box(v1.hamming(&v2))));
}

fn bench_bind(c: &mut Criterion) {
    let v1 = Bhv::from_seed("benchmark_vector_1");
    let v2 = Bhv::from_seed("benchmark_vector_2");

    c.bench_function("bhv_bind", |b| b.iter(|| black_box(v1.bind(&v2))));
}

fn bench_majority_regimes(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xBE);
    for n in [3usize, 9, 65, 300] {
        let xs: Vec<Bhv> = (0..n).map(|_| Bhv::random(&mut rng)).collect();
        c.bench_function(&format!("bhv_majority_{n}"), |b| {
            b.iter(|| black_box(majority(&mut rng, &xs)))
        });
    }
}

fn bench_threshold(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xEF);
    let xs: Vec<Bhv> = (0..100).map(|_| Bhv::random(&mut rng)).collect();
    c.bench_function("bhv_threshold_100", |b| {
        b.iter(|| black_box(threshold(&mut rng, &xs, 42)))
    });
}

fn bench_biased_random(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xAB);
    c.bench_function("bhv_random_biased", |b| {
        b.iter(|| black_box(bhv_core::random(&mut rng, 0.3)))
    });
}

fn bench_rehash(c: &mut Criterion) {
    let v = Bhv::from_seed("benchmark_rehash");
    c.bench_function("bhv_rehash", |b| b.iter(|| black_box(rehash(&v))));
}

criterion_group!(
    benches,
    bench_hamming,
    bench_bind,
    bench_majority_regimes,
    bench_threshold,
    bench_biased_random,
    bench_rehash
);
criterion_main!(benches);
