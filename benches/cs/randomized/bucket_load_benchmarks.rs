use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mersenne_hash::cs::randomized::bucket_load::{
    load_factor_stats_with_rng, par_load_factor_stats, run_trial, BucketLoadConfig,
};
use rand::{rngs::StdRng, SeedableRng};

fn bench_trial(c: &mut Criterion) {
    let mut group = c.benchmark_group("bucket_trial");
    for &(buckets, capacity) in &[(100usize, 4usize), (100, 16), (1000, 16)] {
        let mut rng = StdRng::seed_from_u64(5);
        group.bench_with_input(
            BenchmarkId::new(format!("{buckets}x{capacity}"), 3),
            &(buckets, capacity),
            |b, &(buckets, capacity)| {
                b.iter(|| run_trial(black_box(buckets), capacity, 3, &mut rng).unwrap())
            },
        );
    }
    group.finish();
}

fn bench_statistics(c: &mut Criterion) {
    let config = BucketLoadConfig::new(100, 16).with_trials(1000);
    c.bench_function("load_stats_sequential", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(9);
            load_factor_stats_with_rng(black_box(&config), &mut rng).unwrap()
        })
    });
    c.bench_function("load_stats_parallel", |b| {
        b.iter(|| par_load_factor_stats(black_box(&config), 9).unwrap())
    });
}

criterion_group!(benches, bench_trial, bench_statistics);
criterion_main!(benches);
