use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mersenne_hash::cs::hashing::{
    find_collision_free_hash_with_rng, DomainWidth, MersennePrime, UniversalHashFamily,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn bench_reduce(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let inputs: Vec<u128> = (0..4096).map(|_| rng.gen_range(0..1u128 << 62)).collect();
    let p = MersennePrime::M31;

    c.bench_function("mersenne_reduce_m31", |b| {
        b.iter(|| {
            inputs
                .iter()
                .fold(0u64, |acc, &x| acc ^ p.reduce(black_box(x)))
        })
    });
    c.bench_function("modulo_m31", |b| {
        let prime = p.prime() as u128;
        b.iter(|| {
            inputs
                .iter()
                .fold(0u64, |acc, &x| acc ^ (black_box(x) % prime) as u64)
        })
    });
}

fn bench_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("universal_hash");
    let keys: Vec<u64> = (0..10_000).collect();
    group.throughput(Throughput::Elements(keys.len() as u64));

    for domain in DomainWidth::ALL {
        let hash = UniversalHashFamily::for_domain(domain, domain.bits() - 1)
            .unwrap()
            .seeded_sample(7);
        group.bench_with_input(BenchmarkId::from_parameter(domain), &keys, |b, keys| {
            b.iter(|| keys.iter().fold(0u64, |acc, &k| acc ^ hash.hash(black_box(k))))
        });
    }
    group.finish();
}

fn bench_collision_search(c: &mut Criterion) {
    let keys: [u64; 8] = [4, 123, 65, 3456, 7645, 1231546, 7647, 12];
    c.bench_function("collision_search_1000_trials", |b| {
        b.iter(|| {
            let rng = StdRng::seed_from_u64(3);
            find_collision_free_hash_with_rng(32, 3, black_box(&keys), 1000, rng)
                .unwrap()
                .count()
        })
    });
}

criterion_group!(benches, bench_reduce, bench_hash, bench_collision_search);
criterion_main!(benches);
