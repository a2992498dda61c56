//! Benchmarks for the fixed-basis MSM engine: construction cost and query
//! latency across MSM lengths and window widths.

use ark_bn254::{Fr, G1Affine, G1Projective};
use ark_ff::UniformRand;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fixed_base_msm::FixedBaseMsm;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

fn generate_bases(n: usize, rng: &mut ChaCha20Rng) -> Vec<G1Affine> {
    (0..n)
        .map(|_| G1Projective::rand(rng).into_affine())
        .collect()
}

fn bench_construction(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(12345);
    let bases = generate_bases(256, &mut rng);

    let mut group = c.benchmark_group("construction");
    group.sample_size(10);

    group.bench_function("default_hot_policy", |b| {
        b.iter(|| FixedBaseMsm::<G1Projective>::new(&bases, 8).unwrap())
    });
    group.bench_function("hot_prefix_5_wide", |b| {
        b.iter(|| FixedBaseMsm::<G1Projective>::with_hot_prefix(&bases, 8, 5, 16).unwrap())
    });

    group.finish();
}

fn bench_msm(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(12345);
    let bases = generate_bases(256, &mut rng);
    let scalars: Vec<Fr> = (0..256).map(|_| Fr::rand(&mut rng)).collect();

    for window_bits in [4usize, 8] {
        let engine = FixedBaseMsm::<G1Projective>::new(&bases, window_bits).unwrap();

        let mut group = c.benchmark_group(format!("msm_window_{window_bits}"));
        group.sample_size(10);
        for k in [1usize, 2, 4, 8, 16, 32, 64, 128, 256] {
            group.throughput(Throughput::Elements(k as u64));
            group.bench_with_input(BenchmarkId::new("length", k), &k, |b, &k| {
                b.iter(|| engine.msm(&scalars[..k]).unwrap())
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_construction, bench_msm);
criterion_main!(benches);
