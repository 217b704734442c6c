//! Benchmark: tiled wavefront edit distance on long random inputs.
//!
//! Run with:
//! `cargo bench`

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use levwave::{WavefrontBuilder, WavefrontEngine};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_dna(rng: &mut StdRng, len: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx]
        })
        .collect()
}

fn bench_random_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("wavefront_distance_random");

    for &len in &[4_096usize, 16_384, 65_536] {
        group.bench_function(format!("len_{len}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(42);
                    let s = random_dna(&mut rng, len);
                    let t = random_dna(&mut rng, len);
                    (s, t)
                },
                |(s, t)| {
                    let mut engine: WavefrontEngine = WavefrontEngine::new();
                    engine.init(s.len(), t.len()).unwrap();
                    criterion::black_box(engine.compute(&s, &t).unwrap());
                },
                BatchSize::PerIteration,
            )
        });
    }

    group.finish();
}

fn bench_pruning_payoff(c: &mut Criterion) {
    let mut group = c.benchmark_group("wavefront_distance_near_identical");

    // Sparse substitutions keep W* tiny, so pruning should retract most of
    // each wavefront; the unpruned run is the yardstick.
    for pruning in [true, false] {
        group.bench_function(format!("len_16384_pruning_{pruning}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(7);
                    let s = random_dna(&mut rng, 16_384);
                    let mut t = s.clone();
                    for _ in 0..32 {
                        let idx = rng.gen_range(0..t.len());
                        t[idx] = b'N';
                    }
                    (s, t)
                },
                |(s, t)| {
                    let mut engine: WavefrontEngine =
                        WavefrontBuilder::new().with_pruning(pruning).build();
                    engine.init(s.len(), t.len()).unwrap();
                    criterion::black_box(engine.compute(&s, &t).unwrap());
                },
                BatchSize::PerIteration,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_random_pairs, bench_pruning_payoff);
criterion_main!(benches);
