// ============================================================================
// Chudnovsky Pi Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Multiplication - The four strategies on equal-length operands
// 2. Newton Solvers - Division and inverse square root
// 3. End to End - Complete computations by digit count and thread budget
// ============================================================================

use chudnovsky_pi::domain::TransformConfig;
use chudnovsky_pi::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

fn operand(len: usize, seed: u32) -> Vec<u32> {
    (0..len as u32)
        .map(|i| (i.wrapping_mul(2_654_435_761) ^ seed) % 1_000_000_000)
        .collect()
}

// ============================================================================
// Multiplication Benchmarks
// ============================================================================

fn benchmark_multipliers(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");
    let config = TransformConfig::default();

    for len in [64usize, 1_024, 16_384] {
        let a = operand(len, 17);
        let b = operand(len, 91);
        group.throughput(Throughput::Elements(len as u64));

        for kind in [
            MultiplierKind::Basecase,
            MultiplierKind::FloatTransform,
            MultiplierKind::ModularTransform,
            MultiplierKind::Adaptive,
        ] {
            // Schoolbook at 16k limbs takes seconds per iteration
            if kind == MultiplierKind::Basecase && len > 1_024 {
                continue;
            }

            let multiplier = create_multiplier(kind, &config);
            if multiplier.prepare(2 * len).is_err() {
                continue;
            }

            group.bench_with_input(
                BenchmarkId::new(multiplier.name(), len),
                &(&a, &b),
                |bench, (a, b)| {
                    bench.iter(|| black_box(multiplier.multiply(a, b)));
                },
            );
        }
    }

    group.finish();
}

// ============================================================================
// Newton Solver Benchmarks
// ============================================================================

fn benchmark_newton(c: &mut Criterion) {
    let mut group = c.benchmark_group("newton");
    let multiplier = create_multiplier(MultiplierKind::Adaptive, &TransformConfig::default());

    for precision in [128usize, 2_048] {
        let _ = multiplier.prepare(2 * (precision + 2));
        let numerator = BigFloat::from_u64(4_270_934_400);
        let denominator = BigFloat::from_u64(13_591_409);

        group.bench_with_input(
            BenchmarkId::new("divide", precision),
            &precision,
            |bench, &precision| {
                bench.iter(|| {
                    black_box(numerator.divide(&denominator, precision, multiplier.as_ref()))
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("inv_sqrt", precision),
            &precision,
            |bench, &precision| {
                bench.iter(|| {
                    black_box(BigFloat::from_u32(10_005).inv_sqrt(precision, multiplier.as_ref()))
                });
            },
        );
    }

    group.finish();
}

// ============================================================================
// End-to-End Benchmarks
// ============================================================================

fn benchmark_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_pi");
    group.sample_size(10);

    for digits in [1_000u64, 10_000, 100_000] {
        for threads in [1usize, 4] {
            let engine = PiEngineBuilder::new(digits)
                .with_threads(threads)
                .build()
                .expect("valid benchmark configuration");

            group.bench_with_input(
                BenchmarkId::new(format!("threads_{}", threads), digits),
                &engine,
                |bench, engine| {
                    bench.iter(|| black_box(engine.compute()));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_multipliers,
    benchmark_newton,
    benchmark_compute
);

criterion_main!(benches);
