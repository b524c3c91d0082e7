//! Benchmarks for harmonic generation with and without noise.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use harmonic_lab::{HarmonicOscillator, Parameters};

use crate::SAMPLE_COUNTS;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let noisy = Parameters::default().harmonic();
    let clean = Parameters {
        show_noise: false,
        ..Parameters::default()
    }
    .harmonic();

    for &size in SAMPLE_COUNTS {
        let points: Vec<f64> = (0..size).map(|i| i as f64 * 0.01).collect();
        let mut osc = HarmonicOscillator::seeded(0);

        group.bench_with_input(BenchmarkId::new("clean", size), &size, |b, _| {
            b.iter(|| osc.generate(black_box(&points), black_box(&clean)))
        });
        group.bench_with_input(BenchmarkId::new("noisy", size), &size, |b, _| {
            b.iter(|| osc.generate(black_box(&points), black_box(&noisy)))
        });
    }

    group.finish();
}
