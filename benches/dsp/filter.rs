//! Benchmarks for the smoothing stages.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use harmonic_lab::dsp::filter::{ButterworthLowPass, MovingAverage};
use harmonic_lab::{FilterSettings, Smoother, Waveform};

use crate::SAMPLE_COUNTS;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");
    let settings = FilterSettings {
        cutoff_hz: 1.0,
        sample_rate: 100.0,
        order: 5,
    };

    for &size in SAMPLE_COUNTS {
        // Sawtooth-like ramp as input
        let times: Vec<f64> = (0..size).map(|i| i as f64 / 100.0).collect();
        let values: Vec<f64> = (0..size)
            .map(|i| ((i % 50) as f64 / 50.0) * 2.0 - 1.0)
            .collect();
        let input = Waveform::new(times, values).unwrap();

        group.bench_with_input(BenchmarkId::new("butterworth", size), &size, |b, _| {
            b.iter(|| ButterworthLowPass.smooth(black_box(&input), black_box(&settings)))
        });

        let average = MovingAverage::default();
        group.bench_with_input(BenchmarkId::new("moving_average", size), &size, |b, _| {
            b.iter(|| average.smooth(black_box(&input), black_box(&settings)))
        });
    }

    group.finish();
}
