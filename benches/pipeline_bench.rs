//! Benchmarks for the signal pipeline.
//!
//! Run with: cargo bench
//!
//! A full cycle (generate, smooth, publish) runs on every slider change, so
//! these numbers bound how responsive the UI can be.
//!
//! Benchmark groups:
//!   - dsp/*         Oscillator and filter stages on their own
//!   - controller/*  One complete recompute cycle

use criterion::{criterion_group, criterion_main};

mod controller;
mod dsp;

/// Sample counts around the default 1000-point axis.
pub const SAMPLE_COUNTS: &[usize] = &[250, 1000, 4000];

criterion_group!(
    benches,
    dsp::bench_oscillator,
    dsp::bench_filter,
    controller::bench_cycle,
);
criterion_main!(benches);
