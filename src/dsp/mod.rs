//! Signal-processing stages of the pipeline.
//!
//! Each stage is a plain function of its inputs (plus a random generator for
//! noise). None of them hold on to the waveforms they produce, so the
//! controller can recompute from scratch on every parameter change.

/// Peak/RMS statistics and FFT band energy.
pub mod analysis;
/// Butterworth low-pass and moving-average smoothing.
pub mod filter;
/// Harmonic generator with additive Gaussian noise.
pub mod oscillator;

pub use filter::{FilterKind, FilterSettings, Smoother};
pub use oscillator::{HarmonicOscillator, HarmonicSpec};
