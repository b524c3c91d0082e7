use std::f64::consts::TAU;

use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::{ensure_finite, ensure_positive, Error, Result};
use crate::waveform::Waveform;

/// Level summary of a waveform for status displays.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaveformStats {
    pub peak: f64,
    pub rms: f64,
}

impl WaveformStats {
    pub fn from_waveform(wave: &Waveform) -> Self {
        let values = wave.values();
        if values.is_empty() {
            return Self::default();
        }
        let peak = values.iter().fold(0.0f64, |acc, &x| acc.max(x.abs()));
        let rms = (values.iter().map(|&x| x * x).sum::<f64>() / values.len() as f64).sqrt();
        Self { peak, rms }
    }
}

/// Periodic Hann window. An exactly periodic sine stays confined to three bins.
fn hann(len: usize) -> impl Iterator<Item = f64> {
    (0..len).map(move |i| 0.5 * (1.0 - (TAU * i as f64 / len as f64).cos()))
}

/// One-sided power spectrum as `(frequency_hz, power)` pairs, DC to Nyquist.
///
/// Samples are Hann-windowed first, so the start-up transient of a causal
/// filter and the jump between the last and first sample do not leak into
/// the upper bins.
pub fn power_spectrum(wave: &Waveform, sample_rate: f64) -> Result<Vec<(f64, f64)>> {
    if wave.is_empty() {
        return Err(Error::EmptyInput {
            stage: "power spectrum",
        });
    }
    let sample_rate = ensure_positive("sample rate", sample_rate)?;
    let n = wave.len();

    let mut buffer: Vec<Complex<f64>> = wave
        .values()
        .iter()
        .zip(hann(n))
        .map(|(&v, w)| Complex::new(v * w, 0.0))
        .collect();
    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buffer);

    let bin_hz = sample_rate / n as f64;
    Ok(buffer
        .iter()
        .take(n / 2 + 1)
        .enumerate()
        .map(|(i, bin)| (i as f64 * bin_hz, bin.norm_sqr()))
        .collect())
}

/// Total spectral power at or above `min_hz`.
pub fn band_energy_above(wave: &Waveform, sample_rate: f64, min_hz: f64) -> Result<f64> {
    let min_hz = ensure_finite("band edge", min_hz)?;
    Ok(power_spectrum(wave, sample_rate)?
        .into_iter()
        .filter(|&(freq, _)| freq >= min_hz)
        .map(|(_, power)| power)
        .sum())
}
