use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_positive, Error, Result};
use crate::waveform::Waveform;

/*
Harmonic with Noise
===================

The source signal is a single sinusoid

    clean(t) = A * sin(2π f t + φ)

  A   amplitude, peak deviation from zero
  f   frequency in Hz (cycles per second)
  φ   phase offset in radians, shifts the wave along the time axis

Optionally, every sample gets an independent Gaussian draw added on top:

    noisy(t) = clean(t) + n,   n ~ Normal(mean, sqrt(variance))

Variance rather than standard deviation is the knob the user turns, so the
square root is taken here. A variance of zero degenerates to a constant
offset of `mean`; a non-zero mean lifts the whole trace.

Each call draws fresh noise from the oscillator's generator, so two noisy
renders with identical parameters differ. With noise off the output depends
only on the parameters and the time points.
*/

/// Harmonic shape and additive noise settings for one render.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicSpec {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
    pub noise_mean: f64,
    pub noise_variance: f64,
    pub show_noise: bool,
}

impl HarmonicSpec {
    /// Check the domain every render relies on.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("amplitude", self.amplitude)?;
        ensure_positive("frequency", self.frequency)?;
        ensure_finite("phase", self.phase)?;
        ensure_finite("noise mean", self.noise_mean)?;
        let variance = ensure_finite("noise variance", self.noise_variance)?;
        if variance < 0.0 {
            return Err(Error::invalid(
                "noise variance",
                variance,
                "must not be negative",
            ));
        }
        Ok(())
    }

    /// Noise-free value at time `t`.
    #[inline]
    pub fn clean_at(&self, t: f64) -> f64 {
        self.amplitude * (TAU * self.frequency * t + self.phase).sin()
    }
}

/// Render `spec` at every time point, drawing noise from `rng` when enabled.
pub fn harmonic_with_noise<R: Rng + ?Sized>(
    time_points: &[f64],
    spec: &HarmonicSpec,
    rng: &mut R,
) -> Result<Waveform> {
    spec.validate()?;

    let mut values: Vec<f64> = time_points.iter().map(|&t| spec.clean_at(t)).collect();

    if spec.show_noise {
        let normal = Normal::new(spec.noise_mean, spec.noise_variance.sqrt())
            .map_err(|_| Error::invalid("noise variance", spec.noise_variance, "not a valid normal"))?;
        for value in values.iter_mut() {
            *value += normal.sample(rng);
        }
    }

    Waveform::new(time_points.to_vec(), values)
}

/// Signal source owning the random generator used for noise.
pub struct HarmonicOscillator {
    rng: StdRng,
}

impl HarmonicOscillator {
    /// Generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible noise sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self, time_points: &[f64], spec: &HarmonicSpec) -> Result<Waveform> {
        harmonic_with_noise(time_points, spec, &mut self.rng)
    }
}

impl Default for HarmonicOscillator {
    fn default() -> Self {
        Self::new()
    }
}
