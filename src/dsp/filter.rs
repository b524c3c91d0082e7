use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_positive, Error, Result};
use crate::waveform::Waveform;

/*
| variant        | constructed by         | cutoff used | phase     | edges               |
| -------------- | ---------------------- | ----------- | --------- | ------------------- |
| Butterworth LP | ButterworthLowPass     | yes         | lags      | start-up transient  |
| moving average | MovingAverage::new(w)  | no          | centred   | zero-padded window  |

Butterworth Low-Pass as Cascaded Sections
=========================================

An order-N Butterworth low-pass is maximally flat in the pass band and rolls
off at 6N dB per octave past the cutoff. Rather than one long recursion with
N+1 taps (numerically touchy as N grows), the transfer function is split into
second-order sections, one per conjugate pole pair:

    Q_k = 1 / (2 sin(π (k + 1/2) / N)),   k = 0 .. N/2 - 1

and, for odd N, one extra first-order section for the real pole. Each section
is discretised with the bilinear transform, pre-warped so the -3 dB point
lands exactly on the cutoff:

    K = tan(π fc / fs)

Running the sections in series from zero state is the same causal recursion
as filtering with the full (b, a) polynomial pair. Output lags the input and
the first few samples carry a start-up transient; both are expected.

The normalized cutoff fc / (fs / 2) must sit strictly inside (0, 1). At or
above Nyquist the pre-warp blows up, so the design is refused instead.
*/

/// Settings the filter stage reads on every cycle.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSettings {
    pub cutoff_hz: f64,
    pub sample_rate: f64,
    pub order: usize,
}

impl FilterSettings {
    pub fn nyquist(&self) -> f64 {
        0.5 * self.sample_rate
    }

    /// The order, checked to be at least 1.
    pub fn checked_order(&self) -> Result<usize> {
        if self.order == 0 {
            return Err(Error::invalid("filter order", 0.0, "must be at least 1"));
        }
        Ok(self.order)
    }

    /// Cutoff as a fraction of Nyquist, checked to lie in (0, 1).
    pub fn normalized_cutoff(&self) -> Result<f64> {
        let sample_rate = ensure_positive("sample rate", self.sample_rate)?;
        let cutoff = ensure_positive("cutoff", self.cutoff_hz)?;
        let nyquist = 0.5 * sample_rate;
        if cutoff >= nyquist {
            return Err(Error::UnsupportedFilterConfiguration {
                cutoff_hz: cutoff,
                nyquist_hz: nyquist,
            });
        }
        Ok(cutoff / nyquist)
    }
}

/// Which smoothing stage the pipeline runs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    #[default]
    Butterworth,
    MovingAverage,
}

/// A length-preserving smoothing stage.
///
/// Implementations read `input` and return a new waveform over the same time
/// column; they never modify their input.
pub trait Smoother {
    fn smooth(&self, input: &Waveform, settings: &FilterSettings) -> Result<Waveform>;

    /// Short label for status displays.
    fn name(&self) -> &'static str;
}

impl<S: Smoother + ?Sized> Smoother for Box<S> {
    fn smooth(&self, input: &Waveform, settings: &FilterSettings) -> Result<Waveform> {
        (**self).smooth(input, settings)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Build the smoother for `kind`. `window` only applies to the moving average.
pub fn smoother(kind: FilterKind, window: usize) -> Result<Box<dyn Smoother>> {
    Ok(match kind {
        FilterKind::Butterworth => Box::new(ButterworthLowPass),
        FilterKind::MovingAverage => Box::new(MovingAverage::new(window)?),
    })
}

/// One first- or second-order recursive section, transposed direct form II.
#[derive(Debug, Clone)]
struct Section {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    z1: f64, // first delay register
    z2: f64, // second delay register
}

impl Section {
    fn first_order(k: f64) -> Self {
        let norm = 1.0 / (1.0 + k);
        Self {
            b0: k * norm,
            b1: k * norm,
            b2: 0.0,
            a1: (k - 1.0) * norm,
            a2: 0.0,
            z1: 0.0,
            z2: 0.0,
        }
    }

    fn second_order(k: f64, q: f64) -> Self {
        let k2 = k * k;
        let norm = 1.0 / (1.0 + k / q + k2);
        Self {
            b0: k2 * norm,
            b1: 2.0 * k2 * norm,
            b2: k2 * norm,
            a1: 2.0 * (k2 - 1.0) * norm,
            a2: (1.0 - k / q + k2) * norm,
            z1: 0.0,
            z2: 0.0,
        }
    }

    #[inline]
    fn next_sample(&mut self, x: f64) -> f64 {
        let y = self.b0 * x + self.z1;
        self.z1 = self.b1 * x - self.a1 * y + self.z2;
        self.z2 = self.b2 * x - self.a2 * y;
        y
    }
}

/// Q of each conjugate pole pair for an order-`order` Butterworth.
pub fn butterworth_q(order: usize) -> Vec<f64> {
    (0..order / 2)
        .map(|k| 1.0 / (2.0 * (PI * (k as f64 + 0.5) / order as f64).sin()))
        .collect()
}

/// Causal Butterworth low-pass, designed fresh from the settings each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButterworthLowPass;

impl ButterworthLowPass {
    fn design(settings: &FilterSettings) -> Result<Vec<Section>> {
        let order = settings.checked_order()?;
        let normalized = settings.normalized_cutoff()?;
        let k = (0.5 * PI * normalized).tan();

        let mut sections: Vec<Section> = butterworth_q(order)
            .into_iter()
            .map(|q| Section::second_order(k, q))
            .collect();
        if order % 2 == 1 {
            sections.push(Section::first_order(k));
        }
        Ok(sections)
    }

    /// Magnitude response at `freq_hz`, evaluated on the unit circle.
    pub fn gain_at(settings: &FilterSettings, freq_hz: f64) -> Result<f64> {
        let freq_hz = ensure_finite("frequency", freq_hz)?;
        let w = 2.0 * PI * freq_hz / settings.sample_rate;
        let (c1, s1) = (w.cos(), -w.sin());
        let (c2, s2) = ((2.0 * w).cos(), -(2.0 * w).sin());

        let gain = Self::design(settings)?
            .iter()
            .map(|s| {
                let num_re = s.b0 + s.b1 * c1 + s.b2 * c2;
                let num_im = s.b1 * s1 + s.b2 * s2;
                let den_re = 1.0 + s.a1 * c1 + s.a2 * c2;
                let den_im = s.a1 * s1 + s.a2 * s2;
                (num_re.hypot(num_im)) / (den_re.hypot(den_im))
            })
            .product();
        Ok(gain)
    }
}

impl Smoother for ButterworthLowPass {
    fn smooth(&self, input: &Waveform, settings: &FilterSettings) -> Result<Waveform> {
        if input.is_empty() {
            return Err(Error::EmptyInput {
                stage: "butterworth low-pass",
            });
        }
        let mut sections = Self::design(settings)?;

        let values = input
            .values()
            .iter()
            .map(|&x| {
                sections
                    .iter_mut()
                    .fold(x, |sample, section| section.next_sample(sample))
            })
            .collect();

        Ok(input.with_values(values))
    }

    fn name(&self) -> &'static str {
        "Butterworth"
    }
}

/// Width of the uniform kernel when none is configured.
pub const DEFAULT_WINDOW: usize = 10;

/// Uniform-kernel convolution, centred so output aligns with input.
///
/// Output sample `i` averages `input[i - w/2 ..= i + (w-1)/2]` (integer
/// division), treating samples past either end as zero. Edge values are
/// therefore pulled towards zero.
#[derive(Debug, Clone, Copy)]
pub struct MovingAverage {
    window: usize,
}

impl MovingAverage {
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(Error::invalid(
                "moving average window",
                0.0,
                "must be at least 1",
            ));
        }
        Ok(Self { window })
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}

impl Smoother for MovingAverage {
    fn smooth(&self, input: &Waveform, _settings: &FilterSettings) -> Result<Waveform> {
        if input.is_empty() {
            return Err(Error::EmptyInput {
                stage: "moving average",
            });
        }
        let x = input.values();
        let n = x.len();
        let ahead = (self.window - 1) / 2;
        let behind = self.window - 1 - ahead;
        let scale = 1.0 / self.window as f64;

        // Prefix sums turn each window into one subtraction.
        let mut prefix = Vec::with_capacity(n + 1);
        prefix.push(0.0);
        for &v in x {
            let last = prefix[prefix.len() - 1];
            prefix.push(last + v);
        }

        let values = (0..n)
            .map(|i| {
                let lo = i.saturating_sub(behind);
                let hi = (i + ahead + 1).min(n);
                (prefix[hi] - prefix[lo]) * scale
            })
            .collect();

        Ok(input.with_values(values))
    }

    fn name(&self) -> &'static str {
        "Moving average"
    }
}
