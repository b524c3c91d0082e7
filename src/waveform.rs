//! Sampled time axes and the waveforms laid over them.
//!
//! A [`Waveform`] is produced fresh by every recompute cycle and handed to
//! consumers by shared reference. Stages that transform it build a new one
//! instead of editing samples in place.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_positive, Error, Result};

/// Largest axis [`TimeAxis::new`] accepts.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Evenly spaced sample times over the half-open range `[start, stop)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "AxisFields"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    start: f64,
    stop: f64,
    step: f64,
}

impl TimeAxis {
    pub fn new(start: f64, stop: f64, step: f64) -> Result<Self> {
        let start = ensure_finite("start time", start)?;
        let stop = ensure_finite("stop time", stop)?;
        let step = ensure_positive("time step", step)?;
        if stop <= start {
            return Err(Error::invalid(
                "stop time",
                stop,
                "must be later than the start time",
            ));
        }
        let samples = ((stop - start) / step).ceil();
        if samples > MAX_SAMPLES as f64 {
            return Err(Error::invalid(
                "time step",
                step,
                "gives more samples than the axis can hold",
            ));
        }
        Ok(Self { start, stop, step })
    }

    /// Axis starting at zero, sampled at `sample_rate` for `duration` seconds.
    pub fn from_rate(sample_rate: f64, duration: f64) -> Result<Self> {
        let sample_rate = ensure_positive("sample rate", sample_rate)?;
        Self::new(0.0, duration, 1.0 / sample_rate)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn sample_rate(&self) -> f64 {
        1.0 / self.step
    }

    /// Number of samples, `ceil((stop - start) / step)`, never below one.
    ///
    /// The tiny bias keeps representation error in `step` (0.01 is not exact
    /// in binary) from adding a phantom sample at the end.
    pub fn len(&self) -> usize {
        let span = (self.stop - self.start) / self.step;
        (span - 1e-9).ceil().max(1.0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample times computed from the index, so error does not accumulate.
    pub fn points(&self) -> Vec<f64> {
        (0..self.len())
            .map(|i| self.start + i as f64 * self.step)
            .collect()
    }
}

impl Default for TimeAxis {
    /// 0.0 to 10.0 seconds in 0.01 s steps: 1000 samples at 100 Hz.
    fn default() -> Self {
        Self {
            start: 0.0,
            stop: 10.0,
            step: 0.01,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct AxisFields {
    start: f64,
    stop: f64,
    step: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<AxisFields> for TimeAxis {
    type Error = Error;

    fn try_from(fields: AxisFields) -> Result<Self> {
        Self::new(fields.start, fields.stop, fields.step)
    }
}

/// Ordered `(time, value)` samples.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "WaveformColumns"))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Waveform {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl Waveform {
    /// Pair sample times with values. Both columns must be the same length.
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if times.len() != values.len() {
            return Err(Error::invalid(
                "waveform values",
                values.len() as f64,
                "length must match the number of sample times",
            ));
        }
        Ok(Self { times, values })
    }

    /// Same time column, new values. Used by stages that preserve length.
    pub(crate) fn with_values(&self, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.times.len());
        Self {
            times: self.times.clone(),
            values,
        }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate samples as `(time, value)` pairs, the shape chart widgets take.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct WaveformColumns {
    times: Vec<f64>,
    values: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<WaveformColumns> for Waveform {
    type Error = Error;

    fn try_from(columns: WaveformColumns) -> Result<Self> {
        Self::new(columns.times, columns.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_axis_has_one_thousand_points() {
        let axis = TimeAxis::default();
        assert_eq!(axis.len(), 1000);

        let points = axis.points();
        assert_eq!(points.len(), 1000);
        assert_eq!(points[0], 0.0);
        assert!((points[999] - 9.99).abs() < 1e-9);
        assert!((axis.sample_rate() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_length_rounds_partial_steps_up() {
        let axis = TimeAxis::new(0.0, 1.0, 0.3).unwrap();
        assert_eq!(axis.points().len(), 4);
    }

    #[test]
    fn test_axis_rejects_inverted_range_and_zero_step() {
        assert!(TimeAxis::new(1.0, 0.0, 0.1).is_err());
        assert!(TimeAxis::new(0.0, 1.0, 0.0).is_err());
        assert!(TimeAxis::from_rate(0.0, 10.0).is_err());
    }

    #[test]
    fn test_axis_shorter_than_one_step_keeps_first_sample() {
        let axis = TimeAxis::from_rate(1.0, 1e-10).unwrap();
        assert_eq!(axis.len(), 1);
        assert_eq!(axis.points(), vec![0.0]);
    }

    #[test]
    fn test_axis_rejects_oversized_span() {
        assert!(matches!(
            TimeAxis::new(0.0, 1e300, 1.0),
            Err(Error::InvalidParameter { name: "time step", .. })
        ));
        assert!(TimeAxis::from_rate(100.0, 1e300).is_err());
        assert!(TimeAxis::new(-f64::MAX, f64::MAX, 1.0).is_err());

        let largest = TimeAxis::new(0.0, MAX_SAMPLES as f64, 1.0).unwrap();
        assert_eq!(largest.len(), MAX_SAMPLES);
    }

    #[test]
    fn test_from_rate_matches_explicit_axis() {
        let axis = TimeAxis::from_rate(100.0, 10.0).unwrap();
        assert_eq!(axis.len(), TimeAxis::default().len());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_goes_through_validation() {
        use serde::de::value::{Error as DeError, MapDeserializer};

        let axis: MapDeserializer<'_, _, DeError> =
            MapDeserializer::new(vec![("start", 0.0), ("stop", 1.0), ("step", 0.0)].into_iter());
        assert!(TimeAxis::deserialize(axis).is_err());

        let axis: MapDeserializer<'_, _, DeError> =
            MapDeserializer::new(vec![("start", 0.0), ("stop", 1.0), ("step", 0.5)].into_iter());
        assert_eq!(TimeAxis::deserialize(axis).unwrap().len(), 2);

        let wave: MapDeserializer<'_, _, DeError> = MapDeserializer::new(
            vec![("times", vec![0.0, 1.0]), ("values", vec![0.0])].into_iter(),
        );
        assert!(Waveform::deserialize(wave).is_err());
    }

    #[test]
    fn test_waveform_rejects_mismatched_columns() {
        assert!(Waveform::new(vec![0.0, 1.0], vec![0.0]).is_err());

        let wave = Waveform::new(vec![0.0, 0.5], vec![1.0, 2.0]).unwrap();
        let pairs: Vec<_> = wave.samples().collect();
        assert_eq!(pairs, vec![(0.0, 1.0), (0.5, 2.0)]);
    }
}
