//! Tunable parameters and their slider bounds.
//!
//! [`ParameterState`] is the single source of truth for the pipeline. Every
//! mutation goes through it, and out-of-range input is clamped to the
//! nearest bound the way a slider would pin it.

use std::f64::consts::TAU;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::{FilterSettings, HarmonicSpec};
use crate::error::{ensure_finite, Result};

/// A slider-backed parameter.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    Amplitude,
    Frequency,
    Phase,
    NoiseMean,
    NoiseVariance,
    Cutoff,
}

impl ParamField {
    /// Display order of the controls.
    pub const ALL: [ParamField; 6] = [
        ParamField::Amplitude,
        ParamField::Frequency,
        ParamField::Phase,
        ParamField::NoiseMean,
        ParamField::NoiseVariance,
        ParamField::Cutoff,
    ];

    /// Declared slider range. Values outside it are clamped.
    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            ParamField::Amplitude => 0.1..=10.0,
            ParamField::Frequency => 0.1..=10.0,
            ParamField::Phase => 0.0..=TAU,
            ParamField::NoiseMean => -1.0..=1.0,
            ParamField::NoiseVariance => 0.0..=1.0,
            ParamField::Cutoff => 0.1..=5.0,
        }
    }

    /// Slider increment.
    pub fn step(self) -> f64 {
        match self {
            ParamField::NoiseVariance => 0.01,
            _ => 0.1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParamField::Amplitude => "Amplitude",
            ParamField::Frequency => "Frequency",
            ParamField::Phase => "Phase",
            ParamField::NoiseMean => "Noise Mean",
            ParamField::NoiseVariance => "Noise Variance",
            ParamField::Cutoff => "Cutoff Frequency",
        }
    }

    /// Identifier used on the command line and in logs.
    pub fn key(self) -> &'static str {
        match self {
            ParamField::Amplitude => "amplitude",
            ParamField::Frequency => "frequency",
            ParamField::Phase => "phase",
            ParamField::NoiseMean => "noise_mean",
            ParamField::NoiseVariance => "noise_variance",
            ParamField::Cutoff => "cutoff",
        }
    }

    pub fn clamp(self, value: f64) -> f64 {
        let range = self.range();
        value.clamp(*range.start(), *range.end())
    }

    /// `value` moved by whole slider steps and snapped onto the step grid.
    ///
    /// Not clamped; [`ParameterState::set`] pins the result into range.
    pub fn stepped(self, value: f64, steps: i32) -> f64 {
        let step = self.step();
        ((value / step).round() + f64::from(steps)) * step
    }
}

impl fmt::Display for ParamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ParamField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        ParamField::ALL
            .into_iter()
            .find(|field| field.key() == wanted)
            .ok_or_else(|| format!("unknown parameter `{s}`"))
    }
}

/// Full parameter set for one recompute cycle.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
    pub noise_mean: f64,
    pub noise_variance: f64,
    pub show_noise: bool,
    pub filter_cutoff: f64,
    /// Fixed for the process lifetime.
    pub sample_rate: f64,
    /// Fixed for the process lifetime.
    pub filter_order: usize,
}

impl Parameters {
    pub fn get(&self, field: ParamField) -> f64 {
        match field {
            ParamField::Amplitude => self.amplitude,
            ParamField::Frequency => self.frequency,
            ParamField::Phase => self.phase,
            ParamField::NoiseMean => self.noise_mean,
            ParamField::NoiseVariance => self.noise_variance,
            ParamField::Cutoff => self.filter_cutoff,
        }
    }

    fn slot(&mut self, field: ParamField) -> &mut f64 {
        match field {
            ParamField::Amplitude => &mut self.amplitude,
            ParamField::Frequency => &mut self.frequency,
            ParamField::Phase => &mut self.phase,
            ParamField::NoiseMean => &mut self.noise_mean,
            ParamField::NoiseVariance => &mut self.noise_variance,
            ParamField::Cutoff => &mut self.filter_cutoff,
        }
    }

    pub fn harmonic(&self) -> HarmonicSpec {
        HarmonicSpec {
            amplitude: self.amplitude,
            frequency: self.frequency,
            phase: self.phase,
            noise_mean: self.noise_mean,
            noise_variance: self.noise_variance,
            show_noise: self.show_noise,
        }
    }

    /// Copy with one slider field replaced. Range is not enforced here.
    pub fn with(mut self, field: ParamField, value: f64) -> Self {
        *self.slot(field) = value;
        self
    }

    pub fn filter(&self) -> FilterSettings {
        FilterSettings {
            cutoff_hz: self.filter_cutoff,
            sample_rate: self.sample_rate,
            order: self.filter_order,
        }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            phase: 0.0,
            noise_mean: 0.0,
            noise_variance: 0.1,
            show_noise: true,
            filter_cutoff: 1.0,
            sample_rate: 100.0,
            filter_order: 5,
        }
    }
}

/// Current parameters plus the snapshot `reset` returns to.
#[derive(Debug, Clone)]
pub struct ParameterState {
    current: Parameters,
    initial: Parameters,
}

impl ParameterState {
    /// Record `initial` as the reset snapshot, clamping sliders into range.
    pub fn new(initial: Parameters) -> Self {
        let mut initial = initial;
        for field in ParamField::ALL {
            let slot = initial.slot(field);
            *slot = field.clamp(*slot);
        }
        Self {
            current: initial,
            initial,
        }
    }

    pub fn current(&self) -> &Parameters {
        &self.current
    }

    pub fn initial(&self) -> &Parameters {
        &self.initial
    }

    pub fn get(&self, field: ParamField) -> f64 {
        self.current.get(field)
    }

    pub fn show_noise(&self) -> bool {
        self.current.show_noise
    }

    /// Store `value` clamped to the field's range and return what was stored.
    pub fn set(&mut self, field: ParamField, value: f64) -> Result<f64> {
        let value = ensure_finite(field.key(), value)?;
        let clamped = field.clamp(value);
        *self.current.slot(field) = clamped;
        Ok(clamped)
    }

    pub fn toggle_noise(&mut self) -> bool {
        self.current.show_noise = !self.current.show_noise;
        self.current.show_noise
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

impl Default for ParameterState {
    fn default() -> Self {
        Self::new(Parameters::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_set_clamps_to_declared_bounds() {
        let mut state = ParameterState::default();

        assert_eq!(state.set(ParamField::NoiseVariance, -5.0), Ok(0.0));
        assert_eq!(state.set(ParamField::Amplitude, 50.0), Ok(10.0));
        assert_eq!(state.set(ParamField::Cutoff, 0.0), Ok(0.1));
        assert_eq!(state.set(ParamField::Phase, 7.0), Ok(TAU));
        assert_eq!(state.set(ParamField::NoiseMean, 0.4), Ok(0.4));

        assert_eq!(state.current().noise_variance, 0.0);
        assert_eq!(state.current().amplitude, 10.0);
    }

    #[test]
    fn test_set_rejects_non_finite_input() {
        let mut state = ParameterState::default();
        assert!(matches!(
            state.set(ParamField::Frequency, f64::NAN),
            Err(Error::InvalidParameter { name: "frequency", .. })
        ));
        assert_eq!(state.get(ParamField::Frequency), 1.0);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = ParameterState::default();
        state.set(ParamField::Amplitude, 4.2).unwrap();
        state.set(ParamField::Cutoff, 3.3).unwrap();
        state.set(ParamField::Phase, 1.0).unwrap();
        state.set(ParamField::NoiseVariance, 0.3).unwrap();
        state.toggle_noise();

        state.reset();

        assert_eq!(state.current(), &Parameters::default());
        assert_eq!(state.get(ParamField::Amplitude), 1.0);
        assert_eq!(state.get(ParamField::Cutoff), 1.0);
        assert!(state.show_noise());
    }

    #[test]
    fn test_stepped_snaps_to_grid() {
        let v = ParamField::NoiseVariance.stepped(0.1, 3);
        assert!((v - 0.13).abs() < 1e-12);

        let v = ParamField::Amplitude.stepped(1.04, 1);
        assert!((v - 1.1).abs() < 1e-12);

        let mut state = ParameterState::default();
        let target = ParamField::Amplitude.stepped(state.get(ParamField::Amplitude), -100);
        assert_eq!(state.set(ParamField::Amplitude, target), Ok(0.1));
    }

    #[test]
    fn test_with_replaces_one_field() {
        let params = Parameters::default().with(ParamField::Cutoff, 2.5);
        assert_eq!(params.filter_cutoff, 2.5);
        assert_eq!(params.amplitude, 1.0);
    }

    #[test]
    fn test_toggle_noise_flips_flag() {
        let mut state = ParameterState::default();
        assert!(!state.toggle_noise());
        assert!(state.toggle_noise());
    }

    #[test]
    fn test_initial_snapshot_is_clamped() {
        let state = ParameterState::new(Parameters {
            amplitude: 99.0,
            ..Parameters::default()
        });
        assert_eq!(state.initial().amplitude, 10.0);
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!("noise-variance".parse(), Ok(ParamField::NoiseVariance));
        assert_eq!("Cutoff".parse(), Ok(ParamField::Cutoff));
        assert!("gain".parse::<ParamField>().is_err());
    }
}
