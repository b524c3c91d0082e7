//! Presentation state for the terminal UI
//!
//! The controller pushes each new frame here; drawing reads it back on the
//! next redraw. Chart points are converted once per frame, not per draw.

use harmonic_lab::{
    dsp::analysis::{band_energy_above, WaveformStats},
    Error, Presentation, TimeAxis, Waveform,
};

/// How the two charts draw their samples. Affects rendering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotStyle {
    #[default]
    Line,
    Scatter,
}

impl PlotStyle {
    pub fn next(self) -> Self {
        match self {
            PlotStyle::Line => PlotStyle::Scatter,
            PlotStyle::Scatter => PlotStyle::Line,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlotStyle::Line => "Line",
            PlotStyle::Scatter => "Scatter",
        }
    }
}

/// Latest published frame, ready for ratatui charts
pub struct TuiPresentation {
    /// Time axis both charts share
    pub axis: TimeAxis,
    /// Raw (noisy) samples as chart points
    pub raw: Vec<(f64, f64)>,
    /// Filtered samples as chart points
    pub filtered: Vec<(f64, f64)>,
    pub raw_stats: WaveformStats,
    pub filtered_stats: WaveformStats,
    /// Filtered vs raw energy in the upper band, in dB
    pub hf_attenuation_db: Option<f64>,
    /// Message from the last failed cycle, cleared by the next good one
    pub error: Option<String>,
    pub style: PlotStyle,
    /// Frames received so far
    pub frames: u64,
}

impl TuiPresentation {
    pub fn new(axis: TimeAxis) -> Self {
        Self {
            axis,
            raw: Vec::new(),
            filtered: Vec::new(),
            raw_stats: WaveformStats::default(),
            filtered_stats: WaveformStats::default(),
            hf_attenuation_db: None,
            error: None,
            style: PlotStyle::default(),
            frames: 0,
        }
    }

    /// Symmetric y bound fitting both traces, never tighter than ±1
    pub fn y_bound(&self) -> f64 {
        self.raw_stats.peak.max(self.filtered_stats.peak).max(1.0) * 1.1
    }

    /// Lower edge of the band the attenuation readout compares: Nyquist / 4
    pub fn hf_band_edge(&self) -> f64 {
        self.axis.sample_rate() / 8.0
    }

    fn attenuation_db(&self, raw: &Waveform, filtered: &Waveform) -> Option<f64> {
        let rate = self.axis.sample_rate();
        let edge = self.hf_band_edge();
        let before = band_energy_above(raw, rate, edge).ok()?;
        let after = band_energy_above(filtered, rate, edge).ok()?;
        (before > 0.0 && after > 0.0).then(|| 10.0 * (after / before).log10())
    }
}

impl Presentation for TuiPresentation {
    fn render(&mut self, raw: &Waveform, filtered: &Waveform) {
        self.raw = raw.samples().collect();
        self.filtered = filtered.samples().collect();
        self.raw_stats = WaveformStats::from_waveform(raw);
        self.filtered_stats = WaveformStats::from_waveform(filtered);
        self.hf_attenuation_db = self.attenuation_db(raw, filtered);
        self.frames += 1;
    }

    fn show_error(&mut self, error: &Error) {
        self.error = Some(error.to_string());
    }

    fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_survives_until_next_good_frame() {
        let wave = Waveform::new(vec![0.0, 0.1], vec![2.0, -3.0]).unwrap();
        let mut presentation = TuiPresentation::new(TimeAxis::default());

        presentation.render(&wave, &wave);
        presentation.show_error(&Error::EmptyInput { stage: "test" });
        assert_eq!(presentation.raw.len(), 2);
        assert!(presentation.error.is_some());

        presentation.clear_error();
        assert!(presentation.error.is_none());
        assert!((presentation.y_bound() - 3.3).abs() < 1e-9);
    }

    #[test]
    fn test_attenuation_compares_upper_band() {
        use std::f64::consts::TAU;

        let axis = TimeAxis::default();
        let times = axis.points();
        let mix = |hf_gain: f64| -> Waveform {
            let values = times
                .iter()
                .map(|t| (TAU * t).sin() + hf_gain * (TAU * 30.0 * t).sin())
                .collect();
            Waveform::new(times.clone(), values).unwrap()
        };

        let mut presentation = TuiPresentation::new(axis);
        presentation.render(&mix(0.5), &mix(0.05));

        let db = presentation.hf_attenuation_db.unwrap();
        assert!((db + 20.0).abs() < 0.1, "attenuation {db}");
    }

    #[test]
    fn test_style_cycles() {
        assert_eq!(PlotStyle::Line.next(), PlotStyle::Scatter);
        assert_eq!(PlotStyle::Scatter.next(), PlotStyle::Line);
    }
}
