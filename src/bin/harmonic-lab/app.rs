//! Lab - pipeline builder and runners

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use log::info;

use harmonic_lab::{
    dsp::filter::{smoother, DEFAULT_WINDOW},
    FilterKind, HarmonicOscillator, ParamField, ParameterState, Parameters, TimeAxis, UiContext,
    UpdateController,
};

use super::export::CsvPresentation;
use super::ui::{TuiPresentation, UiApp};

/// Main application builder
pub struct Lab {
    sample_rate: f64,
    duration: f64,
    order: usize,
    filter: FilterKind,
    window: usize,
    seed: Option<u64>,
    initial: Parameters,
}

impl Lab {
    /// Create a lab with the default 10 s, 100 Hz, order-5 Butterworth setup
    pub fn new() -> Self {
        Self {
            sample_rate: 100.0,
            duration: 10.0,
            order: 5,
            filter: FilterKind::Butterworth,
            window: DEFAULT_WINDOW,
            seed: None,
            initial: Parameters::default(),
        }
    }

    /// Set the sampling rate in Hz
    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the time axis length in seconds
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Set the Butterworth order
    pub fn order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Choose the smoothing stage. `window` is only read by the moving average.
    pub fn filter(mut self, kind: FilterKind, window: usize) -> Self {
        self.filter = kind;
        self.window = window;
        self
    }

    /// Make the noise sequence reproducible
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn show_noise(mut self, show: bool) -> Self {
        self.initial.show_noise = show;
        self
    }

    /// Override a slider's startup value (clamped into its range)
    pub fn set(mut self, field: ParamField, value: f64) -> Self {
        self.initial = self.initial.with(field, value);
        self
    }

    /// Assemble the controller and the parameter state it will drive
    fn build(&self) -> EyreResult<(UpdateController, ParameterState)> {
        let axis = TimeAxis::from_rate(self.sample_rate, self.duration)
            .wrap_err("invalid time axis")?;
        let smoother = smoother(self.filter, self.window).wrap_err("invalid filter")?;
        let oscillator = match self.seed {
            Some(seed) => HarmonicOscillator::seeded(seed),
            None => HarmonicOscillator::new(),
        };

        let params = Parameters {
            sample_rate: self.sample_rate,
            filter_order: self.order,
            ..self.initial
        };
        // Order is fixed for the run.
        params.filter().checked_order().wrap_err("invalid filter")?;
        let params = ParameterState::new(params);

        info!(
            "{} samples at {} Hz, {} filter (order {}, window {})",
            axis.len(),
            self.sample_rate,
            smoother.name(),
            self.order,
            self.window
        );

        Ok((UpdateController::new(axis, oscillator, smoother), params))
    }

    /// Run the interactive terminal UI until the user quits
    pub fn run(self) -> EyreResult<()> {
        let (mut controller, params) = self.build()?;
        let presentation = TuiPresentation::new(*controller.axis());
        let mut ctx = UiContext::new(params, presentation);

        // A failed first cycle is shown in the status bar, not fatal.
        let _ = controller.refresh(&mut ctx);

        let mut terminal = ratatui::init();
        let result = UiApp::new(controller, ctx, self.filter_label()).run(&mut terminal);
        ratatui::restore();
        result
    }

    /// Render one cycle and write it as CSV to `output` or stdout
    pub fn export(self, output: Option<&Path>) -> EyreResult<()> {
        let (mut controller, params) = self.build()?;
        let sink: Box<dyn Write> = match output {
            Some(path) => Box::new(
                File::create(path)
                    .wrap_err_with(|| format!("failed to create {}", path.display()))?,
            ),
            None => Box::new(io::stdout().lock()),
        };

        let mut ctx = UiContext::new(params, CsvPresentation::new(sink));
        controller.refresh(&mut ctx).wrap_err("recompute failed")?;
        let rows = ctx.presentation.finish()?;

        info!("exported {rows} rows");
        Ok(())
    }

    fn filter_label(&self) -> String {
        match self.filter {
            FilterKind::Butterworth => format!("Butterworth, order {}", self.order),
            FilterKind::MovingAverage => format!("Moving average, {} samples", self.window),
        }
    }
}

impl Default for Lab {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_applies_overrides_as_reset_snapshot() {
        let lab = Lab::new().set(ParamField::Amplitude, 50.0).seed(1);
        let (_, params) = lab.build().unwrap();
        assert_eq!(params.initial().amplitude, 10.0);
        assert_eq!(params.current().sample_rate, 100.0);
    }

    #[test]
    fn test_build_rejects_zero_window() {
        let lab = Lab::new().filter(FilterKind::MovingAverage, 0);
        assert!(lab.build().is_err());
    }

    #[test]
    fn test_build_rejects_zero_order() {
        assert!(Lab::new().order(0).build().is_err());
        assert!(Lab::new()
            .filter(FilterKind::MovingAverage, DEFAULT_WINDOW)
            .order(0)
            .build()
            .is_err());
    }

    #[test]
    fn test_build_rejects_unusable_axis() {
        assert!(Lab::new().duration(1e300).build().is_err());
        let (controller, _) = Lab::new().duration(1e-10).build().unwrap();
        assert_eq!(controller.axis().len(), 1);
    }

    #[test]
    fn test_build_uses_configured_axis() {
        let (controller, _) = Lab::new().sample_rate(50.0).duration(2.0).build().unwrap();
        assert_eq!(controller.axis().len(), 100);
    }
}
