//! Recompute-and-publish loop tying parameters to the rendered waveforms.
//!
//! Every mutation of [`ParameterState`] runs one full cycle: generate the
//! harmonic from the current parameters, smooth that same waveform, and hand
//! both to the presentation. Nothing is cached between cycles.
//!
//! A failed cycle leaves the last published frame in place and reports the
//! error to the presentation; the caller's event loop keeps running.

use log::{debug, warn};

use crate::dsp::{HarmonicOscillator, Smoother};
use crate::error::{Error, Result};
use crate::params::{ParamField, ParameterState};
use crate::waveform::{TimeAxis, Waveform};

/// Rendering side of the pipeline.
pub trait Presentation {
    /// Draw the latest raw and filtered waveforms.
    fn render(&mut self, raw: &Waveform, filtered: &Waveform);

    /// Surface a failed cycle. Previously rendered data stays on screen.
    fn show_error(&mut self, error: &Error);

    /// Called after a successful cycle, so a stale error can be cleared.
    fn clear_error(&mut self) {}
}

impl<P: Presentation + ?Sized> Presentation for Box<P> {
    fn render(&mut self, raw: &Waveform, filtered: &Waveform) {
        (**self).render(raw, filtered)
    }

    fn show_error(&mut self, error: &Error) {
        (**self).show_error(error)
    }

    fn clear_error(&mut self) {
        (**self).clear_error()
    }
}

/// Owned UI state, built once at startup and passed to the controller.
pub struct UiContext<P: Presentation> {
    pub params: ParameterState,
    pub presentation: P,
}

impl<P: Presentation> UiContext<P> {
    pub fn new(params: ParameterState, presentation: P) -> Self {
        Self {
            params,
            presentation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Recomputing,
}

/// The waveform pair from one successful cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub raw: Waveform,
    pub filtered: Waveform,
}

/// Runs generate → smooth → publish whenever a parameter changes.
pub struct UpdateController {
    axis: TimeAxis,
    time_points: Vec<f64>,
    oscillator: HarmonicOscillator,
    smoother: Box<dyn Smoother>,
    state: ControllerState,
    last_frame: Option<Frame>,
    cycles: u64,
}

impl UpdateController {
    pub fn new(axis: TimeAxis, oscillator: HarmonicOscillator, smoother: Box<dyn Smoother>) -> Self {
        Self {
            time_points: axis.points(),
            axis,
            oscillator,
            smoother,
            state: ControllerState::Idle,
            last_frame: None,
            cycles: 0,
        }
    }

    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn smoother_name(&self) -> &'static str {
        self.smoother.name()
    }

    /// Most recently published frame, if any cycle has succeeded.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// Number of successful cycles so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Single entry point for slider changes.
    pub fn on_parameter_changed<P: Presentation>(
        &mut self,
        ctx: &mut UiContext<P>,
        field: ParamField,
        value: f64,
    ) -> Result<()> {
        match ctx.params.set(field, value) {
            Ok(stored) => {
                debug!("{field} set to {stored}");
                self.refresh(ctx)
            }
            Err(err) => {
                warn!("rejected {field} = {value}: {err}");
                ctx.presentation.show_error(&err);
                Err(err)
            }
        }
    }

    pub fn toggle_noise<P: Presentation>(&mut self, ctx: &mut UiContext<P>) -> Result<()> {
        let shown = ctx.params.toggle_noise();
        debug!("noise {}", if shown { "shown" } else { "hidden" });
        self.refresh(ctx)
    }

    pub fn reset<P: Presentation>(&mut self, ctx: &mut UiContext<P>) -> Result<()> {
        ctx.params.reset();
        debug!("parameters reset to initial values");
        self.refresh(ctx)
    }

    /// Run one cycle from the current parameters.
    pub fn refresh<P: Presentation>(&mut self, ctx: &mut UiContext<P>) -> Result<()> {
        debug_assert_eq!(self.state, ControllerState::Idle);
        self.state = ControllerState::Recomputing;
        let outcome = self.recompute(&ctx.params);
        self.state = ControllerState::Idle;

        match outcome {
            Ok(frame) => {
                ctx.presentation.render(&frame.raw, &frame.filtered);
                ctx.presentation.clear_error();
                self.last_frame = Some(frame);
                self.cycles += 1;
                Ok(())
            }
            Err(err) => {
                warn!("recompute failed, keeping previous frame: {err}");
                ctx.presentation.show_error(&err);
                Err(err)
            }
        }
    }

    fn recompute(&mut self, params: &ParameterState) -> Result<Frame> {
        let current = params.current();
        let raw = self
            .oscillator
            .generate(&self.time_points, &current.harmonic())?;
        let filtered = self.smoother.smooth(&raw, &current.filter())?;
        debug!(
            "cycle {}: {} samples through {}",
            self.cycles + 1,
            raw.len(),
            self.smoother.name()
        );
        Ok(Frame { raw, filtered })
    }
}
