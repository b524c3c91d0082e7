pub mod controller; // Recompute cycle and presentation contract
pub mod dataset;
pub mod dsp;
pub mod error;
pub mod params; // Slider-backed parameter state
pub mod waveform;

pub use controller::{ControllerState, Frame, Presentation, UiContext, UpdateController};
pub use dsp::{FilterKind, FilterSettings, HarmonicOscillator, HarmonicSpec, Smoother};
pub use error::{Error, Result};
pub use params::{ParamField, ParameterState, Parameters};
pub use waveform::{TimeAxis, Waveform};
