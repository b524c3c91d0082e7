//! Benchmark for one full recompute cycle through the controller.

use std::hint::black_box;

use criterion::Criterion;
use harmonic_lab::{
    dsp::filter::ButterworthLowPass, Error, HarmonicOscillator, ParamField, ParameterState,
    Presentation, TimeAxis, UiContext, UpdateController, Waveform,
};

/// Presentation that only touches the data it is handed
struct Sink;

impl Presentation for Sink {
    fn render(&mut self, raw: &Waveform, filtered: &Waveform) {
        black_box((raw.len(), filtered.len()));
    }

    fn show_error(&mut self, error: &Error) {
        black_box(error);
    }
}

pub fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller");
    let mut controller = UpdateController::new(
        TimeAxis::default(),
        HarmonicOscillator::seeded(0),
        Box::new(ButterworthLowPass),
    );
    let mut ctx = UiContext::new(ParameterState::default(), Sink);

    let mut amplitude = 1.0;
    group.bench_function("slider_change", |b| {
        b.iter(|| {
            amplitude = if amplitude > 9.0 { 1.0 } else { amplitude + 0.1 };
            controller.on_parameter_changed(&mut ctx, ParamField::Amplitude, black_box(amplitude))
        })
    });

    group.finish();
}
